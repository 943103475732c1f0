//! histmerge CLI

mod inspect;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hm_combine::{
    CombineSettings, DEFAULT_MODELS, DEFAULT_OUT_FOLDER, DescriptorGenerator, DummyConfig,
    parse_models, run_combination,
};
use hm_core::ArtifactGenerator;
use hm_store::JsonStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "histmerge")]
#[command(about = "histmerge - combine EWK and QCD EFT histogram partitions")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine the EWK and QCD partitions into one set of containers
    Combine {
        /// Base folder of the EWK partition
        #[arg(long)]
        ewk: PathBuf,

        /// Base folder of the QCD partition
        #[arg(long)]
        qcd: PathBuf,

        /// Name of the combined process
        #[arg(long)]
        outprocess: String,

        /// Dummy configuration with `d_<kind>` sections holding a `makeDummy` toggle:
        /// Latinos INI (`[d_structure]` / `makeDummy = True`), YAML or JSON.
        /// Without it no derived artifacts are generated.
        #[arg(long)]
        cfg: Option<PathBuf>,

        /// Folder prefix of EWK operators, ending with the channel (e.g. to_Latinos_SSWW)
        #[arg(long, alias = "prefix_ewk", default_value = "to_Latinos")]
        prefix_ewk: String,

        /// Folder prefix of QCD operators, ending with the channel (e.g. to_Latinos_OSWWQCD)
        #[arg(long, alias = "prefix_qcd", default_value = "to_Latinos")]
        prefix_qcd: String,

        /// Comma-separated models to combine
        #[arg(long, default_value = DEFAULT_MODELS)]
        models: String,

        /// Output folder
        #[arg(long, default_value = DEFAULT_OUT_FOLDER)]
        outfolder: PathBuf,

        /// Prefix of output operator folders
        #[arg(long, default_value = "to_Latinos")]
        output_prefix: String,

        /// Always add the SM shape of the minority partition as an extra background,
        /// whether or not the operator exists in both partitions
        #[arg(long, alias = "qcdAsbkg")]
        qcd_as_bkg: bool,

        /// Threads (0 = auto). Use 1 for sequential processing.
        #[arg(long, default_value = "1")]
        threads: usize,

        /// Also write the summary as JSON to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// List the histograms of a container
    Inspect {
        /// Container file (histos.json)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Combine {
            ewk,
            qcd,
            outprocess,
            cfg,
            prefix_ewk,
            prefix_qcd,
            models,
            outfolder,
            output_prefix,
            qcd_as_bkg,
            threads,
            report,
        } => {
            let settings = CombineSettings {
                ewk_base: ewk,
                qcd_base: qcd,
                ewk_prefix: prefix_ewk,
                qcd_prefix: prefix_qcd,
                out_process: outprocess,
                models: parse_models(&models),
                out_folder: outfolder,
                folder_prefix: output_prefix,
                qcd_as_bkg,
                threads,
            };
            cmd_combine(&settings, cfg.as_ref(), report.as_ref())
        }
        Commands::Inspect { input, output } => inspect::cmd_inspect(&input, output.as_ref()),
        Commands::Version => {
            println!("histmerge {}", hm_core::VERSION);
            Ok(())
        }
    }
}

fn cmd_combine(
    settings: &CombineSettings,
    cfg: Option<&PathBuf>,
    report_path: Option<&PathBuf>,
) -> Result<()> {
    let toggles = match cfg {
        Some(path) => DummyConfig::from_path(path)
            .with_context(|| format!("reading dummy config {}", path.display()))?,
        None => DummyConfig::default(),
    };
    let generators: Vec<Box<dyn ArtifactGenerator>> = vec![Box::new(DescriptorGenerator)];

    tracing::info!(
        ewk = %settings.ewk_base.display(),
        qcd = %settings.qcd_base.display(),
        models = ?settings.models,
        "starting combination"
    );
    let report = run_combination(&JsonStore, settings, &toggles, &generators)
        .context("combination failed")?;

    if let Some(path) = report_path {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("writing report {}", path.display()))?;
    }

    println!("[INFO] Conclusions ...");
    println!("{report}");
    Ok(())
}
