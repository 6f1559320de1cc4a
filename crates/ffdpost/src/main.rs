//! ffdpost - batch post-processing of CFD/FFD results.
//!
//! Loads a pipeline configuration (TOML/JSON file, CLI overrides on top),
//! then either emits a pvpython batch script or dry-runs the call plan.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{error, info};

use ffdpost::{Pipeline, PipelineConfig, RecordingEngine, ScriptEngine};

/// Which engine backend executes the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Emit a pvpython batch script for the external engine.
    Script,
    /// Execute in memory and log the call plan; write no images.
    DryRun,
}

#[derive(Parser, Debug)]
#[command(
    name = "ffdpost",
    version,
    about = "Automated post-processing of CFD/FFD results via a ParaView-class engine"
)]
struct Cli {
    /// Pipeline configuration file (.toml or .json).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input result file(s); overrides the config file.
    #[arg(short, long)]
    input: Vec<PathBuf>,

    /// Directory for images, tables, and the batch script.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Scalar field(s) to contour; overrides the config file.
    #[arg(short = 'f', long = "field")]
    fields: Vec<String>,

    /// Screenshot width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Screenshot height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Engine backend.
    #[arg(long, value_enum, default_value_t = Backend::Script)]
    backend: Backend,

    /// Batch-script output path (script backend only).
    #[arg(long)]
    script_out: Option<PathBuf>,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Builds the effective configuration: flags > file > defaults.
    fn resolve_config(&self) -> ffdpost::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };
        if !self.input.is_empty() {
            config.input = self.input.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if !self.fields.is_empty() {
            config.contour_fields = self.fields.clone();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        Ok(config)
    }
}

fn run(cli: &Cli) -> ffdpost::Result<()> {
    let config = cli.resolve_config()?;
    std::fs::create_dir_all(&config.output_dir)?;

    let script_path = cli
        .script_out
        .clone()
        .unwrap_or_else(|| config.output_dir.join("post.py"));

    let pipeline = Pipeline::new(config)?;

    let report = match cli.backend {
        Backend::Script => {
            let mut engine = ScriptEngine::new(&script_path);
            let report = pipeline.run(&mut engine)?;
            info!("batch script written to {}", script_path.display());
            report
        }
        Backend::DryRun => {
            let mut engine = RecordingEngine::new().dry_run();
            let report = pipeline.run(&mut engine)?;
            info!("dry run issued {} engine call(s)", engine.calls().len());
            report
        }
    };

    info!("{}", report.summary());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_take_precedence() {
        let cli = Cli::parse_from([
            "ffdpost",
            "--input",
            "other.vtk",
            "--field",
            "P",
            "--width",
            "200",
            "--height",
            "300",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.input, vec![PathBuf::from("other.vtk")]);
        assert_eq!(config.contour_fields, vec!["P"]);
        assert_eq!((config.width, config.height), (200, 300));
    }

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["ffdpost"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.input, vec![PathBuf::from("result.vtk")]);
        assert_eq!(config.contour_fields, vec!["T", "VEL"]);
        assert_eq!(cli.backend, Backend::Script);
    }
}
