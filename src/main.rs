use anyhow::{bail, Context};
use clap::Parser;
use dynamo_cfn::{config::Config, Converter, Format, Processor};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Convert `aws dynamodb describe-table` JSON into a CloudFormation template
#[derive(Debug, Parser)]
#[command(name = "dynamo-cfn", version, long_about = None)]
struct Cli {
    /// Input describe-table file, or a directory of them
    input: PathBuf,

    /// Output file (single input only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output directory (directory input only)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// CloudFormation logical resource name
    #[arg(long)]
    logical_name: Option<String>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Template description
    #[arg(long)]
    description: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// What the run uses once flags and the config file are merged.
/// Flags win over the config file, which wins over built-in defaults.
#[derive(Debug)]
struct Settings {
    format: Format,
    description: Option<String>,
    converter: Converter,
}

impl Settings {
    fn resolve(cli: &Cli, config: &Config) -> Self {
        let mut builder = Converter::builder().set_logical_names(config.logical_names());
        if let Some(logical_name) = cli.logical_name.as_ref() {
            builder = builder.set_logical_name(logical_name);
        }

        let description = cli.description.clone().or_else(|| config.description());
        if let Some(description) = description.as_ref() {
            builder = builder.set_description(description);
        }

        Self {
            format: cli.format.or(config.format()).unwrap_or_default(),
            description,
            converter: builder.build(),
        }
    }

    fn into_processor(self) -> Processor {
        Processor::new(self.converter, self.format)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::new();
    debug!("{:?}", config);

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    if !cli.input.exists() {
        bail!("Input not found: {}", cli.input.display());
    }
    if cli.input.is_dir() && cli.output.is_some() {
        bail!("--output only applies to a single input file, use --out-dir");
    }

    let settings = Settings::resolve(&cli, config);
    debug!(
        format = %settings.format,
        description = ?settings.description,
        "Resolved settings"
    );
    let processor = settings.into_processor();

    if cli.input.is_dir() {
        let summary = processor
            .process_dir(&cli.input, cli.out_dir.as_deref())
            .with_context(|| format!("Failed to convert {}", cli.input.display()))?;

        for path in summary.written.iter() {
            println!("Wrote: {}", path.display());
        }
        for (path, err) in summary.skipped.iter() {
            println!("Skipped {}: {err}", path.display());
        }
        if !summary.is_complete() {
            bail!("{} file(s) could not be converted", summary.skipped.len());
        }
    } else {
        if cli.out_dir.is_some() {
            warn!("--out-dir is ignored for a single input file");
        }
        let path = processor
            .process_file(&cli.input, cli.output.as_deref())
            .with_context(|| format!("Failed to convert {}", cli.input.display()))?;
        println!("Wrote: {}", path.display());
    }

    Ok(())
}
