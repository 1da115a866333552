use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use kundali_chart::{
    ChartBundle, ChartSnapshot, SignNaming, assemble_bundle, assemble_with, canonicalize, decompose,
};
use kundali_config::{KundaliConfig, OutputFormat};

mod render;

#[derive(Parser)]
#[command(name = "kundali", about = "Kundali chart normalization CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Extra TOML config file, layered above ./kundali.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(long, global = true, value_enum)]
    format: Option<FormatArg>,

    /// Sign naming for text output (overrides config)
    #[arg(long, global = true, value_enum)]
    naming: Option<NamingArg>,

    /// Print diagnostics in text output
    #[arg(long, global = true)]
    diagnostics: bool,

    /// Quadrant charts: exclude bodies whose sign has no cusp instead of
    /// falling back to their reported house
    #[arg(long, global = true)]
    no_hint_fallback: bool,

    /// Quadrant charts: reject cusp lists that repeat a sign
    #[arg(long, global = true)]
    strict_cusps: bool,

    /// Debug logging (KUNDALI_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Canonicalize a sign name
    Sign {
        /// Western or Sanskrit sign name (exact spelling)
        name: String,
    },
    /// Decompose degrees within a sign into DMS
    Dms {
        /// Degrees within the sign, [0, 30)
        #[arg(allow_negative_numbers = true)]
        deg: f64,
    },
    /// Normalize one chart snapshot
    Normalize {
        /// Path to a JSON snapshot
        file: PathBuf,
    },
    /// Normalize every chart of a bundle
    Bundle {
        /// Path to a JSON object of label -> snapshot
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Text,
}

#[derive(Clone, Copy, ValueEnum)]
enum NamingArg {
    Western,
    Sanskrit,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("kundali: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Sign { name } => {
            let rashi = canonicalize(name)?;
            println!(
                "{} {} ({})",
                rashi.number(),
                rashi.western_name(),
                rashi.name()
            );
        }

        Commands::Dms { deg } => {
            let d = decompose(*deg)?;
            println!("{d} ({} deg {} min {} sec)", d.degrees, d.minutes, d.seconds);
        }

        Commands::Normalize { file } => {
            let snapshot = ChartSnapshot::from_json(&read_input(file)?)
                .with_context(|| format!("invalid snapshot {}", file.display()))?;
            let chart = assemble_with(&snapshot, &config.normalize)
                .with_context(|| format!("cannot normalize {}", file.display()))?;
            match config.output.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&chart)?),
                OutputFormat::Text => print!("{}", render::chart_text(&chart, &config.output)),
            }
        }

        Commands::Bundle { file } => {
            let bundle = ChartBundle::from_json(&read_input(file)?)
                .with_context(|| format!("invalid bundle {}", file.display()))?;
            let results = assemble_bundle(&bundle, &config.normalize);
            match config.output.format {
                OutputFormat::Json => {
                    let value = render::bundle_json(&results)?;
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                OutputFormat::Text => print!("{}", render::bundle_text(&results, &config.output)),
            }
        }
    }

    Ok(())
}

/// Config file layers, then command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<KundaliConfig> {
    let mut config = KundaliConfig::load_with_file(cli.config.as_deref())
        .context("failed to load configuration")?;

    if let Some(format) = cli.format {
        config.output.format = match format {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Text => OutputFormat::Text,
        };
    }
    if let Some(naming) = cli.naming {
        config.output.naming = match naming {
            NamingArg::Western => SignNaming::Western,
            NamingArg::Sanskrit => SignNaming::Sanskrit,
        };
    }
    if cli.diagnostics {
        config.output.show_diagnostics = true;
    }
    if cli.no_hint_fallback {
        config.normalize.hint_fallback = false;
    }
    if cli.strict_cusps {
        config.normalize.reject_duplicate_cusps = true;
    }

    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "warn" };

    let filter = tracing_subscriber::EnvFilter::try_from_env("KUNDALI_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
