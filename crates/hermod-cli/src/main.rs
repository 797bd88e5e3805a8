//! Hermod infrastructure CLI.

use clap::{Parser, Subcommand, ValueEnum};
use hermod_config::ProcessEnv;
use hermod_synth::DEFAULT_OUT_DIR;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "hermod")]
#[command(about = "Hermod infrastructure synthesizer", long_about = None)]
struct Cli {
    /// Log output format
    #[arg(long, env = "HERMOD_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Do not load a .env file before resolving configuration
    #[arg(long)]
    no_dotenv: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the deployment mode and synthesize its topology
    Synth {
        /// Output directory for the cloud assembly
        #[arg(long, default_value = DEFAULT_OUT_DIR)]
        out: String,
        /// Print the assembly to stdout instead of writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the resolved deployment mode and configuration
    Config,
    /// Print the resolved stage
    Stage,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    if !cli.no_dotenv {
        hermod_config::env::load_dotenv();
    }

    let env = ProcessEnv;
    match cli.command {
        Commands::Synth { out, dry_run } => {
            commands::synth::run(&env, &out, dry_run)?;
        }
        Commands::Config => {
            commands::config(&env)?;
        }
        Commands::Stage => {
            commands::stage(&env);
        }
    }

    Ok(())
}
