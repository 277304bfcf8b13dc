//! edge-gate - edge access-control gate
//!
//! Runs the gate against a single edge event, encodes allow-list addresses,
//! and validates configuration files.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use edge_gate::config::{
    BasicValidator, ConfigLoader, GateConfig, LoggingConfig, RestrictedPathValidator,
};
use edge_gate::module::{ModuleConfig, ModuleContract};
use edge_gate::modules::access_control::{parse_address_list, EdgeEvent, GateHandler};
use edge_gate::modules::logging::{init_logging, LogError};
use tracing::info;

/// edge-gate - IP allow-list gate with secret override
#[derive(Parser, Debug)]
#[command(name = "edge-gate")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide one edge event and print the resulting request
    Check {
        /// Path to gate configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Edge event JSON file (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        event: PathBuf,
    },

    /// Print `address,key` for each address in a list
    Encode {
        /// Address list file (`-` for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Load and validate a configuration file
    Validate {
        /// Path to gate configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn loader() -> ConfigLoader {
    ConfigLoader::new()
        .with_validator(BasicValidator::new())
        .with_validator(RestrictedPathValidator::new())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        Ok(content)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn setup_logging(config: &LoggingConfig) -> Result<()> {
    match init_logging(config) {
        Ok(()) | Err(LogError::AlreadyInitialized(_)) => Ok(()),
        Err(e) => Err(e).context("failed to initialize logging"),
    }
}

fn load_config(path: &Path) -> Result<GateConfig> {
    loader()
        .load(path)
        .with_context(|| format!("failed to load config {}", path.display()))
}

async fn check(config_path: &Path, event_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    setup_logging(&config.logging)?;

    let mut gate = GateHandler::with_config(config);
    gate.init(ModuleConfig::new())?;
    gate.start()?;

    let event = EdgeEvent::from_json(&read_input(event_path)?)?;
    let (request, decision) = gate.handle(event.into_request()?).await;
    info!(verdict = %decision.verdict, reason = %decision.reason, "decided edge event");

    println!("{}", serde_json::to_string_pretty(&request)?);

    gate.stop()?;
    Ok(())
}

fn encode(input: &Path) -> Result<()> {
    let entries = parse_address_list(&read_input(input)?)?;
    for entry in entries {
        println!("{},{}", entry.address, entry.key);
    }
    Ok(())
}

fn validate(config_path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;
    let config: GateConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;

    let result = loader().check(&config);
    for warning in result.warnings() {
        println!("warning: {warning}");
    }
    let errors = result.errors_only();
    if !errors.is_empty() {
        for error in &errors {
            println!("error: {error}");
        }
        bail!("{} validation error(s) in {}", errors.len(), config_path.display());
    }

    println!("{}: ok", config_path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config, event } => check(&config, &event).await,
        Commands::Encode { input } => encode(&input),
        Commands::Validate { config } => validate(&config),
    }
}
