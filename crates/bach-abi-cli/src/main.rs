//! # bach-abi
//!
//! Command-line interface for BachLedger contract ABI encoding.
//!
//! ## Usage
//!
//! ```bash
//! # Encode parameters
//! bach-abi encode --types uint256,string '["2345675643", "Hello!%"]'
//! bach-abi encode --types 'tuple(address,uint256)[]' '[[["0x77656c636f6d6520746f20657468657265756d2e", "1"]]]'
//!
//! # Function calls
//! bach-abi selector 'transfer(address,uint256)'
//! bach-abi call 'transfer(address,uint256)' '["0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d", 1000]'
//!
//! # Inspect a type
//! bach-abi parse 'tuple(bool,bytes)[2]'
//! ```

use bach_abi::AbiEncoder;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// BachLedger ABI encoder
#[derive(Parser, Debug)]
#[command(name = "bach-abi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Encode parameter values
    Encode {
        /// Comma-separated parameter types, e.g. `uint256,tuple(bool,string)`
        #[arg(long, allow_hyphen_values = true)]
        types: String,
        /// JSON array of values
        values: String,
    },
    /// Compute a function selector
    Selector {
        /// Function signature, e.g. `transfer(address,uint256)`
        signature: String,
    },
    /// Encode a function call (selector + parameters)
    Call {
        /// Function signature
        signature: String,
        /// JSON array of values
        values: String,
    },
    /// Parse a type signature and show its layout
    Parse {
        /// Type signature
        signature: String,
    },
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set maximum type nesting depth
        #[arg(long)]
        set_max_depth: Option<usize>,
        /// Enable or disable the parsed type cache
        #[arg(long)]
        set_cache: Option<bool>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Load config
    let mut config = Config::load();

    // Initialize tracing
    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let encoder = AbiEncoder::new(config.encoder.clone());

    let result = match cli.command {
        Commands::Encode { types, values } => {
            commands::encode::encode(&encoder, &types, &values, cli.json)
        }
        Commands::Selector { signature } => commands::inspect::selector(&signature, cli.json),
        Commands::Call { signature, values } => {
            commands::encode::call(&encoder, &signature, &values, cli.json)
        }
        Commands::Parse { signature } => commands::inspect::parse(&encoder, &signature, cli.json),
        Commands::Config {
            show,
            set_max_depth,
            set_cache,
        } => handle_config(&mut config, show, set_max_depth, set_cache, cli.json),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn handle_config(
    config: &mut Config,
    show: bool,
    set_max_depth: Option<usize>,
    set_cache: Option<bool>,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(max_depth) = set_max_depth {
        if max_depth == 0 {
            return Err(CliError::InvalidInput(
                "max depth must be at least 1".to_string(),
            ));
        }
        config.encoder.max_depth = max_depth;
        modified = true;
    }

    if let Some(cache) = set_cache {
        config.encoder.cache_types = cache;
        modified = true;
    }

    if modified {
        let path = config.save()?;
        Output::new(json)
            .field("status", "saved")
            .field("path", &path.display().to_string())
            .message("Configuration saved")
            .print();
    } else if show {
        Output::new(json)
            .field_u64("max_depth", config.encoder.max_depth as u64)
            .field_bool("cache_types", config.encoder.cache_types)
            .field("log_level", &config.log_level)
            .message(&format!(
                "Max depth: {}\nCache types: {}\nLog level: {}",
                config.encoder.max_depth, config.encoder.cache_types, config.log_level
            ))
            .print();
    } else {
        Output::new(json)
            .message("Use --show to display config, or --set-max-depth/--set-cache to modify")
            .print();
    }

    Ok(())
}
