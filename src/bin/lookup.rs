//! Command line tool for cep-temperature.
//!
//! Runs the same lookups as the HTTP service without starting a server.
//!
//! # Usage
//!
//! ```bash
//! # Current temperature for a postal code
//! cargo run --bin lookup -- temperature 95770000
//!
//! # Same, as JSON
//! cargo run --bin lookup -- temperature 95770-000 --json
//!
//! # Check a postal code against both validators
//! cargo run --bin lookup -- validate 95770000
//!
//! # Show the effective configuration
//! cargo run --bin lookup -- config
//! ```
//!
//! # Environment Variables
//!
//! Same as the server, see [`cep_temperature::config`]. `validate` needs none.

use cep_temperature::api::dto::temperature::TemperatureResponse;
use cep_temperature::config::{self, Config};
use cep_temperature::domain::validators::{LengthValidator, NationalCepValidator, PostalCodeValidator};
use cep_temperature::{logging, server};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tokio_util::sync::CancellationToken;

/// CLI tool for cep-temperature.
#[derive(Parser)]
#[command(name = "lookup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the current temperature for a postal code
    Temperature {
        /// Postal code, e.g. 95770000 or 95770-000
        cep: String,

        /// Print the HTTP response body instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check a postal code locally, without any network call
    Validate {
        /// Postal code to check
        cep: String,
    },

    /// Show the configuration loaded from the environment
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Temperature { cep, json } => {
            let config = config::load_from_env()?;
            let _telemetry = logging::init("warn", &config.log_format, None)?;
            handle_temperature(&config, &cep, json).await?
        }
        Commands::Validate { cep } => handle_validate(&cep),
        Commands::Config => handle_config(&config::load_from_env()?),
    }

    Ok(())
}

/// Runs one lookup. Ctrl+C cancels it.
async fn handle_temperature(config: &Config, cep: &str, json: bool) -> Result<()> {
    let service = server::build_temperature_query(config)?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let result = service
        .execute(cep, &cancel)
        .await
        .with_context(|| format!("Lookup failed for '{cep}'"))?;
    let response = TemperatureResponse::from(result);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", "Temperature".bright_blue().bold());
    println!();
    println!("  City:       {}", response.city.cyan());
    println!("  Celsius:    {}", format!("{:.1} °C", response.temp_c).bright_yellow());
    println!("  Fahrenheit: {}", format!("{:.1} °F", response.temp_f).bright_yellow());
    println!("  Kelvin:     {}", format!("{:.1} K", response.temp_k).bright_yellow());
    println!();

    Ok(())
}

/// Prints both validators' verdicts and the state the code belongs to.
fn handle_validate(cep: &str) {
    println!("{} {}", "Postal code:".bright_white().bold(), cep.cyan());
    println!();

    println!("  length:   {}", verdict(LengthValidator.is_valid(cep)));
    println!(
        "  national: {}",
        verdict(NationalCepValidator::new().is_valid(cep))
    );

    match NationalCepValidator::state_of(cep) {
        Some(state) => println!("  state:    {}", state.bright_cyan()),
        None => println!("  state:    {}", "unknown".dimmed()),
    }
    println!();
}

fn verdict(valid: bool) -> ColoredString {
    if valid {
        "valid".green().bold()
    } else {
        "invalid".red().bold()
    }
}

/// Prints the validated configuration with credentials masked.
fn handle_config(config: &Config) {
    println!("{}", "Configuration".bright_blue().bold());
    println!();

    for (label, value) in config.summary() {
        println!("  {:<22}{}", format!("{label}:").bright_white(), value);
    }
    println!();
}
