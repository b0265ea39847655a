use std::path::PathBuf;

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use clap::{Parser, Subcommand};
use serde_json::json;

use signing_gateway::config::{load_config, GatewayConfig, SignerConfig};
use signing_gateway::signing::{signing_payload, Signature};

#[derive(Parser)]
#[command(name = "signature-cli")]
#[command(about = "Compute gateway request signatures offline", long_about = None)]
struct Cli {
    /// Gateway config file to read signer settings from.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the X-Signature a request would receive
    Sign {
        /// Raw query string, without the leading '?'
        #[arg(short, long, default_value = "")]
        query: String,

        /// Request header as NAME=VALUE (repeatable)
        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(HeaderName, HeaderValue)>,

        /// Secret key (overrides config)
        #[arg(long)]
        secret: Option<String>,

        /// Comma-separated header names to sign (overrides config)
        #[arg(long, value_delimiter = ',')]
        signed_headers: Option<Vec<String>>,

        /// Print JSON instead of the bare signature
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration with the secret redacted
    Config,
}

fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|e| e.to_string())?;
    let value = HeaderValue::from_str(value).map_err(|e| e.to_string())?;
    Ok((name, value))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    match cli.command {
        Commands::Sign {
            query,
            headers,
            secret,
            signed_headers,
            json,
        } => {
            let signer = SignerConfig {
                secret_key: secret.unwrap_or(config.signer.secret_key.clone()),
                headers: signed_headers.unwrap_or(config.signer.headers.clone()),
                ..config.signer
            };

            let mut map = HeaderMap::new();
            for (name, value) in headers {
                map.append(name, value);
            }

            let payload = signing_payload(&query, &map, &signer.headers, &signer.secret_key);
            let signature = Signature::compute(&payload);

            if json {
                let output = json!({
                    "signature": signature.as_str(),
                    "signed_headers": signer.headers,
                    "payload_len": payload.len(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{signature}");
            }
        }
        Commands::Config => {
            let mut redacted = config.clone();
            redacted.signer = config.signer.redacted();
            println!("{}", serde_json::to_string_pretty(&redacted)?);
        }
    }

    Ok(())
}
