//! CLI for the restry REST client.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use restry_core::config;
use restry_core::request::Method;

use commands::{run_config, run_request, RequestArgs};

/// Top-level CLI for the restry REST client.
#[derive(Debug, Parser)]
#[command(name = "restry")]
#[command(about = "restry: ServiceStack REST client with automatic retry", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/restry/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Override the configured URL prefix.
    #[arg(long, global = true, value_name = "PREFIX")]
    pub prefix: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Send a GET request.
    Get {
        /// Request URL (joined onto the URL prefix).
        url: String,
        /// Extra header, "Name: value". Repeatable.
        #[arg(short = 'H', long = "header", value_name = "HEADER")]
        headers: Vec<String>,
    },

    /// Send a POST request with a JSON body.
    Post {
        url: String,
        /// JSON request body (defaults to null).
        #[arg(short, long, value_name = "JSON")]
        data: Option<String>,
        #[arg(short = 'H', long = "header", value_name = "HEADER")]
        headers: Vec<String>,
    },

    /// Send a PUT request with a JSON body.
    Put {
        url: String,
        #[arg(short, long, value_name = "JSON")]
        data: Option<String>,
        #[arg(short = 'H', long = "header", value_name = "HEADER")]
        headers: Vec<String>,
    },

    /// Send a DELETE request.
    Delete {
        url: String,
        #[arg(short = 'H', long = "header", value_name = "HEADER")]
        headers: Vec<String>,
    },

    /// Show the effective configuration and where it was loaded from.
    Config,
}

impl CliCommand {
    /// Returns `Ok(false)` when the request completed but did not succeed.
    pub async fn run_from_args() -> Result<bool> {
        let cli = Cli::parse();
        let (path, mut cfg) = match &cli.config {
            Some(p) => {
                let path = std::path::PathBuf::from(p);
                let cfg = config::load_from_path(&path)?;
                (path, cfg)
            }
            None => (config::config_path()?, config::load_or_init()?),
        };
        if let Some(prefix) = cli.prefix {
            cfg = cfg.with_url_prefix(prefix);
        }
        tracing::debug!("loaded config: {:?}", cfg);

        let ok = match cli.command {
            CliCommand::Get { url, headers } => {
                run_request(&cfg, RequestArgs::new(Method::Get, url, None, headers)).await?
            }
            CliCommand::Post { url, data, headers } => {
                run_request(&cfg, RequestArgs::new(Method::Post, url, data, headers)).await?
            }
            CliCommand::Put { url, data, headers } => {
                run_request(&cfg, RequestArgs::new(Method::Put, url, data, headers)).await?
            }
            CliCommand::Delete { url, headers } => {
                run_request(&cfg, RequestArgs::new(Method::Delete, url, None, headers)).await?
            }
            CliCommand::Config => {
                run_config(&path, &cfg)?;
                true
            }
        };

        Ok(ok)
    }
}
