// ABOUTME: Server binary for the Clubhouse administration API
// ABOUTME: Loads configuration from the environment, applies CLI overrides, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! # Clubhouse Server Binary
//!
//! Configuration comes from environment variables; the flags below override
//! individual values for local runs.

use anyhow::Result;
use clap::Parser;
use clubhouse_server::{
    config::{DatabaseUrl, ServerConfig},
    logging, server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "clubhouse-server")]
#[command(about = "Clubhouse - role-based administration API for sports clubs")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,

    /// Override database URL (`sqlite:<path>` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

impl Args {
    fn apply(self, config: &mut ServerConfig) -> Result<()> {
        if let Some(http_port) = self.http_port {
            config.http_port = http_port;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(url) = self.database_url {
            config.database.url = DatabaseUrl::parse_url(&url)?;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    args.apply(&mut config)?;

    info!("Starting Clubhouse server");

    if let Err(e) = server::run(config).await {
        error!(error = %e, "Server error");
        return Err(e);
    }

    Ok(())
}
