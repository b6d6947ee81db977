use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::{AppConfig, Environment};

#[derive(Debug, Parser)]
#[command(name = "marketplace-api")]
#[command(about = "Marketplace backend API server")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Port to listen on (overrides MARKET_API_PORT and PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Dotenv file to load instead of .env.<environment>")]
    pub env_file: Option<PathBuf>,
}

impl Cli {
    /// Load the dotenv file for this run. Variables already set in the
    /// process environment win.
    pub fn load_env_file(&self) {
        match &self.env_file {
            Some(path) => load(path),
            None => {
                let environment = Environment::detect(&|name: &str| std::env::var(name).ok());
                load(Path::new(environment.env_file()));
            }
        }
    }

    /// Apply command line overrides on top of environment configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

fn load(path: &Path) {
    match dotenvy::from_path(path) {
        Ok(()) => tracing::info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => tracing::debug!("No env file at {}", path.display()),
        Err(e) => tracing::warn!("Failed to load {}: {}", path.display(), e),
    }
}
