// CLI module for calorie-advisor
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// calorie-advisor - upload a food photo, get a calorie and nutrition breakdown
#[derive(Parser, Debug)]
#[command(name = "calorie-advisor", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.calorie-advisor/config.toml if present)
    #[arg(short, long, env = "CALORIE_ADVISOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind, overrides server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overrides server.port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
