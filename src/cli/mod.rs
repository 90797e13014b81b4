use clap::Parser;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "jobs-api-rust")]
#[command(about = "Job application tracking API server")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Address to bind (overrides HOST)")]
    pub host: Option<String>,

    #[arg(long, help = "Use the in-memory store even if DATABASE_URL is set")]
    pub memory: bool,

    #[arg(long, help = "Apply the database schema and exit")]
    pub migrate_only: bool,
}

impl Cli {
    /// Folds command-line overrides into the environment-derived config
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if self.memory {
            config.database.url = None;
        }
    }
}
