use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "airspeeds")]
#[command(about = "✈️ Drill V-speeds in the terminal. One wrong answer and you start over.")]
#[command(version)]
pub struct Cli {
    /// Seed for the shuffle and the fireworks (random if not given)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write logs; the terminal itself belongs to the quiz
    #[arg(long, default_value = "airspeeds.log")]
    pub log_file: PathBuf,

    /// Log filter, e.g. "info" or "airspeeds=debug". RUST_LOG wins if set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: Option<u64>,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_file: PathBuf::from("airspeeds.log"),
            log_level: "info".to_string(),
        }
    }
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        Self {
            seed: cli.seed,
            log_file: cli.log_file,
            log_level: cli.log_level,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.log_file.as_os_str().is_empty() {
            return Err("log_file must not be empty".to_string());
        }
        if self.log_file.is_dir() {
            return Err(format!("log_file {} is a directory", self.log_file.display()));
        }
        if EnvFilter::try_new(&self.log_level).is_err() {
            return Err(format!("log_level '{}' is not a valid filter", self.log_level));
        }
        Ok(())
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Install the global tracing subscriber, writing to `log_file`.
    pub fn init_tracing(&self) -> Result<()> {
        let file = File::create(&self.log_file)
            .with_context(|| format!("creating log file {}", self.log_file.display()))?;
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.log_level))
            .map_err(|e| anyhow!("bad log filter: {}", e))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init()
            .map_err(|e| anyhow!("installing tracing subscriber: {}", e))
    }
}
