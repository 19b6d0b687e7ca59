use std::fs::File;
use std::path::PathBuf;

use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod client;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod render;
pub mod timer;
mod utils;

use models::config::ScribeConfig;

const CONFIG_PATH_VAR: &str = "SCRIBE_CONFIG_PATH";

/// Pick the config file: an explicit path wins, then the environment, then
/// the user config dir if a file exists there.
pub fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .or_else(|| dotenvy::var(CONFIG_PATH_VAR).ok().map(PathBuf::from))
        .or_else(|| {
            dirs_next::config_dir()
                .map(|dir| dir.join("scribe").join("config.json"))
                .filter(|path| path.is_file())
        })
}

pub fn load_config(path: Option<PathBuf>) -> Result<ScribeConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            debug!("loading config from {}", path.display());
            let config_file = File::open(path)?;
            Ok(serde_json::from_reader(config_file)?)
        }
        None => {
            debug!("no config file found, using defaults");
            Ok(ScribeConfig::default())
        }
    }
}

/// Set up logging and load configuration.
pub fn init(config_path: Option<PathBuf>) -> Result<ScribeConfig, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    load_config(self::config_path(config_path))
}
