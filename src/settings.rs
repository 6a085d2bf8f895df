//! Host-side settings for logging.
//!
//! The library itself reads nothing from the environment; an application that
//! wants log output loads a [`Settings`] file and installs a subscriber.

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::error::{NullError, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// An `EnvFilter` directive such as `info` or `sqlnull=debug`.
    pub log_filter: String,
    /// Include the event target in formatted output.
    pub log_target: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { log_filter: "info".to_string(), log_target: false }
    }
}

impl Settings {
    /// Reads settings from `path` (format by extension); a missing file yields defaults.
    pub fn load(path: &str) -> Result<Settings> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }
    /// Installs a global fmt subscriber. Fails if one is already installed.
    pub fn init_tracing(&self) -> Result<()> {
        let filter = EnvFilter::try_new(&self.log_filter)
            .map_err(|e| NullError::Config(format!("invalid log filter '{}': {e}", self.log_filter)))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(self.log_target)
            .try_init()
            .map_err(|e| NullError::Config(e.to_string()))
    }
}
