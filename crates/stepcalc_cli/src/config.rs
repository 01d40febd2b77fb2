use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use stepcalc_engine::SolverOptions;
use tracing::warn;

pub const CONFIG_FILE: &str = "stepcalc.toml";

/// Front-end settings, read from `stepcalc.toml` in the working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub show_steps: bool,
    pub json: bool,
    pub solver: SolverOptions,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            show_steps: true,
            json: false,
            solver: SolverOptions::default(),
        }
    }
}

impl CliConfig {
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Missing file means defaults; a broken one is reported and ignored.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => warn!(path = %path.display(), "Error parsing config file: {e}. Using defaults."),
                },
                Err(e) => warn!(path = %path.display(), "Error reading config file: {e}. Using defaults."),
            }
        }
        Self::default()
    }
}
