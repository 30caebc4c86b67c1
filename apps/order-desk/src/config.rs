//! Runtime settings.

use serde::{Deserialize, Serialize};

/// Order desk settings.
///
/// Deserializable from a config file, with environment variables taking
/// precedence via [`Settings::from_env`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path of the store file.
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// Provision the schema and seed the book catalog on open.
    #[serde(default = "default_seed_on_open")]
    pub seed_on_open: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            seed_on_open: default_seed_on_open(),
        }
    }
}

impl Settings {
    /// Build settings from the environment.
    ///
    /// - `MADANG_DB`: store file path (default `./madang.db`)
    /// - `MADANG_SEED`: set to `false` to skip schema/seed on open
    #[must_use]
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(path) = std::env::var("MADANG_DB") {
            if !path.trim().is_empty() {
                settings.db_path = path;
            }
        }
        if let Ok(seed) = std::env::var("MADANG_SEED") {
            settings.seed_on_open = seed != "false";
        }
        settings
    }
}

fn default_db_path() -> String {
    "./madang.db".to_string()
}

const fn default_seed_on_open() -> bool {
    true
}
