use std::path::PathBuf;

use crate::common::{LOCAL_BASE_URL_DEFAULT, STATIC_DIR_DEFAULT};

/// Settings read from the environment at cold start.
#[derive(Debug, Clone)]
pub struct Config {
    pub trigger_url: Option<String>,
    pub local_base_url: String,
    pub webhook_secret: Option<String>,
    pub table_name: Option<String>,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trigger_url: None,
            local_base_url: LOCAL_BASE_URL_DEFAULT.into(),
            webhook_secret: None,
            table_name: None,
            static_dir: STATIC_DIR_DEFAULT.into(),
        }
    }
}

impl Config {
    /// Loads `.env` if there is one, then reads the process environment.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::info!("loaded .env file from {}", path.display());
        }

        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Builds the config from `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|val| !val.is_empty());

        Self {
            trigger_url: var("RELAY_TRIGGER_URL"),
            local_base_url: var("RELAY_LOCAL_BASE_URL").unwrap_or(LOCAL_BASE_URL_DEFAULT.into()),
            webhook_secret: var("RELAY_WEBHOOK_SECRET"),
            table_name: var("TABLE_NAME"),
            static_dir: var("STATIC_DIR")
                .unwrap_or(STATIC_DIR_DEFAULT.into())
                .into(),
        }
    }
}
