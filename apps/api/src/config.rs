use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Which profile backend the service reads from.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Memory,
    File(PathBuf),
    Redis(String),
}

/// Application configuration loaded from environment variables.
/// Fails at startup if the selected backend is missing its settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreBackend,
    /// Profile used when a message does not name one.
    pub profile_key: String,
    /// Optional JSON synonym table replacing the built-in one.
    pub synonyms_file: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store = match get("PROFILE_STORE").as_deref().unwrap_or("memory") {
            "memory" => StoreBackend::Memory,
            "file" => StoreBackend::File(PathBuf::from(require(&get, "PROFILE_FILE")?)),
            "redis" => StoreBackend::Redis(require(&get, "REDIS_URL")?),
            other => bail!("PROFILE_STORE must be one of memory, file, redis (got '{other}')"),
        };

        Ok(Config {
            store,
            profile_key: get("PROFILE_KEY").unwrap_or_else(|| "profileData".to_string()),
            synonyms_file: get("SYNONYMS_FILE").map(PathBuf::from),
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    get(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
