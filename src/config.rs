use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct BrainConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub notes_file: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// `auto`, `openai` or `local`.
    pub provider: String,
    pub model: String,
    pub api_base: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    pub default_limit: usize,
    pub ask_limit: usize,
    pub context_limit: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_brain_dir().to_string_lossy().into_owned(),
            notes_file: "notes.json".into(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "auto".into(),
            model: "text-embedding-3-small".into(),
            api_base: "https://api.openai.com/v1".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            timeout_secs: 30,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_limit: 5,
            ask_limit: 5,
            context_limit: 5,
        }
    }
}

/// Returns `~/.brain/`
pub fn default_brain_dir() -> PathBuf {
    home_dir().join(".brain")
}

/// Returns the default config file path: `~/.brain/config.toml`
pub fn default_config_path() -> PathBuf {
    default_brain_dir().join("config.toml")
}

impl BrainConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            BrainConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (BRAIN_DIR, BRAIN_LOG_LEVEL,
    /// BRAIN_EMBEDDING_PROVIDER).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("BRAIN_DIR") {
            self.storage.data_dir = val;
        }
        if let Ok(val) = std::env::var("BRAIN_LOG_LEVEL") {
            self.logging.log_level = val;
        }
        if let Ok(val) = std::env::var("BRAIN_EMBEDDING_PROVIDER") {
            self.embedding.provider = val;
        }
    }

    /// Resolve the data directory, expanding `~` if needed.
    pub fn resolved_data_dir(&self) -> PathBuf {
        expand_tilde(&self.storage.data_dir)
    }

    /// Full path of the notes file.
    pub fn notes_path(&self) -> PathBuf {
        self.resolved_data_dir().join(&self.storage.notes_file)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else {
        PathBuf::from(path)
    }
}

// Without a home directory, fall back to the working directory.
fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
