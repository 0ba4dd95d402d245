use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use dfa_sim_macros::config;
use serde::de::DeserializeOwned;

use crate::logger::LogLevel;

/// Loading for structs declared with [`config!`]. The file is deserialized
/// into the `Partial` twin and missing settings fall back to their defaults.
pub trait ConfigFile: Sized + Default {
    type Partial: DeserializeOwned;
    const NAME: &'static str;

    fn from_partial(partial: Self::Partial) -> Self;

    fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let partial = toml::from_str(content).with_context(|| format!("invalid {}", Self::NAME))?;
        Ok(Self::from_partial(partial))
    }

    fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let path = fs::canonicalize(path)
            .with_context(|| format!("failed to canonicalize: {}", path.display()))?;
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read: {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("failed to parse: {}", path.display()))
    }

    fn from_optional_file(path: Option<impl AsRef<Path>>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

pub trait GeneralConfig {
    fn logger(&self) -> &LoggerConfig;
}

config! {
    pub struct LoggerConfig {
        enabled: bool = true,
        log_file: bool = false,
        log_level: LogLevel = LogLevel::Info,
    }
}

config! {
    /// Settings of the HTTP server. Every field may be omitted from the TOML
    /// file, in which case the default shown here applies.
    pub struct ServerConfig {
        host: String = "127.0.0.1".to_string(),
        port: u16 = 8000,
        /// Directory holding `index.html`, `style.css`, `script.js` and the
        /// optional `assets/` and `examples/` folders.
        static_dir: PathBuf = PathBuf::from("."),
        /// Origins allowed by CORS. Empty means any origin.
        cors_origins: Vec<String> = vec![],
        #[nested]
        logger: LoggerConfig = LoggerConfig::default(),
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl GeneralConfig for ServerConfig {
    fn logger(&self) -> &LoggerConfig {
        &self.logger
    }
}
