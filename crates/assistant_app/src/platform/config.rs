//! Backend selection and app settings.
//!
//! Precedence, lowest first: built-in defaults, `assistant.ron` in the working
//! directory, `ASSISTANT_ENV`, `ASSISTANT_BASE_URL`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use assistant_engine::{ClientSettings, RequestError};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "assistant.ron";
pub const PRODUCTION_URL: &str = "https://course-tools-demo.onrender.com/";
pub const DEVELOPMENT_URL: &str = "http://127.0.0.1:8000/";
pub const ENV_MODE: &str = "ASSISTANT_ENV";
pub const ENV_BASE_URL: &str = "ASSISTANT_BASE_URL";
const DEFAULT_LOG_FILE: &str = "./assistant.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// Release builds talk to production unless told otherwise.
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(Environment::Production),
            "development" | "dev" => Some(Environment::Development),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Contents of `assistant.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub production_url: String,
    pub development_url: String,
    pub log_file: PathBuf,
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            production_url: PRODUCTION_URL.to_string(),
            development_url: DEVELOPMENT_URL.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            connect_timeout_ms: None,
            request_timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub environment: Environment,
    pub base_url: String,
    pub log_file: PathBuf,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    /// Problems found while loading; logged once logging is up.
    pub warnings: Vec<String>,
}

impl AppConfig {
    pub fn load(dir: &Path) -> Self {
        let (file, warning) = match load_file_config(dir) {
            Ok(Some(file)) => (file, None),
            Ok(None) => (FileConfig::default(), None),
            Err(err) => (FileConfig::default(), Some(err.to_string())),
        };
        let mut config = Self::resolve(file, |key| std::env::var(key).ok());
        config.warnings.extend(warning);
        config
    }

    pub fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut warnings = Vec::new();

        let environment = match env(ENV_MODE) {
            Some(raw) => Environment::parse(&raw).unwrap_or_else(|| {
                warnings.push(format!("ignoring unknown {ENV_MODE}={raw:?}"));
                Environment::from_build()
            }),
            None => Environment::from_build(),
        };

        let base_url = match env(ENV_BASE_URL).filter(|url| !url.trim().is_empty()) {
            Some(url) => url,
            None => match environment {
                Environment::Production => file.production_url,
                Environment::Development => file.development_url,
            },
        };

        Self {
            environment,
            base_url,
            log_file: file.log_file,
            connect_timeout: file.connect_timeout_ms.map(Duration::from_millis),
            request_timeout: file.request_timeout_ms.map(Duration::from_millis),
            warnings,
        }
    }

    pub fn client_settings(&self) -> Result<ClientSettings, RequestError> {
        let mut settings = ClientSettings::new(&self.base_url)?;
        settings.connect_timeout = self.connect_timeout;
        settings.request_timeout = self.request_timeout;
        Ok(settings)
    }
}

/// Reads `assistant.ron` from `dir`. A missing file is not an error.
pub fn load_file_config(dir: &Path) -> Result<Option<FileConfig>, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path,
            message: err.to_string(),
        })
}
