//! Configuration loaded from an optional JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::reading::ReadingConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Number of threads handling requests.
    pub workers: usize,
    /// Request bodies larger than this are rejected.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 4,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to a compiled vibrato dictionary.
    pub dictionary: Option<PathBuf>,
    pub reading: ReadingConfig,
    /// Fold half-width katakana in the input before analysis.
    pub fold_halfwidth: bool,
    pub server: ServerConfig,
}

impl Config {
    /// Loads the configuration at `path`.
    ///
    /// Missing keys take their default values. A relative dictionary path is
    /// resolved against the directory containing the file.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let buffer = crate::load_file(path)?;
        let mut config: Config = serde_json::from_str(&buffer)?;
        if let (Some(dictionary), Some(parent)) = (config.dictionary.as_mut(), path.parent()) {
            if dictionary.is_relative() {
                *dictionary = parent.join(&*dictionary);
            }
        }
        Ok(config)
    }
}
