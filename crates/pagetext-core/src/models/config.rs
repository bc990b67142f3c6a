//! Configuration structures for extraction and serving.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PagetextError, Result};
use crate::pdf::TextEngine;
use crate::text::DEFAULT_RANGE_SPAN;

/// Main configuration for pagetext.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagetextConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Output configuration.
    pub output: OutputConfig,

    /// Web server configuration.
    pub server: ServerConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Library used to recover page text.
    pub engine: TextEngine,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pages selected by default for range extraction.
    pub default_range_span: u32,

    /// Directory for written text files (None = current directory).
    pub output_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_range_span: DEFAULT_RANGE_SPAN,
            output_dir: None,
        }
    }
}

/// Web server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind: String,

    /// Port to listen on.
    pub port: u16,

    /// Largest accepted upload in megabytes.
    pub max_upload_mb: usize,

    /// Uploaded documents kept in memory before the oldest is evicted.
    pub max_documents: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8501,
            max_upload_mb: 200,
            max_documents: 16,
        }
    }
}

impl PagetextConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| PagetextError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PagetextError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `<config dir>/pagetext/config.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pagetext")
            .join("config.json")
    }

    /// Load an explicit file, else the default file if present, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let default_path = Self::default_path();
        if default_path.exists() {
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }
}
