//! Run configuration for Passvis.
//!
//! Everything the pipeline needs up front: where the trace lives, where
//! outputs go, and how the external renderer is invoked. Loadable from
//! a TOML file, with CLI flags taking precedence.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Scheduler trace to convert.
    pub trace_path: PathBuf,
    /// Directory receiving the per-phase dump, DOT, and image files.
    pub output_dir: PathBuf,
    /// Render executable, Graphviz-compatible.
    pub renderer: String,
    /// Image format passed to the renderer as `-T<format>`.
    pub image_format: String,
    /// Whether to invoke the renderer at all.
    pub render: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace_path: PathBuf::from("log.log"),
            output_dir: PathBuf::from("."),
            renderer: "dot".to_string(),
            image_format: "svg".to_string(),
            render: true,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}
