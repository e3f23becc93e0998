//! Configuration data structures for the extraction/manipulation engine.
//!
//! Split into logical groups:
//! - [`EngineConfig`]: top-level container
//! - [`Limits`]: size limits
//! - [`ExtractOptions`]: options for extraction/enrichment
//! - [`FormatOptions`]: indentation units per language family
//!
//! All structs are `serde`-friendly so they can be loaded from JSON.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Top-level configuration for the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Size limits.
    pub limits: Limits,
    /// Extraction-specific settings.
    pub extract: ExtractOptions,
    /// Formatting settings.
    pub format: FormatOptions,
}

impl EngineConfig {
    /// Load configuration from environment variables or fall back to
    /// defaults.
    ///
    /// This method is intentionally tolerant: unknown variables are
    /// ignored and parsing errors fall back to defaults. After load, a
    /// basic validation is performed to ensure sane values.
    ///
    /// Supported ENV vars (all optional):
    /// - `SCALPEL_MAX_FILE_BYTES`          (usize)
    /// - `SCALPEL_EXTRACT_PRIVATE_MEMBERS` (bool: true/false/1/0)
    /// - `SCALPEL_EXTRACT_PARAMETERS`      (bool)
    /// - `SCALPEL_EXTRACT_RETURN_VALUES`   (bool)
    /// - `SCALPEL_INDENT_SIZE_PYTHON`      (usize)
    /// - `SCALPEL_INDENT_SIZE_TYPESCRIPT`  (usize)
    pub fn load_from_env_or_default() -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(v) = env_usize("SCALPEL_MAX_FILE_BYTES") {
            cfg.limits.max_file_bytes = v;
        }
        if let Some(v) = env_bool("SCALPEL_EXTRACT_PRIVATE_MEMBERS") {
            cfg.extract.include_private_members = v;
        }
        if let Some(v) = env_bool("SCALPEL_EXTRACT_PARAMETERS") {
            cfg.extract.extract_parameters = v;
        }
        if let Some(v) = env_bool("SCALPEL_EXTRACT_RETURN_VALUES") {
            cfg.extract.extract_return_values = v;
        }
        if let Some(v) = env_usize("SCALPEL_INDENT_SIZE_PYTHON") {
            cfg.format.python_indent = v;
        }
        if let Some(v) = env_usize("SCALPEL_INDENT_SIZE_TYPESCRIPT") {
            cfg.format.typescript_indent = v;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Basic config validation — ensures limits and options are consistent.
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_file_bytes == 0 {
            return Err(Error::InvalidState("max_file_bytes must be greater than 0"));
        }
        if self.format.python_indent == 0 || self.format.typescript_indent == 0 {
            return Err(Error::InvalidState("indent sizes must be greater than 0"));
        }
        Ok(())
    }
}

/// Limits for parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum source size to parse (bytes).
    pub max_file_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_bytes: 2 * 1024 * 1024, // 2 MB
        }
    }
}

/// Extraction configuration: controls how elements are enriched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Whether private/dunder members become property records.
    pub include_private_members: bool,
    /// Whether to emit `parameter` children for callables.
    pub extract_parameters: bool,
    /// Whether to emit `return_value` children for callables.
    pub extract_return_values: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            include_private_members: false,
            extract_parameters: true,
            extract_return_values: true,
        }
    }
}

/// Indentation units per language family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatOptions {
    pub python_indent: usize,
    pub typescript_indent: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            python_indent: 4,
            typescript_indent: 2,
        }
    }
}

/* ------------------------- ENV helpers ------------------------- */

fn env_bool(key: &str) -> Option<bool> {
    env::var(key).ok().and_then(|s| {
        let v = s.trim().to_ascii_lowercase();
        match v.as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        }
    })
}

fn env_usize(key: &str) -> Option<usize> {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
}
