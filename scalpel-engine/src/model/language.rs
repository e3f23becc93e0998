//! Supported language tags.
//!
//! The engine ships with an indent-based family (Python) and a brace-based
//! family (TypeScript, covering the `.tsx`/`.js`/`.jsx` dialects). New
//! languages register a service, a formatter variant, a descriptor table,
//! extractors and a post-processor; see `languages/mod.rs`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageKind {
    Python,
    TypeScript,
}

impl LanguageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageKind::Python => "python",
            LanguageKind::TypeScript => "typescript",
        }
    }

    /// Map a file extension (without the dot) to a language.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "py" => Some(LanguageKind::Python),
            "ts" | "tsx" | "js" | "jsx" => Some(LanguageKind::TypeScript),
            _ => None,
        }
    }
}

impl fmt::Display for LanguageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" => Ok(LanguageKind::Python),
            // JavaScript is served by the TypeScript service.
            "typescript" | "javascript" => Ok(LanguageKind::TypeScript),
            _ => Err(()),
        }
    }
}
