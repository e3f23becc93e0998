use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("could not detect language from code")]
    DetectionFailed,

    #[error("tree-sitter language error")]
    TreeSitterLanguage,

    #[error("tree-sitter parse error")]
    TreeSitterParse,

    #[error("serde json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
