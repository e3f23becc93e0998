//! Engine configuration.

pub mod model;

pub use model::{EngineConfig, ExtractOptions, FormatOptions, Limits};
