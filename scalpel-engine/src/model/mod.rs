//! Data model shared across the engine.

pub mod descriptor;
pub mod element;
pub mod language;
pub mod raw;
pub mod span;
pub mod xpath;

pub use descriptor::ElementDescriptor;
pub use element::{CodeElement, ElementKind, ElementTree, IMPORTS_AGGREGATE_NAME};
pub use language::LanguageKind;
pub use raw::{RawBatches, RawDecorator, RawElement, RawParameter, RawReturnInfo};
pub use span::Span;
pub use xpath::{XPathNode, element_info, parse_xpath};
