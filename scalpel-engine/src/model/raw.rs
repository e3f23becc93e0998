//! Raw extractor records.
//!
//! These bridge the per-type extractors to the language post-processor:
//! a flat, language-neutral shape that still remembers where the bare
//! definition starts (as opposed to the outer wrapper range) and which
//! container owns it. They never leave the engine.

use crate::model::element::ElementKind;
use crate::model::span::Span;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDecorator {
    /// Best-effort name: identifier (`foo`), attribute (`a.b`) or call
    /// (`foo`) form; raw text when the shape is unexpected.
    pub name: String,
    pub content: String,
    pub range: Span,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawParameter {
    pub name: String,
    #[serde(default)]
    pub value_type: Option<String>,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawReturnInfo {
    #[serde(default)]
    pub return_type: Option<String>,
    /// Distinct returned expressions; empty/None/null returns coalesce
    /// into a single sentinel entry.
    #[serde(default)]
    pub return_values: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawElement {
    pub kind: ElementKind,
    pub name: String,
    /// Content of the *range node*: includes export wrappers and attached
    /// decorators.
    pub content: String,
    pub range: Span,
    /// Container name for members; qualified with dots when nested.
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub decorators: Vec<RawDecorator>,
    #[serde(default)]
    pub parameters: Vec<RawParameter>,
    #[serde(default)]
    pub return_info: RawReturnInfo,
    /// Where the bare definition starts (`def`/`class`/... keyword line),
    /// which may be below the wrapper's start.
    pub definition_start_line: usize,
    pub definition_start_col: usize,
    #[serde(default)]
    pub value_type: Option<String>,
    #[serde(default)]
    pub additional_data: Map<String, Value>,
}

impl RawElement {
    pub fn new(kind: ElementKind, name: impl Into<String>, range: Span) -> Self {
        Self {
            kind,
            name: name.into(),
            content: String::new(),
            range,
            class_name: None,
            decorators: Vec::new(),
            parameters: Vec::new(),
            return_info: RawReturnInfo::default(),
            definition_start_line: range.start_line,
            definition_start_col: range.start_col,
            value_type: None,
            additional_data: Map::new(),
        }
    }
}

/// Per-kind raw lists produced by one extraction pass, consumed whole by
/// the post-processor.
#[derive(Debug, Default, Clone)]
pub struct RawBatches {
    pub imports: Vec<RawElement>,
    pub functions: Vec<RawElement>,
    pub classes: Vec<RawElement>,
    pub interfaces: Vec<RawElement>,
    /// Methods plus getter/setter candidates, still provisionally typed.
    pub members: Vec<RawElement>,
    pub properties: Vec<RawElement>,
    pub static_properties: Vec<RawElement>,
    pub decorators: Vec<RawElement>,
    pub enums: Vec<RawElement>,
    pub type_aliases: Vec<RawElement>,
    pub namespaces: Vec<RawElement>,
}

impl RawBatches {
    pub fn bucket_mut(&mut self, kind: ElementKind) -> Option<&mut Vec<RawElement>> {
        match kind {
            ElementKind::Import => Some(&mut self.imports),
            ElementKind::Function => Some(&mut self.functions),
            ElementKind::Class => Some(&mut self.classes),
            ElementKind::Interface => Some(&mut self.interfaces),
            ElementKind::Method | ElementKind::PropertyGetter | ElementKind::PropertySetter => {
                Some(&mut self.members)
            }
            ElementKind::Property => Some(&mut self.properties),
            ElementKind::StaticProperty => Some(&mut self.static_properties),
            ElementKind::Decorator => Some(&mut self.decorators),
            ElementKind::Enum => Some(&mut self.enums),
            ElementKind::TypeAlias => Some(&mut self.type_aliases),
            ElementKind::Namespace => Some(&mut self.namespaces),
            _ => None,
        }
    }

    /// All records in one stream, for kind-agnostic searches.
    pub fn iter_all(&self) -> impl Iterator<Item = &RawElement> {
        self.imports
            .iter()
            .chain(self.functions.iter())
            .chain(self.classes.iter())
            .chain(self.interfaces.iter())
            .chain(self.members.iter())
            .chain(self.properties.iter())
            .chain(self.static_properties.iter())
            .chain(self.decorators.iter())
            .chain(self.enums.iter())
            .chain(self.type_aliases.iter())
            .chain(self.namespaces.iter())
    }
}
