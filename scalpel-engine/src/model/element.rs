//! Unified code element model.
//!
//! `CodeElement` is the hierarchical, self-contained result of extraction:
//! it owns its strings and carries only line/column/byte integers — parse
//! tree nodes never outlive the extraction call that produced them.

use crate::model::span::Span;
use crate::model::xpath::XPathNode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Closed set of element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Import,
    Class,
    Interface,
    Function,
    Method,
    PropertyGetter,
    PropertySetter,
    Property,
    StaticProperty,
    Decorator,
    Enum,
    TypeAlias,
    Namespace,
    Parameter,
    ReturnValue,
    File,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Import => "import",
            ElementKind::Class => "class",
            ElementKind::Interface => "interface",
            ElementKind::Function => "function",
            ElementKind::Method => "method",
            ElementKind::PropertyGetter => "property_getter",
            ElementKind::PropertySetter => "property_setter",
            ElementKind::Property => "property",
            ElementKind::StaticProperty => "static_property",
            ElementKind::Decorator => "decorator",
            ElementKind::Enum => "enum",
            ElementKind::TypeAlias => "type_alias",
            ElementKind::Namespace => "namespace",
            ElementKind::Parameter => "parameter",
            ElementKind::ReturnValue => "return_value",
            ElementKind::File => "file",
        }
    }

    /// Tie-break order for `find_element` when several raw records match:
    /// setter > getter > static_property > method > property > class >
    /// function > import.
    pub fn specificity(&self) -> u8 {
        match self {
            ElementKind::PropertySetter => 8,
            ElementKind::PropertyGetter => 7,
            ElementKind::StaticProperty => 6,
            ElementKind::Method => 5,
            ElementKind::Property => 4,
            ElementKind::Class => 3,
            ElementKind::Function => 2,
            ElementKind::Import => 1,
            _ => 0,
        }
    }

    /// Kinds that live inside a class/interface container.
    pub fn is_member(&self) -> bool {
        matches!(
            self,
            ElementKind::Method
                | ElementKind::Property
                | ElementKind::PropertyGetter
                | ElementKind::PropertySetter
                | ElementKind::StaticProperty
        )
    }

    /// Kinds that can contain members.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ElementKind::Class | ElementKind::Interface | ElementKind::Namespace | ElementKind::Enum
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "import" => Ok(ElementKind::Import),
            "class" => Ok(ElementKind::Class),
            "interface" => Ok(ElementKind::Interface),
            "function" => Ok(ElementKind::Function),
            "method" => Ok(ElementKind::Method),
            "property_getter" => Ok(ElementKind::PropertyGetter),
            "property_setter" => Ok(ElementKind::PropertySetter),
            "property" => Ok(ElementKind::Property),
            "static_property" => Ok(ElementKind::StaticProperty),
            "decorator" => Ok(ElementKind::Decorator),
            "enum" => Ok(ElementKind::Enum),
            "type_alias" => Ok(ElementKind::TypeAlias),
            "namespace" => Ok(ElementKind::Namespace),
            "parameter" => Ok(ElementKind::Parameter),
            "return_value" => Ok(ElementKind::ReturnValue),
            "file" => Ok(ElementKind::File),
            _ => Err(()),
        }
    }
}

/// Reserved name of the synthetic import aggregate.
pub const IMPORTS_AGGREGATE_NAME: &str = "imports";

/// A single extracted element; children are ordered by source position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeElement {
    pub kind: ElementKind,

    /// Name as it appears in source; `imports` for the aggregate.
    pub name: String,

    /// Verbatim source slice corresponding to `range`.
    pub content: String,

    pub range: Span,

    /// Qualified parent path for members (`Outer.Inner` for nesting),
    /// `None` for top-level elements.
    #[serde(default)]
    pub parent_name: Option<String>,

    /// Declared or aliased type, where the language provides one.
    #[serde(default)]
    pub value_type: Option<String>,

    /// Open-ended extras: decorator summaries, parameter defaults,
    /// `is_static`, `individual_imports`, ...
    #[serde(default)]
    pub additional_data: Map<String, Value>,

    #[serde(default)]
    pub children: Vec<CodeElement>,
}

impl CodeElement {
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            content: String::new(),
            range: Span::default(),
            parent_name: None,
            value_type: None,
            additional_data: Map::new(),
            children: Vec::new(),
        }
    }

    /// Dotted address of this element (`parent.name` for members).
    pub fn xpath(&self) -> String {
        match &self.parent_name {
            Some(p) if !p.is_empty() => format!("{}.{}", p, self.name),
            _ => self.name.clone(),
        }
    }

    /// Sort children by start position, recursively.
    pub fn sort_children(&mut self) {
        self.children
            .sort_by_key(|c| (c.range.start_line, c.range.start_col));
        for child in &mut self.children {
            child.sort_children();
        }
    }
}

/// Extraction result: the element forest of one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementTree {
    pub language: crate::model::language::LanguageKind,
    pub elements: Vec<CodeElement>,
}

impl ElementTree {
    /// Resolve a parsed XPath against this tree.
    ///
    /// The first segment matches a top-level element, each following
    /// segment a child of the previous match. A segment without an
    /// explicit kind matches any; the bare kind `property` also accepts
    /// getters, setters and static properties, preferring the most
    /// specific candidate.
    pub fn resolve(&self, path: &[XPathNode]) -> Option<&CodeElement> {
        let (first, rest) = path.split_first()?;
        let mut current = pick_match(self.elements.iter(), first)?;
        for segment in rest {
            current = pick_match(current.children.iter(), segment)?;
        }
        Some(current)
    }
}

fn segment_accepts(candidate: &CodeElement, segment: &XPathNode) -> bool {
    if candidate.name != segment.name {
        return false;
    }
    match segment.kind {
        None => true,
        Some(ElementKind::Property) => matches!(
            candidate.kind,
            ElementKind::Property
                | ElementKind::PropertyGetter
                | ElementKind::PropertySetter
                | ElementKind::StaticProperty
        ),
        Some(kind) => candidate.kind == kind,
    }
}

fn pick_match<'a>(
    candidates: impl Iterator<Item = &'a CodeElement>,
    segment: &XPathNode,
) -> Option<&'a CodeElement> {
    candidates
        .filter(|c| segment_accepts(c, segment))
        .max_by_key(|c| c.kind.specificity())
}
