//! Dotted addressing of code elements.
//!
//! Grammar: `Segment ('.' Segment)*` where `Segment = Name ('[' Kind ']')?`.
//! `Kind` must be one of the closed element kinds. Whitespace and quoting
//! are disallowed; any malformed input parses to `None` (a no-match), never
//! an error.

use crate::model::element::ElementKind;

/// One parsed segment: a name plus an optional explicit kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XPathNode {
    pub name: String,
    pub kind: Option<ElementKind>,
}

/// Parse a full XPath into segments; `None` on malformed input.
pub fn parse_xpath(xpath: &str) -> Option<Vec<XPathNode>> {
    if xpath.is_empty() || xpath.chars().any(char::is_whitespace) {
        return None;
    }
    let mut nodes = Vec::new();
    for segment in xpath.split('.') {
        nodes.push(parse_segment(segment)?);
    }
    Some(nodes)
}

/// Split an XPath into `(leaf_name, parent_path, leaf_kind)`.
///
/// The parent path keeps its own dotted shape but loses kind brackets:
/// `A[class].b` yields `("b", Some("A"), None)`.
pub fn element_info(xpath: &str) -> Option<(String, Option<String>, Option<ElementKind>)> {
    let nodes = parse_xpath(xpath)?;
    let (leaf, parents) = nodes.split_last()?;
    let parent_path = if parents.is_empty() {
        None
    } else {
        Some(
            parents
                .iter()
                .map(|n| n.name.as_str())
                .collect::<Vec<_>>()
                .join("."),
        )
    };
    Some((leaf.name.clone(), parent_path, leaf.kind))
}

fn parse_segment(segment: &str) -> Option<XPathNode> {
    let (name, kind) = match segment.find('[') {
        Some(open) => {
            if !segment.ends_with(']') {
                return None;
            }
            let name = &segment[..open];
            let kind_str = &segment[open + 1..segment.len() - 1];
            if kind_str.is_empty() {
                // `Name[]` means infer.
                (name, None)
            } else {
                (name, Some(kind_str.parse::<ElementKind>().ok()?))
            }
        }
        None => {
            if segment.contains(']') {
                return None;
            }
            (segment, None)
        }
    };
    if !is_valid_name(name) {
        return None;
    }
    Some(XPathNode {
        name: name.to_string(),
        kind,
    })
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_member_path() {
        let nodes = parse_xpath("MyClass.my_method").unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name, "MyClass");
        assert_eq!(nodes[1].name, "my_method");
        assert!(nodes[1].kind.is_none());
    }

    #[test]
    fn bracketed_kinds() {
        let nodes = parse_xpath("C[class].x[property_setter]").unwrap();
        assert_eq!(nodes[0].kind, Some(ElementKind::Class));
        assert_eq!(nodes[1].kind, Some(ElementKind::PropertySetter));
    }

    #[test]
    fn element_info_splits_leaf_and_parent() {
        let (name, parent, kind) = element_info("A[class].B.c[method]").unwrap();
        assert_eq!(name, "c");
        assert_eq!(parent.as_deref(), Some("A.B"));
        assert_eq!(kind, Some(ElementKind::Method));
    }

    #[test]
    fn malformed_inputs_are_no_match() {
        assert!(parse_xpath("").is_none());
        assert!(parse_xpath("a b").is_none());
        assert!(parse_xpath("a[").is_none());
        assert!(parse_xpath("a[nonsense]").is_none());
        assert!(parse_xpath("a]b").is_none());
        assert!(parse_xpath("1name").is_none());
        assert!(parse_xpath("a..b").is_none());
    }

    #[test]
    fn empty_brackets_mean_infer() {
        let nodes = parse_xpath("foo[]").unwrap();
        assert!(nodes[0].kind.is_none());
    }
}
