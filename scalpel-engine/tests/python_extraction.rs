//! Python extraction behavior: classification, aggregation, hierarchy.

use pretty_assertions::assert_eq;
use scalpel_engine::model::element::{CodeElement, ElementKind, IMPORTS_AGGREGATE_NAME};
use scalpel_engine::model::language::LanguageKind;

fn extract(code: &str) -> scalpel_engine::ElementTree {
    scalpel_engine::extract(code, Some(LanguageKind::Python)).expect("extraction")
}

fn child<'a>(parent: &'a CodeElement, kind: ElementKind, name: &str) -> &'a CodeElement {
    parent
        .children
        .iter()
        .find(|c| c.kind == kind && c.name == name)
        .unwrap_or_else(|| panic!("no {kind} child named {name}"))
}

fn top<'a>(
    tree: &'a scalpel_engine::ElementTree,
    kind: ElementKind,
    name: &str,
) -> &'a CodeElement {
    tree.elements
        .iter()
        .find(|e| e.kind == kind && e.name == name)
        .unwrap_or_else(|| panic!("no top-level {kind} named {name}"))
}

#[test]
fn getter_and_setter_are_classified() {
    let code = "\
class C:
    @property
    def x(self): return self._x
    @x.setter
    def x(self, v): self._x = v
";
    let tree = extract(code);
    let class = top(&tree, ElementKind::Class, "C");

    let getter = child(class, ElementKind::PropertyGetter, "x");
    assert_eq!(getter.range.line_range(), (2, 3));
    assert_eq!(getter.parent_name.as_deref(), Some("C"));
    assert_eq!(
        getter
            .children
            .iter()
            .filter(|c| c.kind == ElementKind::Decorator)
            .count(),
        1
    );

    let setter = child(class, ElementKind::PropertySetter, "x");
    assert_eq!(setter.range.line_range(), (4, 5));
    let marker = child(setter, ElementKind::Decorator, "x.setter");
    assert!(marker.content.starts_with("@x.setter"));
}

#[test]
fn imports_collapse_into_one_aggregate() {
    let code = "import a\nimport b\nfrom c import d\n";
    let tree = extract(code);
    let imports: Vec<_> = tree
        .elements
        .iter()
        .filter(|e| e.kind == ElementKind::Import)
        .collect();
    assert_eq!(imports.len(), 1);
    let aggregate = imports[0];
    assert_eq!(aggregate.name, IMPORTS_AGGREGATE_NAME);
    assert_eq!(aggregate.range.line_range(), (1, 3));
    let individual = aggregate
        .additional_data
        .get("individual_imports")
        .and_then(|v| v.as_array())
        .expect("individual_imports");
    assert_eq!(individual.len(), 3);
    assert_eq!(individual[2]["name"], "c");
}

#[test]
fn no_imports_means_no_aggregate() {
    let tree = extract("x = 1\n");
    assert!(tree
        .elements
        .iter()
        .all(|e| e.kind != ElementKind::Import));
}

#[test]
fn xpath_distinguishes_function_from_method() {
    let code = "\
def foo():
    return 1


class Bar:
    def foo(self):
        return 2
";
    let range = scalpel_engine::find_by_xpath(code, "foo", Some(LanguageKind::Python))
        .unwrap()
        .expect("top-level foo");
    assert_eq!(range, (1, 2));
    let range = scalpel_engine::find_by_xpath(code, "Bar.foo", Some(LanguageKind::Python))
        .unwrap()
        .expect("Bar.foo");
    assert_eq!(range, (6, 7));
}

#[test]
fn explicit_kind_selects_among_same_named_members() {
    let code = "\
class C:
    @property
    def x(self): return self._x
    @x.setter
    def x(self, v): self._x = v
";
    let getter = scalpel_engine::find_by_xpath(code, "C.x[property_getter]", Some(LanguageKind::Python))
        .unwrap()
        .expect("getter");
    assert_eq!(getter, (2, 3));
    let setter = scalpel_engine::find_by_xpath(code, "C.x[property_setter]", Some(LanguageKind::Python))
        .unwrap()
        .expect("setter");
    assert_eq!(setter, (4, 5));
}

#[test]
fn static_and_instance_properties() {
    let code = "\
class Config:
    retries = 3
    timeout: float = 1.5
    _hidden = True

    def __init__(self):
        self.name = 'default'
        self._secret = None
";
    let tree = extract(code);
    let class = top(&tree, ElementKind::Class, "Config");

    let retries = child(class, ElementKind::StaticProperty, "retries");
    assert_eq!(retries.additional_data.get("value").unwrap(), "3");

    let timeout = child(class, ElementKind::StaticProperty, "timeout");
    assert_eq!(timeout.value_type.as_deref(), Some("float"));

    let name = child(class, ElementKind::Property, "name");
    assert_eq!(name.parent_name.as_deref(), Some("Config"));

    // Private names are skipped by default.
    assert!(!class.children.iter().any(|c| c.name == "_hidden"));
    assert!(!class.children.iter().any(|c| c.name == "_secret"));
}

#[test]
fn parameters_and_return_values_become_children() {
    let code = "\
def add(a: int, b: int = 0) -> int:
    return a + b
";
    let tree = extract(code);
    let function = top(&tree, ElementKind::Function, "add");

    let a = child(function, ElementKind::Parameter, "a");
    assert_eq!(a.value_type.as_deref(), Some("int"));

    let b = child(function, ElementKind::Parameter, "b");
    assert_eq!(b.additional_data.get("default").unwrap(), "0");
    assert_eq!(b.additional_data.get("optional").unwrap(), true);

    let ret = child(function, ElementKind::ReturnValue, "return");
    assert_eq!(ret.value_type.as_deref(), Some("int"));
    let values = ret
        .additional_data
        .get("return_values")
        .and_then(|v| v.as_array())
        .expect("return_values");
    assert_eq!(values[0], "a + b");
}

#[test]
fn methods_skip_the_receiver_parameter() {
    let code = "\
class C:
    def m(self, value):
        return value
";
    let tree = extract(code);
    let class = top(&tree, ElementKind::Class, "C");
    let method = child(class, ElementKind::Method, "m");
    let params: Vec<_> = method
        .children
        .iter()
        .filter(|c| c.kind == ElementKind::Parameter)
        .collect();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, "value");
}

#[test]
fn decorated_function_range_includes_decorator() {
    let code = "\
@cached
def f():
    return 1
";
    let tree = extract(code);
    let function = top(&tree, ElementKind::Function, "f");
    assert_eq!(function.range.line_range(), (1, 3));
    assert!(function.content.starts_with("@cached"));
    let decorator = child(function, ElementKind::Decorator, "cached");
    assert_eq!(decorator.range.line_range(), (1, 1));
}

#[test]
fn ranges_are_well_formed_and_contained() {
    let code = "\
import os
from typing import List


class Service:
    MAX = 10

    def __init__(self):
        self.items: List[str] = []

    @property
    def size(self):
        return len(self.items)


def helper(x):
    return x
";
    let tree = extract(code);
    assert!(!tree.elements.is_empty());
    for element in &tree.elements {
        assert!(element.range.is_well_formed(), "range of {}", element.name);
        let mut last_start = 0;
        for c in &element.children {
            assert!(
                element.range.contains_lines(&c.range),
                "{} not contained in {}",
                c.name,
                element.name
            );
            assert!(c.range.start_line >= last_start, "children sorted");
            last_start = c.range.start_line;
        }
    }
}

#[test]
fn empty_file_yields_empty_tree() {
    let tree = extract("");
    assert!(tree.elements.is_empty());
}

#[test]
fn nested_classes_attach_to_their_outer_class() {
    let code = "\
class Outer:
    class Inner:
        def m(self):
            return 1
";
    let tree = extract(code);
    let outer = top(&tree, ElementKind::Class, "Outer");
    assert!(outer.parent_name.is_none());
    let inner = child(outer, ElementKind::Class, "Inner");
    assert_eq!(inner.parent_name.as_deref(), Some("Outer"));
    let method = child(inner, ElementKind::Method, "m");
    assert_eq!(method.parent_name.as_deref(), Some("Outer.Inner"));
}
