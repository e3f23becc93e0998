//! TypeScript extraction behavior: wrappers, accessors, containers.

use pretty_assertions::assert_eq;
use scalpel_engine::model::element::{CodeElement, ElementKind, IMPORTS_AGGREGATE_NAME};
use scalpel_engine::model::language::LanguageKind;

fn extract(code: &str) -> scalpel_engine::ElementTree {
    scalpel_engine::extract(code, Some(LanguageKind::TypeScript)).expect("extraction")
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
fn exported_class_range_includes_the_export_keyword() {
    let code = "\
export class K {
  m() {
    return 1;
  }
}
";
    let tree = extract(code);
    let class = top(&tree, ElementKind::Class, "K");
    assert_eq!(class.range.line_range(), (1, 5));
    assert!(class.content.starts_with("export class K"));

    let method = child(class, ElementKind::Method, "m");
    assert_eq!(method.range.line_range(), (2, 4));
    assert!(method.content.starts_with("m()"));
}

#[test]
fn imports_collapse_into_one_aggregate() {
    let code = "\
import { a } from './a';
import b from './b';

export const x = 1;
";
    let tree = extract(code);
    let aggregate = top(&tree, ElementKind::Import, IMPORTS_AGGREGATE_NAME);
    assert_eq!(aggregate.range.line_range(), (1, 2));
    let individual = aggregate
        .additional_data
        .get("individual_imports")
        .and_then(|v| v.as_array())
        .expect("individual_imports");
    assert_eq!(individual.len(), 2);
    assert_eq!(individual[0]["name"], "./a");
}

#[test]
fn accessor_keywords_classify_getters_and_setters() {
    let code = "\
class Point {
  get x(): number {
    return this._x;
  }

  set x(value: number) {
    this._x = value;
  }
}
";
    let tree = extract(code);
    let class = top(&tree, ElementKind::Class, "Point");

    let getter = child(class, ElementKind::PropertyGetter, "x");
    assert_eq!(getter.range.line_range(), (2, 4));

    let setter = child(class, ElementKind::PropertySetter, "x");
    assert_eq!(setter.range.line_range(), (6, 8));
    let params: Vec<_> = setter
        .children
        .iter()
        .filter(|c| c.kind == ElementKind::Parameter)
        .collect();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, "value");
    assert_eq!(params[0].value_type.as_deref(), Some("number"));
}

#[test]
fn interface_members_attach_to_their_interface() {
    let code = "\
export interface Shape {
  area(): number;
  name: string;
}
";
    let tree = extract(code);
    let interface = top(&tree, ElementKind::Interface, "Shape");
    assert!(interface.content.starts_with("export interface"));

    let method = child(interface, ElementKind::Method, "area");
    assert_eq!(method.parent_name.as_deref(), Some("Shape"));

    let property = child(interface, ElementKind::Property, "name");
    assert_eq!(property.value_type.as_deref(), Some("string"));
}

#[test]
fn fields_split_into_static_and_instance_properties() {
    let code = "\
class Config {
  static MAX = 10;
  count: number = 0;

  constructor() {
    this.label = 'none';
  }
}
";
    let tree = extract(code);
    let class = top(&tree, ElementKind::Class, "Config");

    let max = child(class, ElementKind::StaticProperty, "MAX");
    assert_eq!(max.additional_data.get("is_static").unwrap(), true);

    let count = child(class, ElementKind::Property, "count");
    assert_eq!(count.value_type.as_deref(), Some("number"));

    let label = child(class, ElementKind::Property, "label");
    assert_eq!(label.additional_data.get("value").unwrap(), "'none'");
}

#[test]
fn arrow_functions_are_functions_when_named() {
    let code = "\
export const double = (x: number): number => x * 2;

function plain(y: number) {
  return y;
}
";
    let tree = extract(code);
    let arrow = top(&tree, ElementKind::Function, "double");
    assert_eq!(
        arrow.additional_data.get("is_arrow_function").unwrap(),
        true
    );
    assert!(arrow.content.starts_with("export const double"));

    let plain = top(&tree, ElementKind::Function, "plain");
    assert_eq!(plain.range.line_range(), (3, 5));
}

#[test]
fn enums_type_aliases_and_namespaces_are_extracted() {
    let code = "\
export enum Color {
  Red,
  Green,
}

export type Pair = [number, number];

export namespace Util {
  export function id(x: number) {
    return x;
  }
}
";
    let tree = extract(code);

    let color = top(&tree, ElementKind::Enum, "Color");
    assert_eq!(color.range.line_range(), (1, 4));

    let pair = top(&tree, ElementKind::TypeAlias, "Pair");
    assert_eq!(pair.value_type.as_deref(), Some("[number, number]"));

    let util = top(&tree, ElementKind::Namespace, "Util");
    assert!(util.content.starts_with("export namespace Util"));
    let id = child(util, ElementKind::Function, "id");
    assert_eq!(id.parent_name.as_deref(), Some("Util"));
}

#[test]
fn decorated_class_members_carry_decorators() {
    let code = "\
class Widget {
  @Input()
  value: string;

  @HostListener('click')
  onClick() {
    return this.value;
  }
}
";
    let tree = extract(code);
    let class = top(&tree, ElementKind::Class, "Widget");

    let value = child(class, ElementKind::Property, "value");
    let input = child(value, ElementKind::Decorator, "Input");
    assert!(input.content.starts_with("@Input"));

    let on_click = child(class, ElementKind::Method, "onClick");
    let listener = child(on_click, ElementKind::Decorator, "HostListener");
    assert_eq!(listener.range.line_range(), (5, 5));
}

#[test]
fn tsx_files_parse_with_the_tsx_grammar() {
    let code = "\
export function Banner() {
  return <div>hello</div>;
}
";
    let tree = scalpel_engine::extract_file(std::path::Path::new("banner.tsx"), code)
        .expect("tsx extraction");
    let banner = top(&tree, ElementKind::Function, "Banner");
    assert_eq!(banner.range.line_range(), (1, 3));
}

#[test]
fn xpath_resolves_methods_through_classes() {
    let code = "\
function run() {
  return 0;
}

class Runner {
  run() {
    return 1;
  }
}
";
    let function = scalpel_engine::find_by_xpath(code, "run", Some(LanguageKind::TypeScript))
        .unwrap()
        .expect("top-level run");
    assert_eq!(function, (1, 3));
    let method = scalpel_engine::find_by_xpath(code, "Runner.run", Some(LanguageKind::TypeScript))
        .unwrap()
        .expect("Runner.run");
    assert_eq!(method, (6, 8));
}
