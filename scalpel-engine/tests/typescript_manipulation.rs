//! TypeScript manipulation behavior: upsert/remove laws and placement.

use pretty_assertions::assert_eq;
use scalpel_engine::model::language::LanguageKind;

const LANG: Option<LanguageKind> = Some(LanguageKind::TypeScript);

fn upsert(code: &str, xpath: &str, new_code: &str) -> String {
    scalpel_engine::upsert_element_by_xpath(code, xpath, new_code, LANG).expect("upsert")
}

fn remove(code: &str, xpath: &str) -> String {
    scalpel_engine::remove_element_by_xpath(code, xpath, LANG).expect("remove")
}

#[test]
fn upsert_method_replaces_only_the_target() {
    let code = "\
export class K {
  m() {
    return 1;
  }

  other() {
    return 3;
  }
}
";
    let out = upsert(code, "K.m", "m() {\n  return 2;\n}");
    let expected = "\
export class K {
  m() {
    return 2;
  }

  other() {
    return 3;
  }
}
";
    assert_eq!(out, expected);
}

#[test]
fn upsert_with_extracted_content_is_a_no_op() {
    let code = "\
export class K {
  m() {
    return 1;
  }
}
";
    let content = scalpel_engine::get_text_by_xpath(code, "K.m", LANG)
        .unwrap()
        .expect("content");
    assert_eq!(upsert(code, "K.m", &content), code);
}

#[test]
fn missing_method_is_added_before_the_closing_brace() {
    let code = "\
class K {
  a() {
    return 1;
  }
}
";
    let out = upsert(code, "K.b", "b() {\n  return 2;\n}");
    let expected = "\
class K {
  a() {
    return 1;
  }

  b() {
    return 2;
  }
}
";
    assert_eq!(out, expected);
}

#[test]
fn empty_single_line_class_is_expanded() {
    let code = "export class E {}\n";
    let out = upsert(code, "E.m", "m() {\n  return 0;\n}");
    let expected = "\
export class E {
  m() {
    return 0;
  }
}
";
    assert_eq!(out, expected);
}

#[test]
fn import_is_added_at_the_top() {
    let code = "\
export const x = 1;
";
    let out = upsert(code, "imports", "import { y } from './y';");
    let expected = "\
import { y } from './y';

export const x = 1;
";
    assert_eq!(out, expected);
}

#[test]
fn import_is_appended_to_an_existing_block() {
    let code = "\
import { a } from './a';

export const x = 1;
";
    // The snippet's shape selects the import manipulator; a name that
    // matches no existing statement degrades the upsert into an append.
    let out = upsert(code, "b", "import { b } from './b';");
    let expected = "\
import { a } from './a';
import { b } from './b';

export const x = 1;
";
    assert_eq!(out, expected);
}

#[test]
fn remove_method_with_decorator_sweeps_it() {
    let code = "\
class Widget {
  @HostListener('click')
  onClick() {
    return 1;
  }

  keep() {
    return 2;
  }
}
";
    let out = remove(code, "Widget.onClick");
    let expected = "\
class Widget {

  keep() {
    return 2;
  }
}
";
    assert_eq!(out, expected);
}

#[test]
fn upsert_is_idempotent() {
    let code = "\
class K {
  m() {
    return 1;
  }
}
";
    let once = upsert(code, "K.m", "m() {\n  return 2;\n}");
    let twice = upsert(&once, "K.m", "m() {\n  return 2;\n}");
    assert_eq!(once, twice);
}

#[test]
fn insert_then_remove_round_trips() {
    let code = "\
function a() {
  return 1;
}
";
    let inserted = upsert(code, "b", "function b() {\n  return 2;\n}");
    assert_ne!(inserted, code);
    assert_eq!(remove(&inserted, "b"), code);
}

#[test]
fn interface_member_upsert_lands_in_the_interface() {
    let code = "\
interface Shape {
  area(): number;
}
";
    let out = upsert(code, "Shape.name", "name: string;");
    let expected = "\
interface Shape {
  area(): number;

  name: string;
}
";
    assert_eq!(out, expected);
}

#[test]
fn type_alias_upsert_replaces_in_place() {
    let code = "\
export type Pair = [number, number];

export const x = 1;
";
    let out = upsert(code, "Pair", "export type Pair = [string, string];");
    let expected = "\
export type Pair = [string, string];

export const x = 1;
";
    assert_eq!(out, expected);
}
