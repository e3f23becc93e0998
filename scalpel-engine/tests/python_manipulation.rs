//! Python manipulation behavior: upsert/remove laws and placement.

use pretty_assertions::assert_eq;
use scalpel_engine::model::language::LanguageKind;

const LANG: Option<LanguageKind> = Some(LanguageKind::Python);

fn upsert(code: &str, xpath: &str, new_code: &str) -> String {
    scalpel_engine::upsert_element_by_xpath(code, xpath, new_code, LANG).expect("upsert")
}

fn remove(code: &str, xpath: &str) -> String {
    scalpel_engine::remove_element_by_xpath(code, xpath, LANG).expect("remove")
}

#[test]
fn upsert_method_preserves_existing_decorator() {
    let code = "\
class C:
    @cached
    def m(self):
        return 1
";
    let out = upsert(code, "C.m", "def m(self):\n    return 2");
    let expected = "\
class C:
    @cached
    def m(self):
        return 2
";
    assert_eq!(out, expected);
}

#[test]
fn upsert_replaces_brought_decorators_instead_of_stacking() {
    let code = "\
class C:
    @cached
    def m(self):
        return 1
";
    let out = upsert(code, "C.m", "@lru_cache\ndef m(self):\n    return 2");
    let expected = "\
class C:
    @lru_cache
    def m(self):
        return 2
";
    assert_eq!(out, expected);
}

#[test]
fn upsert_with_extracted_content_is_a_no_op() {
    let code = "\
class C:
    def m(self):
        return 1
";
    let content = scalpel_engine::get_text_by_xpath(code, "C.m", LANG)
        .unwrap()
        .expect("content");
    assert_eq!(upsert(code, "C.m", &content), code);
}

#[test]
fn upsert_is_idempotent() {
    let code = "\
class C:
    def m(self):
        return 1
";
    let once = upsert(code, "C.m", "def m(self):\n    return 2");
    let twice = upsert(&once, "C.m", "def m(self):\n    return 2");
    assert_eq!(once, twice);
}

#[test]
fn insert_then_remove_round_trips() {
    let code = "\
def a():
    return 1
";
    let inserted = upsert(code, "b", "def b():\n    return 2");
    assert_ne!(inserted, code);
    assert_eq!(remove(&inserted, "b"), code);
}

#[test]
fn upsert_into_empty_class_replaces_the_placeholder() {
    let code = "\
class E:
    pass
";
    let out = upsert(code, "E.m", "def m(self):\n    return 0");
    let expected = "\
class E:
    def m(self):
        return 0
";
    assert_eq!(out, expected);
}

#[test]
fn new_member_is_separated_by_one_blank_line() {
    let code = "\
class C:
    def a(self):
        return 1
";
    let out = upsert(code, "C.b", "def b(self):\n    return 2");
    let expected = "\
class C:
    def a(self):
        return 1

    def b(self):
        return 2
";
    assert_eq!(out, expected);
}

#[test]
fn member_replacement_keeps_the_leading_blank_line() {
    let code = "\
class C:
    def a(self):
        return 1

    def b(self):
        return 2
";
    let out = upsert(code, "C.b", "def b(self):\n    return 3");
    let expected = "\
class C:
    def a(self):
        return 1

    def b(self):
        return 3
";
    assert_eq!(out, expected);
}

#[test]
fn upsert_on_empty_file_inserts_at_line_one() {
    let out = upsert("", "f", "def f():\n    return 1");
    assert_eq!(out, "def f():\n    return 1\n");
}

#[test]
fn imports_insert_below_the_module_docstring() {
    let code = "\
\"\"\"Module doc.\"\"\"

x = 1
";
    let out = upsert(code, "imports", "import os");
    let expected = "\
\"\"\"Module doc.\"\"\"

import os

x = 1
";
    assert_eq!(out, expected);
}

#[test]
fn imports_aggregate_can_be_replaced_wholesale() {
    let code = "\
import a
import b

x = 1
";
    let out = upsert(code, "imports", "import z");
    let expected = "\
import z

x = 1
";
    assert_eq!(out, expected);
}

#[test]
fn remove_method_takes_its_decorator_along() {
    let code = "\
class C:
    @cached
    def m(self):
        return 1

    def keep(self):
        return 2
";
    let out = remove(code, "C.m");
    // The separating blank line survives the removal.
    let expected = "\
class C:

    def keep(self):
        return 2
";
    assert_eq!(out, expected);
}

#[test]
fn sweep_does_not_cross_other_statements() {
    let code = "\
class C:
    x = 1
    def m(self):
        return 1
";
    let out = remove(code, "C.m");
    let expected = "\
class C:
    x = 1
";
    assert_eq!(out, expected);
}

#[test]
fn missing_target_without_parent_context_is_a_no_op() {
    let code = "x = 1\n";
    // A method cannot be added without its class existing.
    let out = upsert(code, "Ghost.m", "def m(self):\n    return 1");
    assert_eq!(out, code);
    assert_eq!(remove(code, "nothing_here"), code);
}

#[test]
fn malformed_xpath_leaves_source_unchanged() {
    let code = "def f():\n    return 1\n";
    assert_eq!(upsert(code, "bad xpath", "def g():\n    return 2"), code);
    assert_eq!(remove(code, "f["), code);
}

#[test]
fn top_level_function_appends_at_end_of_file() {
    let code = "\
import os


def a():
    return 1
";
    let out = upsert(code, "b", "def b():\n    return 2");
    let expected = "\
import os


def a():
    return 1

def b():
    return 2
";
    assert_eq!(out, expected);
}
