//! Cross-language public API behavior: detection, hashing, xpath laws.

use pretty_assertions::assert_eq;
use scalpel_engine::model::language::LanguageKind;

#[test]
fn detects_python_and_typescript() {
    let python = "import os\n\nclass A:\n    def run(self):\n        return 1\n";
    assert_eq!(
        scalpel_engine::detect_language(python),
        Some(LanguageKind::Python)
    );

    let typescript = "import { x } from './x';\n\nexport class K {\n  m(): number { return 1; }\n}\n";
    assert_eq!(
        scalpel_engine::detect_language(typescript),
        Some(LanguageKind::TypeScript)
    );

    assert_eq!(scalpel_engine::detect_language(""), None);
}

#[test]
fn file_extensions_map_to_languages() {
    use std::path::Path;
    assert_eq!(
        scalpel_engine::language_for_file(Path::new("a/b/service.py")).unwrap(),
        LanguageKind::Python
    );
    assert_eq!(
        scalpel_engine::language_for_file(Path::new("web/app.tsx")).unwrap(),
        LanguageKind::TypeScript
    );
    assert_eq!(
        scalpel_engine::language_for_file(Path::new("page.js")).unwrap(),
        LanguageKind::TypeScript
    );
    assert!(scalpel_engine::language_for_file(Path::new("readme.md")).is_err());
}

#[test]
fn find_by_xpath_agrees_with_extracted_ranges() {
    let code = "\
import os


class Service:
    def start(self):
        return True


def main():
    return Service()
";
    let tree = scalpel_engine::extract(code, Some(LanguageKind::Python)).unwrap();
    for element in &tree.elements {
        let xpath = element.xpath();
        let found = scalpel_engine::find_by_xpath(code, &xpath, Some(LanguageKind::Python))
            .unwrap()
            .unwrap_or_else(|| panic!("no match for {xpath}"));
        assert_eq!(found, element.range.line_range(), "xpath {xpath}");
    }
}

#[test]
fn element_hash_is_stable_and_content_sensitive() {
    let code = "def f():\n    return 1\n";
    let h1 = scalpel_engine::get_element_hash(code, "f", Some(LanguageKind::Python))
        .unwrap()
        .expect("hash");
    let h2 = scalpel_engine::get_element_hash(code, "f", Some(LanguageKind::Python))
        .unwrap()
        .expect("hash");
    assert_eq!(h1, h2);

    let edited = scalpel_engine::upsert_element_by_xpath(
        code,
        "f",
        "def f():\n    return 2",
        Some(LanguageKind::Python),
    )
    .unwrap();
    let h3 = scalpel_engine::get_element_hash(&edited, "f", Some(LanguageKind::Python))
        .unwrap()
        .expect("hash");
    assert_ne!(h1, h3);
}

#[test]
fn text_by_xpath_returns_the_content_slice() {
    let code = "\
class C:
    def m(self):
        return 1
";
    let text = scalpel_engine::get_text_by_xpath(code, "C.m", Some(LanguageKind::Python))
        .unwrap()
        .expect("text");
    assert_eq!(text, "def m(self):\n        return 1");
}

#[test]
fn unknown_xpath_is_not_found_everywhere() {
    let code = "def f():\n    return 1\n";
    assert_eq!(
        scalpel_engine::find_by_xpath(code, "ghost", Some(LanguageKind::Python)).unwrap(),
        None
    );
    assert_eq!(
        scalpel_engine::get_text_by_xpath(code, "ghost", Some(LanguageKind::Python)).unwrap(),
        None
    );
    assert_eq!(
        scalpel_engine::get_element_hash(code, "ghost", Some(LanguageKind::Python)).unwrap(),
        None
    );
}

#[test]
fn serialized_trees_round_trip_through_json() {
    let code = "\
import os


class A:
    X = 1

    def m(self):
        return self.X
";
    let tree = scalpel_engine::extract(code, Some(LanguageKind::Python)).unwrap();
    let json = serde_json::to_string(&tree).unwrap();
    let back: scalpel_engine::ElementTree = serde_json::from_str(&json).unwrap();
    assert_eq!(back.elements.len(), tree.elements.len());
    assert_eq!(back.language, tree.language);
}

#[test]
fn supported_languages_are_stable() {
    let langs = scalpel_engine::supported_languages();
    assert_eq!(langs, vec![LanguageKind::Python, LanguageKind::TypeScript]);
}
