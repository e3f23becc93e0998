//! Python post-processing: raw per-kind lists into the final tree.
//!
//! Ordered responsibilities: import aggregation, decorator-driven
//! getter/setter classification, member-to-container attachment,
//! specificity dedup, source-order sorting (the caller sorts).

use crate::config::EngineConfig;
use crate::engine::traits::PostProcessor;
use crate::languages::assembly;
use crate::model::element::{CodeElement, ElementKind};
use crate::model::raw::{RawBatches, RawElement};

pub struct PythonPostProcessor;

impl PythonPostProcessor {
    /// Finalize a provisional method kind from its decorator list.
    fn classify_member(record: &RawElement) -> ElementKind {
        if record.kind != ElementKind::Method {
            return record.kind;
        }
        for decorator in &record.decorators {
            if decorator.name == "property" {
                return ElementKind::PropertyGetter;
            }
            if decorator.name == format!("{}.setter", record.name) {
                return ElementKind::PropertySetter;
            }
        }
        ElementKind::Method
    }
}

impl PostProcessor for PythonPostProcessor {
    fn assemble(&self, code: &str, raw: &RawBatches, config: &EngineConfig) -> Vec<CodeElement> {
        let mut out: Vec<CodeElement> = Vec::new();

        if let Some(imports) = assembly::aggregate_imports(code, &raw.imports) {
            out.push(imports);
        }

        for function in &raw.functions {
            out.push(assembly::element_from_raw(function, config));
        }

        // Containers first: top-level classes, then nested classes
        // attached by their dotted parent path.
        let mut classes: Vec<&RawElement> = raw.classes.iter().collect();
        classes.sort_by_key(|c| c.class_name.as_deref().map(|p| p.len()).unwrap_or(0));
        let mut containers: Vec<CodeElement> = Vec::new();
        for class in classes {
            let element = assembly::element_from_raw(class, config);
            if element.parent_name.is_some() {
                assembly::attach_member(&mut containers, element);
            } else {
                containers.push(element);
            }
        }

        // Members: classify, dedup by specificity, attach.
        let mut members: Vec<RawElement> = raw
            .members
            .iter()
            .map(|m| {
                let mut record = m.clone();
                record.kind = Self::classify_member(&record);
                record
            })
            .collect();
        members.extend(raw.static_properties.iter().cloned());
        members.extend(raw.properties.iter().cloned());
        for record in assembly::dedup_by_specificity(members) {
            let element = assembly::element_from_raw(&record, config);
            assembly::attach_member(&mut containers, element);
        }

        out.extend(containers);
        out
    }
}
