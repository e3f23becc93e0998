//! TypeScript post-processing: raw per-kind lists into the final tree.
//!
//! Same ordered responsibilities as the Python post-processor, with the
//! accessor-keyword classification instead of decorator markers, and more
//! container kinds (interfaces, enums, namespaces) that members and
//! nested declarations attach to.

use crate::config::EngineConfig;
use crate::engine::traits::PostProcessor;
use crate::languages::assembly;
use crate::model::element::{CodeElement, ElementKind};
use crate::model::raw::{RawBatches, RawElement};
use serde_json::Value;

pub struct TypeScriptPostProcessor;

impl TypeScriptPostProcessor {
    /// Finalize a provisional method kind from its accessor marker.
    fn classify_member(record: &RawElement) -> ElementKind {
        if record.kind != ElementKind::Method {
            return record.kind;
        }
        match record.additional_data.get("accessor") {
            Some(Value::String(s)) if s == "get" => ElementKind::PropertyGetter,
            Some(Value::String(s)) if s == "set" => ElementKind::PropertySetter,
            _ => ElementKind::Method,
        }
    }
}

impl PostProcessor for TypeScriptPostProcessor {
    fn assemble(&self, code: &str, raw: &RawBatches, config: &EngineConfig) -> Vec<CodeElement> {
        let mut out: Vec<CodeElement> = Vec::new();

        if let Some(imports) = assembly::aggregate_imports(code, &raw.imports) {
            out.push(imports);
        }

        // Containers first (namespaces can hold everything else), nested
        // ones attached by their dotted parent path, shallow first.
        let mut container_records: Vec<&RawElement> = raw
            .namespaces
            .iter()
            .chain(raw.classes.iter())
            .chain(raw.interfaces.iter())
            .chain(raw.enums.iter())
            .collect();
        container_records
            .sort_by_key(|c| c.class_name.as_deref().map(|p| p.len()).unwrap_or(0));
        let mut containers: Vec<CodeElement> = Vec::new();
        for record in container_records {
            let element = assembly::element_from_raw(record, config);
            if element.parent_name.is_some() {
                assembly::attach_member(&mut containers, element);
            } else {
                containers.push(element);
            }
        }

        // Functions and type aliases either live at top level or inside a
        // namespace.
        for record in raw.functions.iter().chain(raw.type_aliases.iter()) {
            let element = assembly::element_from_raw(record, config);
            if element.parent_name.is_some() {
                assembly::attach_member(&mut containers, element);
            } else {
                out.push(element);
            }
        }

        // Members: classify accessors, dedup by specificity, attach.
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
