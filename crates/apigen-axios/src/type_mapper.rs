use std::collections::BTreeSet;

use apigen_core::parse::reference::ref_name;
use apigen_core::parse::schema::{Schema, SchemaOrRef, SchemaType};

/// The unconstrained type.
pub const ANY: &str = "any";

/// Map a schema node to its TypeScript type expression.
///
/// Inline objects are not expanded: with properties or without, they map to
/// `object` (or `Record<string, any>` when `additionalProperties` is truthy).
/// Only named schemas get a full interface, via the types emitter.
pub fn map_type(schema: &SchemaOrRef) -> String {
    match schema {
        SchemaOrRef::Ref { ref_path, .. } => ref_name(ref_path).to_string(),
        SchemaOrRef::Schema(schema) => map_inline(schema),
    }
}

/// Like [`map_type`], with a missing schema treated as unconstrained.
pub fn map_optional(schema: Option<&SchemaOrRef>) -> String {
    schema.map(map_type).unwrap_or_else(|| ANY.to_string())
}

fn map_inline(schema: &Schema) -> String {
    match schema.primary_type() {
        Some(SchemaType::String) if !schema.enum_values.is_empty() => {
            enum_union(&schema.enum_values)
        }
        Some(SchemaType::String) => "string".to_string(),
        Some(SchemaType::Number | SchemaType::Integer) => "number".to_string(),
        Some(SchemaType::Boolean) => "boolean".to_string(),
        Some(SchemaType::Array) => array_of(&map_optional(schema.items.as_deref())),
        Some(SchemaType::Object)
            if schema
                .additional_properties
                .as_ref()
                .is_some_and(|a| a.is_truthy()) =>
        {
            "Record<string, any>".to_string()
        }
        Some(SchemaType::Object) => "object".to_string(),
        _ => ANY.to_string(),
    }
}

/// Union of single-quoted literals, in declared order.
fn enum_union(values: &[serde_json::Value]) -> String {
    values
        .iter()
        .map(|v| {
            let text = match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("'{}'", escape_single_quoted(&text))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn array_of(inner: &str) -> String {
    if inner.contains('|') {
        format!("({inner})[]")
    } else {
        format!("{inner}[]")
    }
}

/// Escape a value for a single-quoted JS string literal.
pub fn escape_single_quoted(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
}

/// Collect the named schemas a node refers to, for `import type` lines.
pub fn collect_refs(schema: &SchemaOrRef, refs: &mut BTreeSet<String>) {
    match schema {
        SchemaOrRef::Ref { ref_path, .. } => {
            refs.insert(ref_name(ref_path).to_string());
        }
        SchemaOrRef::Schema(schema) => {
            if schema.primary_type() == Some(&SchemaType::Array)
                && let Some(items) = schema.items.as_deref()
            {
                collect_refs(items, refs);
            }
        }
    }
}
