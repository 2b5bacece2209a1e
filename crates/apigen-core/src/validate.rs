//! Structural checks on a raw OpenAPI document.
//!
//! Runs independently of generation and stops at the first violation.
//! Softer findings (no paths, no success response, no schemas) are collected
//! as warnings on the report.

use heck::ToUpperCamelCase;
use log::warn;
use serde_json::Value;

use crate::error::SchemaValidationError;
use crate::parse::operation::HttpMethod;
use crate::parse::reference::SCHEMA_REF_PREFIX;

const SCHEMA_TYPES: [&str; 6] = ["object", "array", "string", "number", "integer", "boolean"];

/// Summary of a document that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub openapi: String,
    pub title: String,
    pub version: String,
    pub path_count: usize,
    pub schema_count: usize,
    pub warnings: Vec<String>,
}

/// Validate a parsed JSON document against the structural rules.
pub fn validate(document: &Value) -> Result<ValidationReport, SchemaValidationError> {
    let openapi = required_str(document.get("openapi"), "openapi")?;
    let info = document
        .get("info")
        .ok_or_else(|| SchemaValidationError::MissingField("info".to_string()))?;
    let title = required_str(info.get("title"), "info.title")?;
    let version = required_str(info.get("version"), "info.version")?;

    if !openapi.starts_with("3.") {
        return Err(SchemaValidationError::UnsupportedVersion(openapi.to_string()));
    }

    let mut warnings = Vec::new();
    let path_count = validate_paths(document.get("paths"), &mut warnings)?;
    let schema_count = validate_schemas(
        document.get("components").and_then(|c| c.get("schemas")),
        &mut warnings,
    )?;

    for warning in &warnings {
        warn!("{warning}");
    }

    Ok(ValidationReport {
        openapi: openapi.to_string(),
        title: title.to_string(),
        version: version.to_string(),
        path_count,
        schema_count,
        warnings,
    })
}

fn required_str<'a>(value: Option<&'a Value>, field: &str) -> Result<&'a str, SchemaValidationError> {
    match value {
        None | Some(Value::Null) => Err(SchemaValidationError::MissingField(field.to_string())),
        Some(Value::String(s)) if s.is_empty() => {
            Err(SchemaValidationError::MissingField(field.to_string()))
        }
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(SchemaValidationError::InvalidField {
            field: field.to_string(),
            expected: "a string",
        }),
    }
}

fn validate_paths(
    paths: Option<&Value>,
    warnings: &mut Vec<String>,
) -> Result<usize, SchemaValidationError> {
    let paths = match paths {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            return Err(SchemaValidationError::InvalidField {
                field: "paths".to_string(),
                expected: "an object",
            });
        }
    };
    let Some(paths) = paths.filter(|p| !p.is_empty()) else {
        warnings.push("no API paths are defined".to_string());
        return Ok(0);
    };

    for (path, item) in paths {
        if !path.starts_with('/') {
            return Err(SchemaValidationError::InvalidPath(path.clone()));
        }

        let operations: Vec<(&String, &Value)> = item
            .as_object()
            .into_iter()
            .flatten()
            .filter(|(key, _)| key.parse::<HttpMethod>().is_ok())
            .collect();
        if operations.is_empty() {
            return Err(SchemaValidationError::NoOperations(path.clone()));
        }

        for (method, operation) in operations {
            let method = method.to_ascii_uppercase();
            let Some(responses) = operation.get("responses").and_then(Value::as_object) else {
                return Err(SchemaValidationError::MissingResponses {
                    path: path.clone(),
                    method,
                });
            };
            let has_success = responses
                .keys()
                .any(|code| code.starts_with('2') || code == "default");
            if !has_success {
                warnings.push(format!("{method} {path} defines no success response"));
            }
        }
    }
    Ok(paths.len())
}

fn validate_schemas(
    schemas: Option<&Value>,
    warnings: &mut Vec<String>,
) -> Result<usize, SchemaValidationError> {
    let Some(schemas) = schemas.and_then(Value::as_object).filter(|s| !s.is_empty()) else {
        warnings.push("no component schemas are defined".to_string());
        return Ok(0);
    };

    for (name, schema) in schemas {
        if !is_pascal_identifier(name) {
            return Err(SchemaValidationError::InvalidSchemaName {
                name: name.clone(),
                suggestion: name.to_upper_camel_case(),
            });
        }

        let schema_type = schema.get("type");
        if let Some(schema_type) = schema_type {
            let known = schema_type
                .as_str()
                .is_some_and(|t| SCHEMA_TYPES.contains(&t));
            if !known {
                return Err(SchemaValidationError::InvalidSchemaType {
                    schema: name.clone(),
                    schema_type: schema_type
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| schema_type.to_string()),
                });
            }
        }

        if schema_type.and_then(Value::as_str) != Some("object") {
            continue;
        }
        let properties = schema.get("properties").and_then(Value::as_object);
        for (property, node) in properties.into_iter().flatten() {
            if let Some(reference) = node.get("$ref").and_then(Value::as_str)
                && !reference.starts_with(SCHEMA_REF_PREFIX)
            {
                return Err(SchemaValidationError::InvalidReference {
                    schema: name.clone(),
                    property: property.clone(),
                    reference: reference.to_string(),
                });
            }
        }
    }
    Ok(schemas.len())
}

/// `^[A-Za-z][A-Za-z0-9]*$`
fn is_pascal_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}
