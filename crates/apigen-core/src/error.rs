use std::path::PathBuf;

use thiserror::Error;

/// Failures while obtaining the OpenAPI document.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("OpenAPI document not found: {path} ({reason})")]
    SpecNotFound { path: PathBuf, reason: String },

    #[error("failed to parse OpenAPI document from {origin}: {source}")]
    SpecParse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Structural rule violations reported by the validator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaValidationError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    #[error("unsupported OpenAPI version: {0}, use a 3.x document")]
    UnsupportedVersion(String),

    #[error("invalid path `{0}`: paths must start with '/'")]
    InvalidPath(String),

    #[error("path `{0}` defines no HTTP method")]
    NoOperations(String),

    #[error("{method} {path} is missing `responses`")]
    MissingResponses { path: String, method: String },

    #[error("invalid schema name `{name}`: use PascalCase such as `{suggestion}`")]
    InvalidSchemaName { name: String, suggestion: String },

    #[error("schema `{schema}` has invalid type `{schema_type}`")]
    InvalidSchemaType { schema: String, schema_type: String },

    #[error("schema `{schema}` property `{property}` has invalid reference `{reference}`")]
    InvalidReference {
        schema: String,
        property: String,
        reference: String,
    },
}

/// Filesystem failure while materializing generated files.
#[derive(Debug, Error)]
#[error("failed to write {path}: {source}")]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Failures while loading the project configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

