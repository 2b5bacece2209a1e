pub mod document;
pub mod operation;
pub mod parameter;
pub mod reference;
pub mod response;
pub mod schema;

use document::OpenApiDocument;

/// Parse an OpenAPI document from JSON text.
pub fn from_json(input: &str) -> Result<OpenApiDocument, serde_json::Error> {
    serde_json::from_str(input)
}

/// Build the typed document from an already parsed JSON value.
pub fn from_value(value: serde_json::Value) -> Result<OpenApiDocument, serde_json::Error> {
    serde_json::from_value(value)
}
