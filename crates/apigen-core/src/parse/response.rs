use indexmap::IndexMap;
use serde::Deserialize;

use super::schema::SchemaOrRef;

/// The JSON media type, preferred when picking a response schema.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// A media type object.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MediaType {
    pub schema: Option<SchemaOrRef>,
}

/// A response definition.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Response {
    pub description: Option<String>,
    pub content: IndexMap<String, MediaType>,
}

impl Response {
    /// Schema of the JSON body, or of the first media type that declares one.
    pub fn body_schema(&self) -> Option<&SchemaOrRef> {
        self.content
            .get(JSON_MEDIA_TYPE)
            .and_then(|m| m.schema.as_ref())
            .or_else(|| self.content.values().find_map(|m| m.schema.as_ref()))
    }
}

/// A reference or inline response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResponseOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Response(Response),
}

/// Whether a response key denotes a success-class status (`2xx`).
pub fn is_success_code(code: &str) -> bool {
    code.starts_with('2')
}
