use indexmap::IndexMap;
use serde::Deserialize;

use super::operation::PathItem;
use super::parameter::{Parameter, ParameterOrRef};
use super::reference::ref_name;
use super::response::{Response, ResponseOrRef};
use super::schema::SchemaOrRef;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Info {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
}

/// A server URL definition.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Server {
    pub url: String,
    pub description: Option<String>,
}

/// Components object holding reusable definitions.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Components {
    pub schemas: IndexMap<String, SchemaOrRef>,
    pub parameters: IndexMap<String, ParameterOrRef>,
    pub responses: IndexMap<String, ResponseOrRef>,
}

impl Components {
    /// Look up a `#/components/parameters/<Name>` reference by its trailing name.
    pub fn parameter(&self, reference: &str) -> Option<&Parameter> {
        match self.parameters.get(ref_name(reference))? {
            ParameterOrRef::Parameter(param) => Some(param),
            ParameterOrRef::Ref { .. } => None,
        }
    }

    /// Look up a `#/components/responses/<Name>` reference by its trailing name.
    pub fn response(&self, reference: &str) -> Option<&Response> {
        match self.responses.get(ref_name(reference))? {
            ResponseOrRef::Response(response) => Some(response),
            ResponseOrRef::Ref { .. } => None,
        }
    }
}

/// Top-level OpenAPI 3.x document, read-only once parsed.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    pub servers: Vec<Server>,
    pub paths: IndexMap<String, PathItem>,
    pub components: Components,
}

impl OpenApiDocument {
    /// URL of the first declared server, if any.
    pub fn default_server_url(&self) -> Option<&str> {
        self.servers.first().map(|s| s.url.as_str())
    }
}
