use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;

use super::parameter::ParameterOrRef;
use super::response::ResponseOrRef;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    /// Lower-case token as used in path items and on the Axios instance.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
            HttpMethod::Trace => "trace",
        }
    }

    pub fn as_upper(&self) -> String {
        self.as_str().to_ascii_uppercase()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Operation {
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,

    pub summary: Option<String>,

    pub description: Option<String>,

    pub parameters: Vec<ParameterOrRef>,

    /// Only its presence matters to the generator; the payload is typed `any`.
    #[serde(rename = "requestBody")]
    pub request_body: Option<serde_json::Value>,

    pub responses: IndexMap<String, ResponseOrRef>,
}

/// A path item: operations keyed by HTTP method, in document order.
///
/// Keys that are not HTTP methods (`parameters`, `summary`, extensions) are dropped.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "IndexMap<String, serde_json::Value>")]
pub struct PathItem {
    pub operations: IndexMap<HttpMethod, Operation>,
}

impl TryFrom<IndexMap<String, serde_json::Value>> for PathItem {
    type Error = serde_json::Error;

    fn try_from(raw: IndexMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut operations = IndexMap::new();
        for (key, value) in raw {
            let Ok(method) = key.parse::<HttpMethod>() else {
                continue;
            };
            let operation: Operation = serde_json::from_value(value)?;
            operations.entry(method).or_insert(operation);
        }
        Ok(Self { operations })
    }
}
