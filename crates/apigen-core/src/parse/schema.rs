use indexmap::IndexMap;
use serde::Deserialize;

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    Other(String),
}

impl From<String> for SchemaType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "string" => SchemaType::String,
            "number" => SchemaType::Number,
            "integer" => SchemaType::Integer,
            "boolean" => SchemaType::Boolean,
            "array" => SchemaType::Array,
            "object" => SchemaType::Object,
            "null" => SchemaType::Null,
            _ => SchemaType::Other(value),
        }
    }
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
        #[serde(default)]
        description: Option<String>,
    },
    Schema(Box<Schema>),
}

impl SchemaOrRef {
    pub fn description(&self) -> Option<&str> {
        match self {
            SchemaOrRef::Ref { description, .. } => description.as_deref(),
            SchemaOrRef::Schema(schema) => schema.description.as_deref(),
        }
    }
}

/// `additionalProperties` can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<SchemaOrRef>),
}

impl AdditionalProperties {
    /// `false` is the only falsy form; any schema object counts as truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, AdditionalProperties::Bool(false))
    }
}

/// The subset of a JSON Schema object the generator reads.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: Option<TypeSet>,

    pub format: Option<String>,

    pub description: Option<String>,

    pub properties: IndexMap<String, SchemaOrRef>,

    pub required: Vec<String>,

    #[serde(rename = "additionalProperties")]
    pub additional_properties: Option<AdditionalProperties>,

    pub items: Option<Box<SchemaOrRef>>,

    #[serde(rename = "enum")]
    pub enum_values: Vec<serde_json::Value>,
}

impl Schema {
    /// The effective type: the declared type, or the first non-`null` entry of a type array.
    pub fn primary_type(&self) -> Option<&SchemaType> {
        match self.schema_type.as_ref()? {
            TypeSet::Single(t) => Some(t),
            TypeSet::Multiple(types) => types.iter().find(|t| **t != SchemaType::Null),
        }
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }
}
