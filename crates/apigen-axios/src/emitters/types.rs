use apigen_core::parse::document::OpenApiDocument;
use apigen_core::parse::schema::SchemaOrRef;
use minijinja::context;

use super::{OutputMode, environment, escape_jsdoc, is_identifier};
use crate::EmitError;
use crate::type_mapper::{escape_single_quoted, map_type};

/// Emit the types file: one declaration per named schema, in document order.
pub fn emit_types(document: &OpenApiDocument, mode: OutputMode) -> Result<String, EmitError> {
    let env = environment()?;
    let tmpl = env.get_template("types.j2")?;

    let schemas: Vec<minijinja::Value> = document
        .components
        .schemas
        .iter()
        .map(|(name, schema)| schema_to_ctx(name, schema, mode))
        .collect();

    Ok(tmpl.render(context! {
        typed => mode.is_typed(),
        schemas => schemas,
    })?)
}

fn schema_to_ctx(name: &str, schema: &SchemaOrRef, mode: OutputMode) -> minijinja::Value {
    // A top-level `$ref` alias has no properties of its own
    let lines: Vec<String> = match schema {
        SchemaOrRef::Schema(schema) => schema
            .properties
            .iter()
            .map(|(prop, prop_schema)| {
                let required = schema.is_required(prop);
                match mode {
                    OutputMode::TypeScript => field_line(prop, prop_schema, required),
                    OutputMode::JavaScript => property_tag(prop, prop_schema, required),
                }
            })
            .collect(),
        SchemaOrRef::Ref { .. } => Vec::new(),
    };

    context! {
        name => name,
        lines => lines,
    }
}

/// `  name?: type; // description`
fn field_line(prop: &str, schema: &SchemaOrRef, required: bool) -> String {
    let key = if is_identifier(prop) {
        prop.to_string()
    } else {
        format!("'{}'", escape_single_quoted(prop))
    };
    let optional = if required { "" } else { "?" };
    let mut line = format!("  {key}{optional}: {};", map_type(schema));
    if let Some(description) = schema.description() {
        line.push_str(" // ");
        line.push_str(&single_line(description));
    }
    line
}

/// ` * @property {type} [name] description`
fn property_tag(prop: &str, schema: &SchemaOrRef, required: bool) -> String {
    let name = if required {
        prop.to_string()
    } else {
        format!("[{prop}]")
    };
    let mut line = format!(" * @property {{{}}} {name}", map_type(schema));
    if let Some(description) = schema.description() {
        line.push(' ');
        line.push_str(&escape_jsdoc(&single_line(description)));
    }
    line
}

/// Line breaks would end a `//` comment early.
fn single_line(text: &str) -> String {
    text.trim().lines().map(str::trim).collect::<Vec<_>>().join(" ")
}
