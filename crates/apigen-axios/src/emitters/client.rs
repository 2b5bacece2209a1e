use std::collections::BTreeSet;

use apigen_core::GenerationWarning;
use apigen_core::config::GenerateOptions;
use apigen_core::parse::document::OpenApiDocument;
use heck::ToLowerCamelCase;
use minijinja::context;

use super::methods::MethodEmitter;
use super::{OutputMode, environment};
use crate::EmitError;
use crate::type_mapper::escape_single_quoted;

/// Base URL used when the document declares no servers.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// The rendered client module plus what was skipped along the way.
#[derive(Debug, Clone)]
pub struct ClientEmission {
    pub source: String,
    pub warnings: Vec<GenerationWarning>,
}

/// Emit the client module: imports, the client class, and a default instance.
///
/// `types_module` is the import specifier of the types file, e.g. `./types`.
pub fn emit_client(
    document: &OpenApiDocument,
    options: &GenerateOptions,
    types_module: &str,
) -> Result<ClientEmission, EmitError> {
    let mode = OutputMode::from_options(options);
    let emission = MethodEmitter::new(&document.components, options)?.emit_all(document)?;

    let imported_types: BTreeSet<&str> = emission
        .methods
        .iter()
        .flat_map(|m| m.type_refs.iter().map(String::as_str))
        .collect();
    let methods: Vec<&str> = emission.methods.iter().map(|m| m.source.as_str()).collect();

    let base_url = document.default_server_url().unwrap_or(DEFAULT_BASE_URL);
    let class_name = options.client_name.as_str();

    let env = environment()?;
    let source = env.get_template("client.j2")?.render(context! {
        typed => mode.is_typed(),
        unwrap => options.unwrap_response_data,
        imported_types => imported_types,
        types_module => types_module,
        class_name => class_name,
        instance_name => class_name.to_lower_camel_case(),
        base_url => format!("'{}'", escape_single_quoted(base_url)),
        methods => methods,
    })?;

    Ok(ClientEmission {
        source,
        warnings: emission.warnings,
    })
}
