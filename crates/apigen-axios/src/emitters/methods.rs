//! Client methods, one per operation with an `operationId`.
//!
//! Emission walks `paths` and then each path's methods in document order, so
//! the output is a pure function of the input document.

use std::collections::{BTreeSet, HashSet};

use apigen_core::GenerationWarning;
use apigen_core::config::GenerateOptions;
use apigen_core::parse::document::{Components, OpenApiDocument};
use apigen_core::parse::operation::{HttpMethod, Operation};
use apigen_core::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use apigen_core::parse::response::{ResponseOrRef, is_success_code};
use heck::ToLowerCamelCase;
use log::warn;
use minijinja::{Environment, context};

use super::{OutputMode, environment, escape_jsdoc, is_identifier};
use crate::EmitError;
use crate::type_mapper::{ANY, collect_refs, escape_single_quoted, map_optional, map_type};

const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let", "new",
    "null", "package", "private", "protected", "public", "return", "static", "super", "switch",
    "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Locals the generated method body declares itself.
const GENERATED_LOCALS: &[&str] = &["data", "params", "response"];

/// One emitted client method.
#[derive(Debug, Clone)]
pub struct EmittedMethod {
    pub name: String,
    pub source: String,
    /// Named schemas referenced by the signature or return type.
    pub type_refs: BTreeSet<String>,
    pub warnings: Vec<GenerationWarning>,
}

/// All methods of a document, in emission order.
#[derive(Debug, Clone, Default)]
pub struct MethodEmission {
    pub methods: Vec<EmittedMethod>,
    pub warnings: Vec<GenerationWarning>,
}

/// Emit every method of the document; see [`MethodEmitter::emit_all`].
pub fn emit_all_methods(
    document: &OpenApiDocument,
    options: &GenerateOptions,
) -> Result<MethodEmission, EmitError> {
    MethodEmitter::new(&document.components, options)?.emit_all(document)
}

/// A path or query parameter prepared for emission.
struct MethodParam {
    ident: String,
    original: String,
    ts_type: String,
    required: bool,
}

/// Renders client methods against one document's components.
pub struct MethodEmitter<'a> {
    env: Environment<'static>,
    components: &'a Components,
    mode: OutputMode,
    unwrap: bool,
}

impl<'a> MethodEmitter<'a> {
    pub fn new(components: &'a Components, options: &GenerateOptions) -> Result<Self, EmitError> {
        Ok(Self {
            env: environment()?,
            components,
            mode: OutputMode::from_options(options),
            unwrap: options.unwrap_response_data,
        })
    }

    /// Emit methods for all operations in document order.
    ///
    /// Operations without an `operationId`, or reusing one, are skipped with a warning.
    pub fn emit_all(&self, document: &OpenApiDocument) -> Result<MethodEmission, EmitError> {
        let mut emission = MethodEmission::default();
        let mut seen = HashSet::new();

        for (path, item) in &document.paths {
            for (method, operation) in &item.operations {
                let Some(operation_id) = operation.operation_id.as_deref().filter(|id| !id.is_empty())
                else {
                    let warning = GenerationWarning::MissingOperationId {
                        method: *method,
                        path: path.clone(),
                    };
                    warn!("{warning}");
                    emission.warnings.push(warning);
                    continue;
                };
                if !seen.insert(operation_id) {
                    let warning = GenerationWarning::DuplicateOperationId {
                        operation_id: operation_id.to_string(),
                        method: *method,
                        path: path.clone(),
                    };
                    warn!("{warning}");
                    emission.warnings.push(warning);
                    continue;
                }

                if let Some(emitted) = self.emit_method(path, *method, operation)? {
                    emission.warnings.extend(emitted.warnings.iter().cloned());
                    emission.methods.push(emitted);
                }
            }
        }
        Ok(emission)
    }

    /// Emit one method. Returns `None` when the operation has no `operationId`.
    pub fn emit_method(
        &self,
        path: &str,
        method: HttpMethod,
        operation: &Operation,
    ) -> Result<Option<EmittedMethod>, EmitError> {
        let Some(name) = operation.operation_id.as_deref().filter(|id| !id.is_empty()) else {
            return Ok(None);
        };

        let mut warnings = Vec::new();
        let mut type_refs = BTreeSet::new();
        let mut path_params = Vec::new();
        let mut query_params = Vec::new();

        for param in &operation.parameters {
            let Some(param) = self.resolve_parameter(param) else {
                if let ParameterOrRef::Ref { ref_path } = param {
                    let warning = GenerationWarning::UnresolvedParameter {
                        operation_id: name.to_string(),
                        reference: ref_path.clone(),
                    };
                    warn!("{warning}");
                    warnings.push(warning);
                }
                continue;
            };
            let required = match param.location {
                ParameterLocation::Path => true,
                ParameterLocation::Query => param.required,
                _ => continue,
            };
            if let Some(schema) = &param.schema {
                collect_refs(schema, &mut type_refs);
            }
            let prepared = MethodParam {
                ident: String::new(),
                original: param.name.clone(),
                ts_type: map_optional(param.schema.as_ref()),
                required,
            };
            if param.location == ParameterLocation::Path {
                path_params.push(prepared);
            } else {
                query_params.push(prepared);
            }
        }

        // Path parameters claim their names first so the URL keeps them.
        let mut taken = HashSet::new();
        for param in path_params.iter_mut().chain(query_params.iter_mut()) {
            param.ident = unique_ident(&param.original, &mut taken);
        }

        let has_body = operation.request_body.is_some();
        let response_type = match self.success_response_type(operation, &mut type_refs) {
            Some(ty) => ty,
            None => {
                let warning = GenerationWarning::NoSuccessResponse {
                    operation_id: name.to_string(),
                    method,
                    path: path.to_string(),
                };
                warn!("{warning}");
                warnings.push(warning);
                ANY.to_string()
            }
        };

        let mut formals: Vec<&MethodParam> = path_params.iter().chain(&query_params).collect();
        let data_param = MethodParam {
            ident: "data".to_string(),
            original: "data".to_string(),
            ts_type: ANY.to_string(),
            required: true,
        };
        if has_body {
            formals.push(&data_param);
        }

        let return_type = if self.unwrap {
            format!("Promise<{response_type}>")
        } else {
            format!("Promise<AxiosResponse<{response_type}>>")
        };

        let query_entries: Vec<String> = query_params
            .iter()
            .map(|p| {
                if p.ident == p.original {
                    p.ident.clone()
                } else {
                    format!("'{}': {}", escape_single_quoted(&p.original), p.ident)
                }
            })
            .collect();

        let url = build_url(path, &path_params);
        let call = build_call(method, &url, !query_params.is_empty(), has_body);

        let source = self.env.get_template("method.j2")?.render(context! {
            name => name,
            typed => self.mode.is_typed(),
            signature => self.signature(&formals),
            return_type => return_type,
            doc_lines => self.doc_lines(operation, &formals),
            query_entries => query_entries,
            unwrap => self.unwrap,
            call => call,
        })?;

        Ok(Some(EmittedMethod {
            name: name.to_string(),
            source: source.trim_end().to_string(),
            type_refs,
            warnings,
        }))
    }

    fn resolve_parameter<'p>(&'p self, param: &'p ParameterOrRef) -> Option<&'p Parameter> {
        match param {
            ParameterOrRef::Parameter(p) => Some(p),
            ParameterOrRef::Ref { ref_path } => self.components.parameter(ref_path),
        }
    }

    /// Type of the first `2xx` response body; `None` when no `2xx` response exists.
    fn success_response_type(
        &self,
        operation: &Operation,
        type_refs: &mut BTreeSet<String>,
    ) -> Option<String> {
        let (_, response) = operation
            .responses
            .iter()
            .find(|(code, _)| is_success_code(code))?;
        let response = match response {
            ResponseOrRef::Response(r) => Some(r),
            ResponseOrRef::Ref { ref_path } => self.components.response(ref_path),
        };
        let Some(schema) = response.and_then(|r| r.body_schema()) else {
            return Some(ANY.to_string());
        };
        collect_refs(schema, type_refs);
        Some(map_type(schema))
    }

    fn signature(&self, formals: &[&MethodParam]) -> String {
        formals
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if !self.mode.is_typed() {
                    return p.ident.clone();
                }
                if p.required {
                    format!("{}: {}", p.ident, p.ts_type)
                } else if formals[i + 1..].iter().any(|later| later.required) {
                    // `?` is not allowed before a required parameter
                    format!("{}: {} | undefined", p.ident, p.ts_type)
                } else {
                    format!("{}?: {}", p.ident, p.ts_type)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn doc_lines(&self, operation: &Operation, formals: &[&MethodParam]) -> Vec<String> {
        let summary = operation.summary.as_deref().unwrap_or_default();
        let mut lines: Vec<String> = summary
            .lines()
            .map(|line| {
                if line.is_empty() {
                    "   *".to_string()
                } else {
                    format!("   * {}", escape_jsdoc(line))
                }
            })
            .collect();
        if lines.is_empty() {
            lines.push("   *".to_string());
        }
        if !self.mode.is_typed() {
            lines.extend(formals.iter().map(|p| {
                if p.required {
                    format!("   * @param {{{}}} {}", p.ts_type, p.ident)
                } else {
                    format!("   * @param {{{}}} [{}]", p.ts_type, p.ident)
                }
            }));
        }
        lines
    }
}

/// A usable JS identifier for a parameter name.
fn param_ident(name: &str) -> String {
    let ident = if is_identifier(name) {
        name.to_string()
    } else {
        name.to_lower_camel_case()
    };
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{ident}")
    } else if RESERVED_WORDS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}

/// A parameter identifier not yet used by this method, suffixed `_2`, `_3`, ... on clashes.
fn unique_ident(name: &str, taken: &mut HashSet<String>) -> String {
    let base = param_ident(name);
    let mut ident = base.clone();
    let mut n = 2;
    while GENERATED_LOCALS.contains(&ident.as_str()) || taken.contains(&ident) {
        ident = format!("{base}_{n}");
        n += 1;
    }
    taken.insert(ident.clone());
    ident
}

/// Template literal body with each `{name}` placeholder substituted.
fn build_url(path: &str, path_params: &[MethodParam]) -> String {
    let mut url = path
        .replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${");
    for param in path_params {
        url = url.replace(
            &format!("{{{}}}", param.original),
            &format!("${{{}}}", param.ident),
        );
    }
    url
}

/// The Axios call for a verb, following Axios' per-verb argument order.
fn build_call(method: HttpMethod, url: &str, has_query: bool, has_body: bool) -> String {
    let url = format!("`{url}`");
    let body_is_argument = matches!(method, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch);

    let mut config_fields = Vec::new();
    if has_query {
        config_fields.push("params");
    }
    if has_body && !body_is_argument {
        config_fields.push("data");
    }

    if method == HttpMethod::Trace {
        let mut fields = vec!["method: 'trace'".to_string(), format!("url: {url}")];
        fields.extend(config_fields.iter().map(|f| f.to_string()));
        return format!("this.client.request({{ {} }})", fields.join(", "));
    }

    let mut args = vec![url];
    if body_is_argument {
        if has_body {
            args.push("data".to_string());
        } else if !config_fields.is_empty() {
            args.push("undefined".to_string());
        }
    }
    if !config_fields.is_empty() {
        args.push(format!("{{ {} }}", config_fields.join(", ")));
    }
    format!("this.client.{}({})", method.as_str(), args.join(", "))
}
