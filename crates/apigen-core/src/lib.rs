pub mod acquire;
pub mod config;
pub mod error;
pub mod output;
pub mod parse;
pub mod validate;

use std::fmt;

use parse::document::OpenApiDocument;
use parse::operation::HttpMethod;

/// A generated file with path (relative to the output directory) and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Files produced by a generator together with the non-fatal issues found on the way.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutput {
    pub files: Vec<GeneratedFile>,
    pub warnings: Vec<GenerationWarning>,
}

/// Something the generator skipped or degraded without failing the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationWarning {
    MissingOperationId {
        method: HttpMethod,
        path: String,
    },
    DuplicateOperationId {
        operation_id: String,
        method: HttpMethod,
        path: String,
    },
    NoSuccessResponse {
        operation_id: String,
        method: HttpMethod,
        path: String,
    },
    UnresolvedParameter {
        operation_id: String,
        reference: String,
    },
    /// `fileName` names another generated file; the default name is used instead.
    ClientFileCollision {
        file_name: String,
        fallback: String,
    },
    /// `fileName` does not carry the extension of the output mode.
    ClientFileExtension {
        file_name: String,
        expected: &'static str,
    },
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationWarning::MissingOperationId { method, path } => write!(
                f,
                "{} {path} has no operationId, skipped",
                method.as_upper()
            ),
            GenerationWarning::DuplicateOperationId {
                operation_id,
                method,
                path,
            } => write!(
                f,
                "{} {path} reuses operationId `{operation_id}`, skipped",
                method.as_upper()
            ),
            GenerationWarning::NoSuccessResponse {
                operation_id,
                method,
                path,
            } => write!(
                f,
                "{} {path} (`{operation_id}`) defines no 2xx response, return type is `any`",
                method.as_upper()
            ),
            GenerationWarning::UnresolvedParameter {
                operation_id,
                reference,
            } => write!(
                f,
                "`{operation_id}` references unknown parameter {reference}, skipped"
            ),
            GenerationWarning::ClientFileCollision {
                file_name,
                fallback,
            } => write!(
                f,
                "fileName `{file_name}` collides with a generated file, writing the client to `{fallback}`"
            ),
            GenerationWarning::ClientFileExtension {
                file_name,
                expected,
            } => write!(
                f,
                "fileName `{file_name}` does not end in `.{expected}` for the selected output mode"
            ),
        }
    }
}

/// Trait for code generators that produce files from a parsed document.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        document: &OpenApiDocument,
        config: &Self::Config,
    ) -> Result<GenerationOutput, Self::Error>;
}
