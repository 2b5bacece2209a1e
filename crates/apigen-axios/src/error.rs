use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}
