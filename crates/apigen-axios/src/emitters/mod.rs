pub mod client;
pub mod index;
pub mod methods;
pub mod types;

use apigen_core::config::GenerateOptions;
use minijinja::Environment;

/// Target language flavour of the emitted files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    TypeScript,
    JavaScript,
}

impl OutputMode {
    pub fn from_options(options: &GenerateOptions) -> Self {
        if options.to_js {
            OutputMode::JavaScript
        } else {
            OutputMode::TypeScript
        }
    }

    pub fn is_typed(&self) -> bool {
        *self == OutputMode::TypeScript
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputMode::TypeScript => "ts",
            OutputMode::JavaScript => "js",
        }
    }
}

/// Template environment shared by all emitters.
pub(crate) fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_template("types.j2", include_str!("../../templates/types.j2"))?;
    env.add_template("method.j2", include_str!("../../templates/method.j2"))?;
    env.add_template("client.j2", include_str!("../../templates/client.j2"))?;
    env.add_template("index.j2", include_str!("../../templates/index.j2"))?;
    Ok(env)
}

/// Escape `*/` sequences that would prematurely close a doc comment block.
pub(crate) fn escape_jsdoc(value: &str) -> String {
    value.replace("*/", "*\\/")
}

/// Whether `name` can be used as a bare JS identifier or object key.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
