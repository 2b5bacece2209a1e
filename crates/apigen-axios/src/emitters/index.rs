use minijinja::context;

use super::environment;
use crate::EmitError;

/// Emit the barrel module that re-exports the client and types modules.
pub fn emit_index(client_module: &str, types_module: &str) -> Result<String, EmitError> {
    let env = environment()?;
    let tmpl = env.get_template("index.j2")?;
    Ok(tmpl.render(context! {
        client_module => client_module,
        types_module => types_module,
    })?)
}
