use apigen_core::config::ApiGenConfig;
use apigen_core::parse::document::OpenApiDocument;
use apigen_core::{CodeGenerator, GeneratedFile, GenerationOutput, GenerationWarning};
use log::warn;

use crate::EmitError;
use crate::emitters::{self, OutputMode};

const TYPES_STEM: &str = "types";
const CLIENT_STEM: &str = "api";
const INDEX_STEM: &str = "index";

/// Axios client generator: a types file, a client file and an index file.
pub struct AxiosClientGenerator;

impl AxiosClientGenerator {
    /// File name of the client module, honouring `fileName` when set.
    ///
    /// A name that would overwrite the types or index file falls back to the
    /// default; a name with the other mode's extension is kept but reported.
    pub fn client_file_name(config: &ApiGenConfig) -> (String, Option<GenerationWarning>) {
        let ext = OutputMode::from_options(&config.generate_options).extension();
        let default = format!("{CLIENT_STEM}.{ext}");

        let Some(name) = config
            .file_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        else {
            return (default, None);
        };

        let reserved = [format!("{TYPES_STEM}.{ext}"), format!("{INDEX_STEM}.{ext}")];
        if reserved.iter().any(|r| r.eq_ignore_ascii_case(name)) {
            let warning = GenerationWarning::ClientFileCollision {
                file_name: name.to_string(),
                fallback: default.clone(),
            };
            return (default, Some(warning));
        }

        let suffix = format!(".{ext}");
        let warning = (!name.ends_with(&suffix)).then(|| GenerationWarning::ClientFileExtension {
            file_name: name.to_string(),
            expected: ext,
        });
        (name.to_string(), warning)
    }
}

impl CodeGenerator for AxiosClientGenerator {
    type Config = ApiGenConfig;
    type Error = EmitError;

    fn generate(
        &self,
        document: &OpenApiDocument,
        config: &ApiGenConfig,
    ) -> Result<GenerationOutput, EmitError> {
        let options = &config.generate_options;
        let mode = OutputMode::from_options(options);
        let ext = mode.extension();

        let mut warnings = Vec::new();
        let (client_file, name_warning) = Self::client_file_name(config);
        if let Some(warning) = name_warning {
            warn!("{warning}");
            warnings.push(warning);
        }
        let types_module = format!("./{TYPES_STEM}");
        let client_module = module_specifier(&client_file);

        let types = emitters::types::emit_types(document, mode)?;
        let client = emitters::client::emit_client(document, options, &types_module)?;
        let index = emitters::index::emit_index(&client_module, &types_module)?;
        warnings.extend(client.warnings);

        Ok(GenerationOutput {
            files: vec![
                GeneratedFile {
                    path: format!("{TYPES_STEM}.{ext}"),
                    content: types,
                },
                GeneratedFile {
                    path: client_file,
                    content: client.source,
                },
                GeneratedFile {
                    path: format!("{INDEX_STEM}.{ext}"),
                    content: index,
                },
            ],
            warnings,
        })
    }
}

/// `./name` without a `.ts`/`.js` extension.
fn module_specifier(file_name: &str) -> String {
    let stem = [".ts", ".js"]
        .iter()
        .find_map(|ext| file_name.strip_suffix(ext))
        .unwrap_or(file_name);
    format!("./{stem}")
}
