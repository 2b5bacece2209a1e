use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `apigen.config.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiGenConfig {
    /// Local path or `http(s)` URL of the OpenAPI document.
    pub open_api_spec: String,
    /// Cache path read when a remote fetch fails, and written when `remote.saveLocal` is set.
    pub local_fallback: PathBuf,
    pub remote: RemoteConfig,
    pub output_dir: PathBuf,
    /// Client file name; derived from the output mode when absent.
    pub file_name: Option<String>,
    pub generate_options: GenerateOptions,
}

impl Default for ApiGenConfig {
    fn default() -> Self {
        Self {
            open_api_spec: "./openapi.json".to_string(),
            local_fallback: PathBuf::from("./openapi.json"),
            remote: RemoteConfig::default(),
            output_dir: PathBuf::from("./src/api/generated"),
            file_name: None,
            generate_options: GenerateOptions::default(),
        }
    }
}

/// Remote acquisition settings. Durations are milliseconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoteConfig {
    pub enabled: bool,
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub spec_endpoint: String,
    pub timeout: u64,
    /// Total number of network attempts.
    pub retries: u32,
    pub retry_delay: u64,
    pub save_local: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://localhost:3000".to_string(),
            spec_endpoint: "/openapi.json".to_string(),
            timeout: 10_000,
            retries: 3,
            retry_delay: 1_000,
            save_local: true,
        }
    }
}

impl RemoteConfig {
    /// `baseURL` joined with `specEndpoint`.
    pub fn spec_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.spec_endpoint.trim_start_matches('/')
        )
    }
}

/// Transport library bound into the emitted client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpClientType {
    #[default]
    Axios,
}

/// Emission options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateOptions {
    /// Emit untyped JavaScript instead of TypeScript.
    #[serde(rename = "toJS")]
    pub to_js: bool,
    pub http_client_type: HttpClientType,
    /// Return `response.data` instead of the transport's response envelope.
    pub unwrap_response_data: bool,
    pub client_name: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            to_js: false,
            http_client_type: HttpClientType::Axios,
            unwrap_response_data: false,
            client_name: "ApiClient".to_string(),
        }
    }
}

/// Environment variable replacing `openApiSpec`.
pub const SPEC_URL_ENV: &str = "API_SPEC_URL";
/// Environment variable replacing `remote.baseURL`.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

impl ApiGenConfig {
    /// Apply `API_SPEC_URL` / `API_BASE_URL` overrides from the given lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(spec) = lookup(SPEC_URL_ENV).filter(|v| !v.is_empty()) {
            self.open_api_spec = spec;
        }
        if let Some(base) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.remote.base_url = base;
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "apigen.config.yaml";

/// Load config from a YAML (or JSON) file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ApiGenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# apigen configuration
openApiSpec: ./openapi.json      # local path or http(s) URL (env: API_SPEC_URL)
localFallback: ./openapi.json    # cache read when the remote fetch fails

remote:
  enabled: true
  baseURL: http://localhost:3000 # env: API_BASE_URL
  specEndpoint: /openapi.json
  timeout: 10000                 # ms per attempt
  retries: 3                     # total attempts
  retryDelay: 1000               # ms between attempts
  saveLocal: true                # write fetched documents to localFallback

outputDir: ./src/api/generated
# fileName: api.ts               # defaults to api.ts, or api.js with toJS

generateOptions:
  toJS: false                    # emit JavaScript + JSDoc instead of TypeScript
  httpClientType: axios
  unwrapResponseData: false      # return response.data instead of the AxiosResponse
  clientName: ApiClient
"#
}
