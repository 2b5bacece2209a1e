//! Obtains the OpenAPI document from a local file or a remote endpoint.
//!
//! Remote sources are fetched with a bounded number of attempts and a fixed
//! delay between them. When every attempt fails the local fallback cache is
//! read instead; a successful fetch can refresh that cache.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::ApiGenConfig;
use crate::error::AcquireError;
use crate::parse;
use crate::parse::document::OpenApiDocument;

/// Options controlling remote fetching and the fallback cache.
#[derive(Debug, Clone)]
pub struct AcquireOptions {
    pub remote_enabled: bool,
    pub timeout: Duration,
    /// Total number of network attempts; zero is treated as one.
    pub retries: u32,
    pub retry_delay: Duration,
    pub save_local: bool,
    pub local_fallback: PathBuf,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self::from(&ApiGenConfig::default())
    }
}

impl From<&ApiGenConfig> for AcquireOptions {
    fn from(config: &ApiGenConfig) -> Self {
        Self {
            remote_enabled: config.remote.enabled,
            timeout: Duration::from_millis(config.remote.timeout),
            retries: config.remote.retries,
            retry_delay: Duration::from_millis(config.remote.retry_delay),
            save_local: config.remote.save_local,
            local_fallback: config.local_fallback.clone(),
        }
    }
}

/// Where the acquired document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecOrigin {
    Remote(String),
    Fallback(PathBuf),
    Local(PathBuf),
}

impl fmt::Display for SpecOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecOrigin::Remote(url) => write!(f, "{url}"),
            SpecOrigin::Fallback(path) => write!(f, "{} (local fallback)", path.display()),
            SpecOrigin::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A parsed document together with its origin.
#[derive(Debug, Clone)]
pub struct AcquiredSpec {
    pub document: OpenApiDocument,
    pub origin: SpecOrigin,
}

/// Whether a source string names a remote document.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Obtain and parse the OpenAPI document named by `source`.
///
/// Non-HTTP sources are read from disk and never touch the network.
pub async fn acquire(source: &str, options: &AcquireOptions) -> Result<AcquiredSpec, AcquireError> {
    if !is_remote(source) {
        let path = PathBuf::from(source);
        let value = read_local(&path)?;
        return finish(value, SpecOrigin::Local(path));
    }

    if options.remote_enabled {
        match fetch_with_retry(source, options).await {
            Ok(bytes) => {
                let value = parse_bytes(&bytes, source)?;
                let acquired = finish(value.clone(), SpecOrigin::Remote(source.to_string()))?;
                if options.save_local {
                    save_cache(&options.local_fallback, &value);
                }
                return Ok(acquired);
            }
            Err(reason) => {
                warn!(
                    "remote fetch of {source} failed ({reason}), using {}",
                    options.local_fallback.display()
                );
            }
        }
    } else {
        debug!("remote fetch disabled, reading {}", options.local_fallback.display());
    }

    let value = read_local(&options.local_fallback)?;
    finish(value, SpecOrigin::Fallback(options.local_fallback.clone()))
}

/// Read and parse a local JSON document into a raw value.
pub fn read_local(path: &Path) -> Result<serde_json::Value, AcquireError> {
    let bytes = fs::read(path).map_err(|e| AcquireError::SpecNotFound {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_bytes(&bytes, &path.display().to_string())
}

fn parse_bytes(bytes: &[u8], origin: &str) -> Result<serde_json::Value, AcquireError> {
    serde_json::from_slice(bytes).map_err(|source| AcquireError::SpecParse {
        origin: origin.to_string(),
        source,
    })
}

fn finish(value: serde_json::Value, origin: SpecOrigin) -> Result<AcquiredSpec, AcquireError> {
    let document = parse::from_value(value).map_err(|source| AcquireError::SpecParse {
        origin: origin.to_string(),
        source,
    })?;
    info!("loaded OpenAPI document from {origin}");
    Ok(AcquiredSpec { document, origin })
}

/// Fetch the raw bytes, retrying transport failures with a fixed delay.
async fn fetch_with_retry(url: &str, options: &AcquireOptions) -> Result<Vec<u8>, String> {
    let client = reqwest::Client::builder()
        .timeout(options.timeout)
        .build()
        .map_err(|e| e.to_string())?;

    let attempts = options.retries.max(1);
    let mut last_error = String::new();
    for attempt in 1..=attempts {
        debug!("fetching {url} (attempt {attempt}/{attempts})");
        match fetch_once(&client, url).await {
            Ok(bytes) => return Ok(bytes),
            Err(e) => {
                last_error = e.to_string();
                if attempt < attempts {
                    warn!(
                        "attempt {attempt}/{attempts} for {url} failed: {last_error}, retrying in {}ms",
                        options.retry_delay.as_millis()
                    );
                    tokio::time::sleep(options.retry_delay).await;
                }
            }
        }
    }
    Err(format!("{last_error} (after {attempts} attempts)"))
}

async fn fetch_once(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// Persist the fetched document as a pretty-printed cache. Failures are only logged.
fn save_cache(path: &Path, value: &serde_json::Value) {
    let result = serde_json::to_string_pretty(value)
        .map_err(|e| e.to_string())
        .and_then(|text| {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| e.to_string())?;
            }
            fs::write(path, text).map_err(|e| e.to_string())
        });
    match result {
        Ok(()) => info!("cached OpenAPI document at {}", path.display()),
        Err(e) => warn!("could not cache OpenAPI document at {}: {e}", path.display()),
    }
}
