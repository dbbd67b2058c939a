//! martservice URL builders

use crate::error::{OrthoError, Result};
use reqwest::Url;

/// Build the martservice base URL from host, optional port and path
///
/// A host without a scheme is treated as plain HTTP, the way Ensembl
/// publishes its mirrors.
pub fn martservice_url(host: &str, port: Option<u16>, path: &str) -> Result<Url> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        return Err(OrthoError::config("BioMart host must not be empty"));
    }

    let with_scheme = if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    };

    let mut url = Url::parse(&with_scheme)
        .map_err(|e| OrthoError::config(format!("Invalid BioMart host '{}': {}", host, e)))?;

    if let Some(port) = port {
        url.set_port(Some(port))
            .map_err(|_| OrthoError::config(format!("Cannot set port on host '{}'", host)))?;
    }

    url.set_path(&format!("/{}", path.trim_start_matches('/')));
    Ok(url)
}

/// Query parameters for the mart registry
pub fn registry_params() -> [(&'static str, String); 1] {
    [("type", "registry".to_string())]
}

/// Query parameters for the dataset list of `mart`
pub fn datasets_params(mart: &str) -> [(&'static str, String); 2] {
    [("type", "datasets".to_string()), ("mart", mart.to_string())]
}

/// Query parameters carrying a query document
pub fn query_params(xml: String) -> [(&'static str, String); 1] {
    [("query", xml)]
}
