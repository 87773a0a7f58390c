use std::path::Path;

use axum::http::{HeaderValue, Method};
use folio_core::FolioConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Load the YAML config when given, fall back to defaults, then layer the environment on top
pub fn load_config(path: Option<&Path>) -> anyhow::Result<FolioConfig> {
    let mut config = match path {
        Some(path) => FolioConfig::load(path)?,
        None => FolioConfig::default(),
    };
    config.apply_env();
    Ok(config)
}

/// `*` anywhere in the list opens the API to every origin
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let mut parsed = Vec::new();
    for origin in origins {
        match HeaderValue::from_str(origin) {
            Ok(value) => parsed.push(value),
            Err(e) => log::warn!("Ignoring invalid CORS origin '{}': {}", origin, e),
        }
    }
    layer.allow_origin(AllowOrigin::list(parsed))
}
