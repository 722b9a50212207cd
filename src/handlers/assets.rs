use std::path::{Component, Path, PathBuf};

use lambda_http::http::header::CONTENT_TYPE;
use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Request, Response};
use tracing::warn;

use crate::common::errors::Error;
use crate::common::utils::text_response;
use crate::Services;

const INDEX_FILE: &str = "index.html";

/// Maps a request path onto a path relative to the static directory.
///
/// `/` becomes `index.html`. Anything that is not a plain sequence of names
/// (`..`, a root, a drive prefix) is refused.
pub fn resolve_asset(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return Some(INDEX_FILE.into());
    }

    let mut relative = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            _ => return None,
        }
    }

    Some(relative)
}

pub fn content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|val| val.to_str())
        .map(|val| val.to_ascii_lowercase());

    match extension.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

pub fn not_found(method: &Method, path: &str) -> Result<Response<Body>, Error> {
    text_response(StatusCode::NOT_FOUND, format!("Cannot {method} {path}"))
}

#[tracing::instrument(skip_all, fields(method = %request.method(), path = %request.uri().path()))]
pub async fn process_request(
    request: Request,
    services: &Services,
) -> Result<Response<Body>, Error> {
    let path = request.uri().path();
    let Some(relative) = resolve_asset(path) else {
        warn!("Refused static path {}", path);
        return not_found(request.method(), path);
    };

    let mut file = services.config.static_dir.join(&relative);
    // directories serve their index, as express.static does
    if tokio::fs::metadata(&file).await.is_ok_and(|val| val.is_dir()) {
        file.push(INDEX_FILE);
    }

    let contents = match tokio::fs::read(&file).await {
        Ok(val) => val,
        Err(_) => return not_found(request.method(), path),
    };

    let body = if *request.method() == Method::HEAD {
        Body::Empty
    } else {
        Body::Binary(contents)
    };

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type(&file))
        .body(body)?;

    Ok(response)
}
