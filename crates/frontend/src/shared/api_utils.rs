//! API utilities for frontend-backend communication
//!
//! Two origins are involved: the external REST service (documents, chunks,
//! conversations, auth) and the same origin that served the bundle, which
//! hosts the upload bridge.

/// Base URL of the REST service, fixed at build time.
///
/// Set `BACKEND_API_URL` when running `trunk build`; falls back to the local
/// development server.
pub fn api_base() -> String {
    option_env!("BACKEND_API_URL")
        .unwrap_or("http://localhost:8000/api")
        .trim_end_matches('/')
        .to_string()
}

/// Build a full API URL from a resource path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("ai/document/3/");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

/// Build an URL on the origin that served the bundle (`/api/upload`).
pub fn same_origin_url(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    join_url(&origin, path)
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
