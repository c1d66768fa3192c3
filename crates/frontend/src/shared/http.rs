//! Bearer-authenticated JSON requests against the REST service.
//!
//! Every helper issues exactly one request. A 401 becomes
//! [`ApiError::SessionExpired`]; what to do about it is decided by the
//! session context, never here.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::api_utils::api_url;
use crate::system::auth::storage;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    let token = storage::get_token().unwrap_or_default();
    builder.header("Authorization", &format!("Bearer {}", token))
}

/// `path?query` with the query serialized by `serde_qs`.
pub fn with_query<Q: Serialize>(path: &str, query: &Q) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Decode(e.to_string()))?;
    if qs.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, qs))
    }
}

/// Human-readable message of an error body: its `detail` or `error` field,
/// else `fallback`.
pub fn error_message(body: &str, fallback: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback.to_string();
    };
    ["detail", "error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

async fn check(response: Response, fallback: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if status == 401 {
        log::warn!("{} answered 401, session expired", response.url());
        return Err(ApiError::SessionExpired);
    }
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Http {
            status,
            message: error_message(&body, fallback),
        });
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

pub async fn get_json<T: DeserializeOwned>(path: &str, fallback: &str) -> Result<T, ApiError> {
    let response = with_auth(Request::get(&api_url(path)))
        .send()
        .await
        .map_err(network)?;
    decode(check(response, fallback).await?).await
}

pub async fn post_json<B, T>(path: &str, body: &B, fallback: &str) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let response = with_auth(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(network)?;
    decode(check(response, fallback).await?).await
}

/// POST whose answer body is not needed.
pub async fn post<B: Serialize>(path: &str, body: &B, fallback: &str) -> Result<(), ApiError> {
    let response = with_auth(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(network)?;
    check(response, fallback).await.map(|_| ())
}

/// POST without the bearer header, for the login endpoint.
pub async fn post_json_anonymous<B, T>(path: &str, body: &B, fallback: &str) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let response = Request::post(&api_url(path))
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(network)?;
    decode(check(response, fallback).await?).await
}

pub async fn delete(path: &str, fallback: &str) -> Result<(), ApiError> {
    let response = with_auth(Request::delete(&api_url(path)))
        .send()
        .await
        .map_err(network)?;
    check(response, fallback).await.map(|_| ())
}
