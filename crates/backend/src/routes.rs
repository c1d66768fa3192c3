use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use contracts::shared::upload::MAX_FILE_SIZE;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::shared::config::Config;
use crate::shared::storage::ObjectStore;
use crate::system::middleware::request_logger::request_logger;
use crate::usecases::u501_object_upload::UploadExecutor;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn uploads(&self) -> UploadExecutor {
        UploadExecutor::new(self.store.clone(), self.config.storage.key_prefix.clone())
    }
}

/// Upload bridge routes. Everything else falls through to the compiled
/// frontend bundle.
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/upload",
            post(handlers::upload::upload)
                .layer(DefaultBodyLimit::max(MAX_FILE_SIZE as usize + MULTIPART_OVERHEAD)),
        )
        .route("/api/files", post(handlers::files::presign))
        .with_state(state)
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::{ServerConfig, StorageConfig};
    use crate::shared::storage::memory::MemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    const BOUNDARY: &str = "X-TEST-BOUNDARY";

    fn app(store: Arc<MemoryStore>) -> Router {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
                static_dir: "dist".into(),
            },
            storage: StorageConfig {
                bucket: "test-bucket".into(),
                region: "us-east-1".into(),
                key_prefix: "uploads/".into(),
            },
        };
        configure_routes(AppState {
            store,
            config: Arc::new(config),
        })
    }

    fn multipart_request(field: &str, file_name: &str, content: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/api/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::new(MemoryStore::default()))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upload_stores_under_knowledge_base() {
        let store = Arc::new(MemoryStore::default());
        let response = app(store.clone())
            .oneshot(multipart_request("file", "Handbook.pdf", b"%PDF-1.4 test"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let key = body["file_url"].as_str().unwrap().to_string();
        assert!(key.starts_with("knowledge-base/"));
        assert!(key.ends_with("-Handbook.pdf"));

        let stored = store.get(&key).unwrap();
        assert_eq!(stored.bytes, b"%PDF-1.4 test".to_vec());
        assert_eq!(stored.content_type, "application/pdf");
    }

    #[tokio::test]
    async fn test_upload_without_file_field() {
        let store = Arc::new(MemoryStore::default());
        let response = app(store.clone())
            .oneshot(multipart_request("attachment", "a.pdf", b"x"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "No file provided");
        assert!(store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_upload_store_failure() {
        let response = app(Arc::new(MemoryStore::failing()))
            .oneshot(multipart_request("file", "a.pdf", b"x"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "Failed to upload file");
    }

    #[tokio::test]
    async fn test_presign_sanitizes_name() {
        let response = app(Arc::new(MemoryStore::default()))
            .oneshot(json_request(
                "/api/files",
                serde_json::json!({
                    "folder": "profile-pictures/",
                    "fileName": "me at\u{00A0}home.png",
                    "fileSize": 1024,
                    "contentType": "image/png"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let key = body["key"].as_str().unwrap();
        assert!(key.ends_with("-me_at_home.png"));
        assert_eq!(
            body["getPresignedUrl"],
            format!(
                "https://test-bucket.s3.us-east-1.amazonaws.com/app-images/profile-pictures/{}",
                key
            )
        );
        assert!(body["presignedUrl"].as_str().unwrap().contains("image%2Fpng"));
    }

    #[tokio::test]
    async fn test_presign_requires_file_name() {
        let response = app(Arc::new(MemoryStore::default()))
            .oneshot(json_request("/api/files", serde_json::json!({ "folder": "docs/" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "fileName is required");
    }

    #[tokio::test]
    async fn test_upload_over_the_limit_is_rejected_with_size_message() {
        let store = Arc::new(MemoryStore::default());
        let oversized = vec![b'x'; MAX_FILE_SIZE as usize + MULTIPART_OVERHEAD + 1];
        let response = app(store.clone())
            .oneshot(multipart_request("file", "big.pdf", &oversized))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            json_body(response).await["error"],
            "File size too large. Maximum size is 10MB"
        );
        assert!(store.keys().is_empty());
    }
}
