//! `GET /` on the webhook server: serves the bot log file as plain text.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

/// Router with the log viewer at `/`.
pub fn log_viewer_router(log_file: impl Into<PathBuf>) -> Router {
    Router::new()
        .route("/", get(show_log))
        .with_state(Arc::new(log_file.into()))
}

async fn show_log(State(log_file): State<Arc<PathBuf>>) -> Response {
    match tokio::fs::read(log_file.as_path()).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            String::from_utf8_lossy(&bytes).into_owned(),
        )
            .into_response(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            (StatusCode::NOT_FOUND, "Log file not found.").into_response()
        }
        Err(e) => {
            error!(error = %e, path = %log_file.display(), "Failed to read log file");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error loading log.").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn get_root(router: Router) -> (StatusCode, Option<String>, String) {
        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let cache = response
            .headers()
            .get(header::CACHE_CONTROL)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, cache, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn serves_log_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.log");
        std::fs::write(&path, "2026-01-01 10:00:00 INFO nancy: started\n").unwrap();

        let router = log_viewer_router(&path);
        let response = router
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );

        let (status, cache, body) = get_root(router).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("no-cache"));
        assert_eq!(body, "2026-01-01 10:00:00 INFO nancy: started\n");
    }

    #[tokio::test]
    async fn missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();

        let (status, _, body) = get_root(log_viewer_router(dir.path().join("absent.log"))).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Log file not found.");
    }

    #[tokio::test]
    async fn unreadable_path_is_500() {
        let dir = tempfile::tempdir().unwrap();

        // Reading a directory as a file fails with something other than NotFound.
        let (status, _, body) = get_root(log_viewer_router(dir.path())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Error loading log.");
    }
}
