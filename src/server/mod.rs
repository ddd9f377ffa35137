// Server Layer - HTTP 라우팅, 요청 추출, 에러 응답
pub mod error;
mod handlers;


use crate::app::App;
use axum::routing::{get, post};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// 핸들러 간 공유 상태 (읽기 전용)
pub type AppState = Arc<App>;

/// API 라우터 구성
///
/// `static_dir`가 존재하는 디렉토리면 API 이외의 경로를 정적 파일로 제공한다.
pub fn router(app: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/api/all", get(handlers::bootstrap))
        .route("/api/dirs/:panel", post(handlers::create_directory))
        .route("/api/dirs/:panel/*dir_path", get(handlers::change_dir))
        .route("/api/files/:panel", post(handlers::create_file))
        .route(
            "/api/files/:panel/:file_name",
            get(handlers::file_content).put(handlers::update_file),
        )
        .route("/api/rename_request/:panel", post(handlers::rename))
        .route("/api/delete_request/:panel", post(handlers::delete_batch))
        .route("/api/move_request/:panel", post(handlers::move_batch))
        .route("/api/copy_request/:panel", post(handlers::copy_batch))
        .with_state(app);

    let api = match static_dir {
        Some(dir) if dir.is_dir() => {
            tracing::info!(dir = %dir.display(), "serving static UI");
            api.fallback_service(ServeDir::new(dir))
        }
        Some(dir) => {
            tracing::warn!(dir = %dir.display(), "static_dir is not a directory, UI disabled");
            api
        }
        None => api,
    };

    api.layer(TraceLayer::new_for_http())
}
