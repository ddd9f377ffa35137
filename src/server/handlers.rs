use super::error::ApiError;
use super::AppState;
use crate::app::App;
use crate::core::TOKEN_HEADER;
use crate::models::{
    BatchItem, BatchResponse, BootstrapResponse, DirContentResponse, FileContentResponse,
    OperationResponse, PanelIndex,
};
use crate::utils::error::{Result, TwinPanelError};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct CreateDirRequest {
    directory_name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateFileRequest {
    file_name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateFileRequest {
    content: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RenameRequest {
    old_name: String,
    new_name: String,
}

// === 추출 헬퍼 ===

/// 헤더에서 패널 상태 토큰 추출 (없거나 ASCII가 아니면 None)
fn token_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn path_params<T>(params: std::result::Result<Path<T>, PathRejection>) -> Result<T> {
    params
        .map(|Path(value)| value)
        .map_err(|rejection| TwinPanelError::InvalidBody(rejection.body_text()))
}

fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| TwinPanelError::InvalidBody(rejection.body_text()))
}

/// 파일 시스템 작업은 블로킹 스레드에서 실행
async fn run_blocking<T, F>(app: AppState, work: F) -> std::result::Result<Json<T>, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&App) -> Result<T> + Send + 'static,
{
    let response = tokio::task::spawn_blocking(move || work(&*app)).await??;
    Ok(Json(response))
}

// === 조회 / 탐색 ===

pub(super) async fn bootstrap(
    State(app): State<AppState>,
    headers: HeaderMap,
) -> std::result::Result<Json<BootstrapResponse>, ApiError> {
    let token = token_from(&headers);
    run_blocking(app, move |app| app.bootstrap(token.as_deref())).await
}

pub(super) async fn change_dir(
    State(app): State<AppState>,
    headers: HeaderMap,
    params: std::result::Result<Path<(String, String)>, PathRejection>,
) -> std::result::Result<Json<DirContentResponse>, ApiError> {
    let (panel, dir_path) = path_params(params)?;
    let panel = PanelIndex::parse(&panel)?;
    let token = token_from(&headers);
    run_blocking(app, move |app| {
        app.change_dir(token.as_deref(), panel, &dir_path)
    })
    .await
}

pub(super) async fn file_content(
    State(app): State<AppState>,
    headers: HeaderMap,
    params: std::result::Result<Path<(String, String)>, PathRejection>,
) -> std::result::Result<Json<FileContentResponse>, ApiError> {
    let (panel, file_name) = path_params(params)?;
    let panel = PanelIndex::parse(&panel)?;
    let token = token_from(&headers);
    run_blocking(app, move |app| {
        app.file_content(token.as_deref(), panel, &file_name)
    })
    .await
}

// === 단일 작업 ===

pub(super) async fn create_directory(
    State(app): State<AppState>,
    headers: HeaderMap,
    params: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<CreateDirRequest>, JsonRejection>,
) -> std::result::Result<Json<OperationResponse>, ApiError> {
    let panel = PanelIndex::parse(&path_params(params)?)?;
    let request = json_body(body)?;
    let token = token_from(&headers);
    run_blocking(app, move |app| {
        app.create_directory(token.as_deref(), panel, &request.directory_name)
    })
    .await
}

pub(super) async fn create_file(
    State(app): State<AppState>,
    headers: HeaderMap,
    params: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<CreateFileRequest>, JsonRejection>,
) -> std::result::Result<Json<OperationResponse>, ApiError> {
    let panel = PanelIndex::parse(&path_params(params)?)?;
    let request = json_body(body)?;
    let token = token_from(&headers);
    run_blocking(app, move |app| {
        app.create_file(token.as_deref(), panel, &request.file_name)
    })
    .await
}

pub(super) async fn update_file(
    State(app): State<AppState>,
    headers: HeaderMap,
    params: std::result::Result<Path<(String, String)>, PathRejection>,
    body: std::result::Result<Json<UpdateFileRequest>, JsonRejection>,
) -> std::result::Result<Json<OperationResponse>, ApiError> {
    let (panel, file_name) = path_params(params)?;
    let panel = PanelIndex::parse(&panel)?;
    let request = json_body(body)?;
    let token = token_from(&headers);
    run_blocking(app, move |app| {
        app.update_file(token.as_deref(), panel, &file_name, &request.content)
    })
    .await
}

pub(super) async fn rename(
    State(app): State<AppState>,
    headers: HeaderMap,
    params: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<RenameRequest>, JsonRejection>,
) -> std::result::Result<Json<OperationResponse>, ApiError> {
    let panel = PanelIndex::parse(&path_params(params)?)?;
    let request = json_body(body)?;
    let token = token_from(&headers);
    run_blocking(app, move |app| {
        app.rename(
            token.as_deref(),
            panel,
            &request.old_name,
            &request.new_name,
        )
    })
    .await
}

// === 배치 작업 ===

pub(super) async fn delete_batch(
    State(app): State<AppState>,
    headers: HeaderMap,
    params: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<Vec<BatchItem>>, JsonRejection>,
) -> std::result::Result<Json<BatchResponse>, ApiError> {
    let panel = PanelIndex::parse(&path_params(params)?)?;
    let items = json_body(body)?;
    let token = token_from(&headers);
    run_blocking(app, move |app| {
        app.delete_batch(token.as_deref(), panel, &items)
    })
    .await
}

pub(super) async fn move_batch(
    State(app): State<AppState>,
    headers: HeaderMap,
    params: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<Vec<BatchItem>>, JsonRejection>,
) -> std::result::Result<Json<BatchResponse>, ApiError> {
    let panel = PanelIndex::parse(&path_params(params)?)?;
    let items = json_body(body)?;
    let token = token_from(&headers);
    run_blocking(app, move |app| app.move_batch(token.as_deref(), panel, &items)).await
}

pub(super) async fn copy_batch(
    State(app): State<AppState>,
    headers: HeaderMap,
    params: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<Vec<BatchItem>>, JsonRejection>,
) -> std::result::Result<Json<BatchResponse>, ApiError> {
    let panel = PanelIndex::parse(&path_params(params)?)?;
    let items = json_body(body)?;
    let token = token_from(&headers);
    run_blocking(app, move |app| app.copy_batch(token.as_deref(), panel, &items)).await
}
