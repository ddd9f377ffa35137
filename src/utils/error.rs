use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TwinPanelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    // === 요청 검증 ===
    #[error("Invalid panel index: {0}")]
    InvalidPanelIndex(String),

    #[error("Missing or invalid panel paths token")]
    InvalidToken,

    #[error("Failed to encode panel paths token: {0}")]
    TokenEncode(String),

    #[error("Invalid name: '{name}'")]
    InvalidName { name: String },

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // === 파일 시스템 ===
    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Path is outside of the served root: {path}")]
    OutsideRoot { path: PathBuf },

    #[error("'{name}' does not exist")]
    ItemNotFound { name: String },

    #[error("'{name}' already exists")]
    AlreadyExists { name: String },

    #[error("File already exists: {path}")]
    FileExists { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("File is not valid UTF-8 text: {path}")]
    NotText { path: PathBuf },

    #[error("Refusing to operate on '{name}'")]
    ProtectedEntry { name: String },

    #[error("Copy failed: {src} -> {dest} ({reason})")]
    CopyFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Move failed: {src} -> {dest} ({reason})")]
    MoveFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Rename failed: {src} -> {dest} ({reason})")]
    RenameFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Delete failed: {path} ({reason})")]
    DeleteFailed { path: PathBuf, reason: String },
}

impl TwinPanelError {
    /// I/O 에러를 경로 정보가 담긴 에러로 변환
    ///
    /// 권한 문제는 `PermissionDenied`로, 나머지는 `fallback`으로 변환한다.
    pub fn from_io(
        err: std::io::Error,
        path: &std::path::Path,
        fallback: impl FnOnce(std::io::Error) -> TwinPanelError,
    ) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            TwinPanelError::PermissionDenied {
                path: path.to_path_buf(),
            }
        } else {
            fallback(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, TwinPanelError>;
