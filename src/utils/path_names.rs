//! 클라이언트가 보낸 이름/경로 검증 및 정규화
//!
//! 생성/이름 변경/배치 작업의 이름은 단일 경로 세그먼트만 허용한다.
//! 디렉토리 이동 경로는 상대 경로(여러 세그먼트, `..` 포함)를 허용하되
//! 절대 경로는 거부한다.

use crate::utils::error::{Result, TwinPanelError};
use std::path::{Component, Path, PathBuf};

/// 단일 세그먼트 이름 검증
///
/// 빈 문자열, 경로 구분자 포함, `.`/`..`, NUL 문자는 거부한다.
pub fn validate_entry_name(name: &str) -> Result<&str> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');

    if invalid {
        return Err(TwinPanelError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(name)
}

/// 디렉토리 이동용 상대 경로 검증
pub fn validate_relative_path(relative: &str) -> Result<&Path> {
    let path = Path::new(relative);
    if relative.is_empty() || relative.contains('\0') || path.has_root() {
        return Err(TwinPanelError::InvalidName {
            name: relative.to_string(),
        });
    }
    Ok(path)
}

/// 파일 시스템 접근 없이 `.`/`..` 세그먼트를 접어 경로를 정규화
///
/// 루트 위로 올라가는 `..`은 무시된다 (`/..` → `/`).
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(name) => normalized.push(name),
        }
    }
    normalized
}
