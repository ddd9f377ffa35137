//! 작업별 응답 레코드
//!
//! 모든 응답은 다음 요청에 사용할 새 토큰(`token`)을 포함한다.

use crate::models::file_entry::DirectoryListing;
use crate::models::panel_state::PanelIndex;
use serde::Serialize;

/// 작업 후 새로 읽은 패널 목록
///
/// 직렬화 시 `reloaded_panel_0`, `reloaded_panel_1` 키로 펼쳐진다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReloadedPanels {
    #[serde(rename = "reloaded_panel_0", skip_serializing_if = "Option::is_none")]
    pub left: Option<DirectoryListing>,
    #[serde(rename = "reloaded_panel_1", skip_serializing_if = "Option::is_none")]
    pub right: Option<DirectoryListing>,
}

impl ReloadedPanels {
    pub fn set(&mut self, panel: PanelIndex, listing: DirectoryListing) {
        match panel {
            PanelIndex::Left => self.left = Some(listing),
            PanelIndex::Right => self.right = Some(listing),
        }
    }
}

/// `GET /api/all`
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapResponse {
    pub left_panel: DirectoryListing,
    pub right_panel: DirectoryListing,
    pub token: String,
}

/// `GET /api/dirs/{panel}/{path}`
#[derive(Debug, Clone, Serialize)]
pub struct DirContentResponse {
    pub dir_content: DirectoryListing,
    pub token: String,
}

/// `GET /api/files/{panel}/{name}`
#[derive(Debug, Clone, Serialize)]
pub struct FileContentResponse {
    pub file_content: String,
    pub token: String,
}

/// 단일 작업 (생성, 수정, 이름 변경)
#[derive(Debug, Clone, Serialize)]
pub struct OperationResponse {
    pub success: bool,
    #[serde(flatten)]
    pub reloaded: ReloadedPanels,
    pub token: String,
}

/// 배치 작업 (삭제, 이동, 복사)
#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    pub success: bool,
    #[serde(flatten)]
    pub reloaded: ReloadedPanels,
    pub failed_items: Vec<String>,
    pub token: String,
}

/// 에러 응답 본문
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_response_flattens_reloaded_panels() {
        let mut reloaded = ReloadedPanels::default();
        reloaded.set(PanelIndex::Right, DirectoryListing::default());

        let value = serde_json::to_value(OperationResponse {
            success: true,
            reloaded,
            token: "t".to_string(),
        })
        .unwrap();

        assert_eq!(value["success"], true);
        assert!(value.get("reloaded_panel_1").is_some());
        assert!(value.get("reloaded_panel_0").is_none());
        assert_eq!(value["token"], "t");
    }

    #[test]
    fn test_batch_response_shape() {
        let mut reloaded = ReloadedPanels::default();
        reloaded.set(PanelIndex::Left, DirectoryListing::default());
        reloaded.set(PanelIndex::Right, DirectoryListing::default());

        let value = serde_json::to_value(BatchResponse {
            success: false,
            reloaded,
            failed_items: vec!["ghost".to_string()],
            token: "t".to_string(),
        })
        .unwrap();

        assert_eq!(value["failed_items"][0], "ghost");
        assert!(value.get("reloaded_panel_0").is_some());
        assert!(value.get("reloaded_panel_1").is_some());
    }
}
