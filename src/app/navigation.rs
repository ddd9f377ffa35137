use super::*;
use crate::models::{BootstrapResponse, DirContentResponse, FileContentResponse};

impl App {
    // === 조회 / 탐색 ===

    /// 두 패널 목록 (첫 진입)
    ///
    /// 토큰이 없거나 유효하지 않으면 두 패널 모두 기본 경로에서 시작한다.
    pub fn bootstrap(&self, token: Option<&str>) -> Result<BootstrapResponse> {
        let state = match token {
            Some(_) => self.restore_state(token).unwrap_or_else(|_| {
                tracing::debug!("ignoring invalid panel token on bootstrap");
                self.default_state()
            }),
            None => self.default_state(),
        };

        let (left, right) = state.paths();
        Ok(BootstrapResponse {
            left_panel: self.guard.list_directory(left)?,
            right_panel: self.guard.list_directory(right)?,
            token: self.issue_token(&state)?,
        })
    }

    /// 디렉토리 이동
    ///
    /// 이동한 패널이 활성 패널이 되고 선택 인덱스는 처음으로 돌아간다.
    pub fn change_dir(
        &self,
        token: Option<&str>,
        panel: PanelIndex,
        dir_path: &str,
    ) -> Result<DirContentResponse> {
        let mut state = self.restore_state(token)?;
        state.change_dir(panel, dir_path, &self.guard)?;
        state.active_panel = panel;
        state.active_element_index = 0;

        tracing::debug!(panel = %panel, path = %state.path(panel).display(), "changed directory");
        Ok(DirContentResponse {
            dir_content: self.guard.list_directory(state.path(panel))?,
            token: self.issue_token(&state)?,
        })
    }

    /// 파일 내용 읽기
    pub fn file_content(
        &self,
        token: Option<&str>,
        panel: PanelIndex,
        file_name: &str,
    ) -> Result<FileContentResponse> {
        let state = self.restore_state(token)?;
        let file_content = self.guard.read_file(state.path(panel), file_name)?;

        Ok(FileContentResponse {
            file_content,
            token: self.issue_token(&state)?,
        })
    }
}
