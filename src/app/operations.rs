use super::*;
use crate::core::OperationDispatcher;
use crate::models::{BatchItem, BatchKind, BatchResponse, ItemKind, OperationResponse};
use std::path::Path;

impl App {
    // === 단일 작업 (생성 / 수정 / 이름 변경) ===

    /// 새 디렉토리 생성
    pub fn create_directory(
        &self,
        token: Option<&str>,
        panel: PanelIndex,
        name: &str,
    ) -> Result<OperationResponse> {
        let state = self.restore_state(token)?;
        self.ensure_absent(state.path(panel), name)?;

        let result = self.guard.create_directory(state.path(panel), name);
        self.finish_single("create directory", name, result, state, panel)
    }

    /// 빈 파일 생성
    pub fn create_file(
        &self,
        token: Option<&str>,
        panel: PanelIndex,
        name: &str,
    ) -> Result<OperationResponse> {
        let state = self.restore_state(token)?;
        self.ensure_absent(state.path(panel), name)?;

        let result = self.guard.create_file(state.path(panel), name);
        self.finish_single("create file", name, result, state, panel)
    }

    /// 기존 파일 내용 덮어쓰기
    pub fn update_file(
        &self,
        token: Option<&str>,
        panel: PanelIndex,
        name: &str,
        content: &str,
    ) -> Result<OperationResponse> {
        let state = self.restore_state(token)?;
        if self.guard.classify(state.path(panel), name) != ItemKind::File {
            return Err(TwinPanelError::ItemNotFound {
                name: name.to_string(),
            });
        }

        let result = self.guard.write_file(state.path(panel), name, content);
        self.finish_single("update file", name, result, state, panel)
    }

    /// 이름 변경
    pub fn rename(
        &self,
        token: Option<&str>,
        panel: PanelIndex,
        old_name: &str,
        new_name: &str,
    ) -> Result<OperationResponse> {
        let mut state = self.restore_state(token)?;
        let success =
            OperationDispatcher::new(&self.guard).rename(state.path(panel), old_name, new_name)?;

        let reloaded = self.reload(&mut state, &[panel]);
        Ok(OperationResponse {
            success,
            reloaded,
            token: self.issue_token(&state)?,
        })
    }

    // === 배치 작업 ===

    /// 배치 삭제 (소스 패널만 새로고침)
    pub fn delete_batch(
        &self,
        token: Option<&str>,
        panel: PanelIndex,
        items: &[BatchItem],
    ) -> Result<BatchResponse> {
        self.run_batch(token, panel, BatchKind::Delete, items)
    }

    /// 배치 이동 (두 패널 모두 새로고침)
    pub fn move_batch(
        &self,
        token: Option<&str>,
        panel: PanelIndex,
        items: &[BatchItem],
    ) -> Result<BatchResponse> {
        self.run_batch(token, panel, BatchKind::Move, items)
    }

    /// 배치 복사 (두 패널 모두 새로고침)
    pub fn copy_batch(
        &self,
        token: Option<&str>,
        panel: PanelIndex,
        items: &[BatchItem],
    ) -> Result<BatchResponse> {
        self.run_batch(token, panel, BatchKind::Copy, items)
    }

    fn run_batch(
        &self,
        token: Option<&str>,
        panel: PanelIndex,
        kind: BatchKind,
        items: &[BatchItem],
    ) -> Result<BatchResponse> {
        let mut state = self.restore_state(token)?;
        let report = OperationDispatcher::new(&self.guard).run_batch(kind, &state, panel, items);

        let targeted: &[PanelIndex] = if kind.touches_target_panel() {
            &PanelIndex::ALL
        } else {
            std::slice::from_ref(&panel)
        };
        let reloaded = self.reload(&mut state, targeted);

        Ok(BatchResponse {
            success: report.is_complete_success(),
            reloaded,
            failed_items: report.failed_items,
            token: self.issue_token(&state)?,
        })
    }

    // === 공통 ===

    /// 같은 이름의 항목이 없어야 한다 (생성 전 검사)
    fn ensure_absent(&self, base: &Path, name: &str) -> Result<()> {
        let path = self.guard.entry_path(base, name)?;
        if self.guard.exists(&path) {
            return Err(TwinPanelError::AlreadyExists {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// 단일 작업 결과를 응답으로 변환
    ///
    /// 파일 시스템 실패는 `success: false`로 보고하고 원인은 로그로 남긴다.
    fn finish_single(
        &self,
        action: &str,
        name: &str,
        result: Result<()>,
        mut state: PanelState,
        panel: PanelIndex,
    ) -> Result<OperationResponse> {
        let success = match result {
            Ok(()) => {
                tracing::debug!(action, name, panel = %panel, "operation succeeded");
                true
            }
            Err(err) => {
                tracing::warn!(action, name, panel = %panel, error = %err, "operation failed");
                false
            }
        };

        let reloaded = self.reload(&mut state, &[panel]);
        Ok(OperationResponse {
            success,
            reloaded,
            token: self.issue_token(&state)?,
        })
    }
}
