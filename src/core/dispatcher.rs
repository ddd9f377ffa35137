use crate::models::operation::{BatchItem, BatchKind, BatchReport, FsOperation, ItemKind};
use crate::models::panel_state::{PanelIndex, PanelState};
use crate::system::filesystem::PathGuard;
use crate::utils::error::{Result, TwinPanelError};
use std::path::Path;

/// 배치 작업 실행기
///
/// 항목마다 분류 → 충돌 검사 → 작업 순으로 처리하며, 실패해도 나머지 항목을 계속 처리한다.
#[derive(Debug, Clone, Copy)]
pub struct OperationDispatcher<'a> {
    guard: &'a PathGuard,
}

impl<'a> OperationDispatcher<'a> {
    pub fn new(guard: &'a PathGuard) -> Self {
        Self { guard }
    }

    /// 배치 삭제/이동/복사
    ///
    /// 소스는 `source` 패널, 이동/복사 대상은 반대편 패널의 현재 디렉토리.
    pub fn run_batch(
        &self,
        kind: BatchKind,
        state: &PanelState,
        source: PanelIndex,
        items: &[BatchItem],
    ) -> BatchReport {
        let source_base = state.path(source);
        let target_base = state.path(source.other());
        let mut report = BatchReport::default();

        for item in items {
            match self.process_item(kind, source_base, target_base, &item.name) {
                Ok(()) => report.record_success(),
                Err(err) => {
                    tracing::warn!(
                        operation = kind.name(),
                        item = %item.name,
                        error = %err,
                        "batch item failed"
                    );
                    report.record_failure(&item.name);
                }
            }
        }

        tracing::debug!(
            operation = kind.name(),
            panel = %source,
            succeeded = report.succeeded,
            failed = report.failed_items.len(),
            "batch finished"
        );
        report
    }

    /// 단일 항목 처리
    fn process_item(
        &self,
        kind: BatchKind,
        source_base: &Path,
        target_base: &Path,
        name: &str,
    ) -> Result<()> {
        // 1. 분류
        let item_kind = self.guard.classify(source_base, name);
        let Some(operation) = kind.operation_for(item_kind) else {
            return Err(TwinPanelError::ItemNotFound {
                name: name.to_string(),
            });
        };

        // 2. 이동/복사는 덮어쓰지 않는다
        if operation.needs_target() {
            let target = self.guard.entry_path(target_base, name)?;
            if self.guard.exists(&target) {
                return Err(TwinPanelError::AlreadyExists {
                    name: name.to_string(),
                });
            }
        }

        // 3. 실행
        self.dispatch(operation, source_base, target_base, name)
    }

    /// 작업 종류에 맞는 파일 시스템 호출
    pub fn dispatch(
        &self,
        operation: FsOperation,
        source_base: &Path,
        target_base: &Path,
        name: &str,
    ) -> Result<()> {
        match operation {
            FsOperation::DeleteFile => self.guard.delete_file(source_base, name),
            FsOperation::DeleteDir => self.guard.delete_directory(source_base, name),
            FsOperation::Move | FsOperation::CopyFile | FsOperation::CopyDir => {
                self.guard
                    .move_or_copy(source_base, target_base, name, operation)
            }
        }
    }

    /// 이름 변경 (단일 항목)
    ///
    /// 검증 실패(없는 항목, 이름 충돌, 잘못된 이름)는 `Err`,
    /// 파일 시스템 호출 실패는 `Ok(false)`.
    pub fn rename(&self, base: &Path, old_name: &str, new_name: &str) -> Result<bool> {
        if self.guard.classify(base, old_name) == ItemKind::NotFound {
            return Err(TwinPanelError::ItemNotFound {
                name: old_name.to_string(),
            });
        }

        let target = self.guard.entry_path(base, new_name)?;
        if self.guard.exists(&target) {
            return Err(TwinPanelError::AlreadyExists {
                name: new_name.to_string(),
            });
        }

        match self.guard.rename(base, old_name, new_name) {
            Ok(()) => Ok(true),
            Err(err) => {
                tracing::warn!(old = %old_name, new = %new_name, error = %err, "rename failed");
                Ok(false)
            }
        }
    }
}
