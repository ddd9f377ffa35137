//! 파일 작업 모델
//!
//! 배치 삭제/이동/복사 요청과 그 결과에 필요한 데이터 구조 정의

use serde::Deserialize;

/// 배치 요청의 한 항목
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchItem {
    /// 소스 패널 기준 항목 이름
    #[serde(rename = "file_name")]
    pub name: String,
}

impl BatchItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// 배치 작업 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    /// 삭제
    Delete,
    /// 이동
    Move,
    /// 복사
    Copy,
}

impl BatchKind {
    /// 작업 유형 이름 반환
    pub fn name(&self) -> &'static str {
        match self {
            BatchKind::Delete => "delete",
            BatchKind::Move => "move",
            BatchKind::Copy => "copy",
        }
    }

    /// 반대편 패널에도 영향을 주는 작업인지
    pub fn touches_target_panel(&self) -> bool {
        matches!(self, BatchKind::Move | BatchKind::Copy)
    }

    /// 항목 분류 결과에 맞는 파일 시스템 작업 선택
    ///
    /// 존재하지 않는 항목은 `None`.
    pub fn operation_for(&self, kind: ItemKind) -> Option<FsOperation> {
        match (self, kind) {
            (_, ItemKind::NotFound) => None,
            (BatchKind::Delete, ItemKind::File) => Some(FsOperation::DeleteFile),
            (BatchKind::Delete, ItemKind::Directory) => Some(FsOperation::DeleteDir),
            (BatchKind::Move, _) => Some(FsOperation::Move),
            (BatchKind::Copy, ItemKind::File) => Some(FsOperation::CopyFile),
            (BatchKind::Copy, ItemKind::Directory) => Some(FsOperation::CopyDir),
        }
    }
}

/// 단일 항목에 적용되는 파일 시스템 작업
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOperation {
    /// 이동 (파일/디렉토리 공통)
    Move,
    /// 파일 복사 (메타데이터 보존)
    CopyFile,
    /// 디렉토리 재귀 복사
    CopyDir,
    /// 파일 삭제
    DeleteFile,
    /// 디렉토리 재귀 삭제
    DeleteDir,
}

impl FsOperation {
    /// 대상 패널 경로가 필요한 작업인지
    pub fn needs_target(&self) -> bool {
        matches!(
            self,
            FsOperation::Move | FsOperation::CopyFile | FsOperation::CopyDir
        )
    }
}

/// 항목 분류 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// 일반 파일
    File,
    /// 디렉토리
    Directory,
    /// 존재하지 않음
    NotFound,
}

/// 배치 작업 결과
///
/// 실패 목록에 없는 항목은 모두 성공한 것으로 간주한다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// 실패한 항목 이름 (요청 순서 유지)
    pub failed_items: Vec<String>,
    /// 성공한 항목 수
    pub succeeded: usize,
}

impl BatchReport {
    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, name: &str) {
        self.failed_items.push(name.to_string());
    }

    /// 모든 항목이 성공했는지
    pub fn is_complete_success(&self) -> bool {
        self.failed_items.is_empty()
    }
}
