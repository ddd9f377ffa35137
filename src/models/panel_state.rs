use crate::system::filesystem::PathGuard;
use crate::utils::error::{Result, TwinPanelError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// 패널 인덱스 (0 = 왼쪽, 1 = 오른쪽)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PanelIndex {
    #[default]
    Left,
    Right,
}

impl PanelIndex {
    pub const ALL: [PanelIndex; 2] = [PanelIndex::Left, PanelIndex::Right];

    /// URL 세그먼트에서 패널 인덱스 파싱
    ///
    /// `0`, `1` 이외의 값은 모두 `InvalidPanelIndex`.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim() {
            "0" => Ok(PanelIndex::Left),
            "1" => Ok(PanelIndex::Right),
            other => Err(TwinPanelError::InvalidPanelIndex(other.to_string())),
        }
    }

    /// 반대편 패널
    pub fn other(self) -> Self {
        match self {
            PanelIndex::Left => PanelIndex::Right,
            PanelIndex::Right => PanelIndex::Left,
        }
    }

    pub fn as_usize(self) -> usize {
        match self {
            PanelIndex::Left => 0,
            PanelIndex::Right => 1,
        }
    }
}

impl TryFrom<u8> for PanelIndex {
    type Error = TwinPanelError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(PanelIndex::Left),
            1 => Ok(PanelIndex::Right),
            other => Err(TwinPanelError::InvalidPanelIndex(other.to_string())),
        }
    }
}

impl From<PanelIndex> for u8 {
    fn from(index: PanelIndex) -> Self {
        index.as_usize() as u8
    }
}

impl fmt::Display for PanelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_usize())
    }
}

/// 두 패널의 커서 상태
///
/// 요청마다 토큰에서 복원되고, 응답 시 다시 토큰으로 인코딩된다.
/// 서버에 저장되지 않는다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    /// 패널별 현재 경로 (0 = 왼쪽, 1 = 오른쪽)
    paths: [PathBuf; 2],
    /// 활성 패널
    pub active_panel: PanelIndex,
    /// 활성 패널에서 선택된 항목 인덱스
    pub active_element_index: usize,
}

impl PanelState {
    /// 새 패널 상태 생성
    pub fn new(left: PathBuf, right: PathBuf) -> Self {
        Self {
            paths: [left, right],
            active_panel: PanelIndex::Left,
            active_element_index: 0,
        }
    }

    /// 두 패널 모두 기본 경로로 시작하는 상태 (첫 방문)
    pub fn with_default_path(path: &Path) -> Self {
        Self::new(path.to_path_buf(), path.to_path_buf())
    }

    /// 패널 경로 반환
    pub fn path(&self, panel: PanelIndex) -> &Path {
        &self.paths[panel.as_usize()]
    }

    /// 왼쪽/오른쪽 경로 반환
    pub fn paths(&self) -> (&Path, &Path) {
        (&self.paths[0], &self.paths[1])
    }

    /// 두 경로가 모두 루트 내부의 존재하는 디렉토리인지 검증
    pub fn validate(&self, guard: &PathGuard) -> Result<()> {
        for path in &self.paths {
            guard.ensure_panel_path(path)?;
        }
        Ok(())
    }

    /// 디렉토리 이동
    ///
    /// 해당 패널의 경로만 정규화된 절대 경로로 교체하며 반대편 패널은 건드리지 않는다.
    pub fn change_dir(
        &mut self,
        panel: PanelIndex,
        relative: &str,
        guard: &PathGuard,
    ) -> Result<()> {
        let new_path = guard.change_directory(self.path(panel), relative)?;
        self.paths[panel.as_usize()] = new_path;
        Ok(())
    }

    /// 사라진 디렉토리를 보고 있는 패널을 가장 가까운 상위 디렉토리로 이동
    ///
    /// 이동된 패널 목록을 반환한다.
    pub fn retreat_to_existing(&mut self, guard: &PathGuard) -> Vec<PanelIndex> {
        let mut moved = Vec::new();
        for panel in PanelIndex::ALL {
            let current = self.path(panel);
            if guard.is_directory(current) {
                continue;
            }

            let fallback = current
                .ancestors()
                .skip(1)
                .find(|p| guard.contains(p) && guard.is_directory(p))
                .map(Path::to_path_buf)
                .unwrap_or_else(|| guard.root().to_path_buf());
            self.paths[panel.as_usize()] = fallback;
            moved.push(panel);
        }
        moved
    }
}
