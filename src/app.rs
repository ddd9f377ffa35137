use crate::config::Config;
use crate::core::{panels_to_reload, TokenCodec};
use crate::models::{PanelIndex, PanelState, ReloadedPanels};
use crate::system::PathGuard;
use crate::utils::error::{Result, TwinPanelError};
use std::path::PathBuf;

mod navigation;
mod operations;

#[cfg(test)]
mod tests;

/// 요청 단위 처리기
///
/// 요청마다 토큰에서 `PanelState`를 복원하고, 작업 후 새 토큰을 발급한다.
/// 요청 사이에 공유되는 가변 상태는 없다.
#[derive(Debug, Clone)]
pub struct App {
    guard: PathGuard,
    codec: TokenCodec,
    default_path: PathBuf,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            guard: PathGuard::new(config.root.clone()),
            codec: TokenCodec::new(config.token_secret.as_bytes()),
            default_path: config.default_path.clone(),
        }
    }

    /// 토큰 디코딩 + 경로 검증
    ///
    /// 토큰이 없거나, 서명이 틀리거나, 경로가 더 이상 유효하지 않으면 `InvalidToken`.
    pub(crate) fn restore_state(&self, token: Option<&str>) -> Result<PanelState> {
        let token = token.ok_or(TwinPanelError::InvalidToken)?;
        let state = self.codec.decode(token)?;
        state.validate(&self.guard).map_err(|err| {
            tracing::debug!(error = %err, "panel token refers to an unusable path");
            TwinPanelError::InvalidToken
        })?;
        Ok(state)
    }

    /// 첫 방문용 기본 상태
    pub(crate) fn default_state(&self) -> PanelState {
        PanelState::with_default_path(&self.default_path)
    }

    pub(crate) fn issue_token(&self, state: &PanelState) -> Result<String> {
        self.codec.encode(state)
    }

    /// 작업 후 새 목록이 필요한 패널 읽기
    ///
    /// 작업으로 사라진 디렉토리를 보고 있던 패널은 존재하는 상위 디렉토리로 옮긴 뒤 함께 새로고침한다.
    /// 작업은 이미 반영되었으므로 목록을 읽지 못한 패널은 응답에서 빠질 뿐 에러가 아니다.
    pub(crate) fn reload(&self, state: &mut PanelState, targeted: &[PanelIndex]) -> ReloadedPanels {
        let mut targeted = targeted.to_vec();
        for panel in state.retreat_to_existing(&self.guard) {
            if !targeted.contains(&panel) {
                targeted.push(panel);
            }
        }

        let mut reloaded = ReloadedPanels::default();
        for panel in panels_to_reload(state, &targeted) {
            match self.guard.list_directory(state.path(panel)) {
                Ok(listing) => reloaded.set(panel, listing),
                Err(err) => tracing::warn!(
                    panel = %panel,
                    path = %state.path(panel).display(),
                    error = %err,
                    "failed to reload panel listing"
                ),
            }
        }
        reloaded
    }
}
