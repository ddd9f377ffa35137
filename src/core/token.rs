//! 패널 상태 토큰 (HS256 서명)
//!
//! 서버 세션 대신 두 패널 경로와 UI 상태를 서명된 토큰에 담아 클라이언트가 보관한다.
//! 서명 검증 실패, 형식 오류, 필수 필드 누락은 모두 `InvalidToken`으로 처리한다.

use crate::models::panel_state::{PanelIndex, PanelState};
use crate::utils::error::{Result, TwinPanelError};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// 요청 헤더 이름
pub const TOKEN_HEADER: &str = "x-panel-paths-token";

/// 토큰 페이로드
#[derive(Debug, Serialize, Deserialize)]
struct PanelClaims {
    panel_left: PathBuf,
    panel_right: PathBuf,
    #[serde(default)]
    state_panel: PanelIndex,
    #[serde(default)]
    state_panel_element_index: usize,
}

/// 토큰 인코더/디코더
///
/// 시작 시 한 번 생성되어 모든 요청에서 공유된다.
#[derive(Clone)]
pub struct TokenCodec {
    header: Header,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // 만료 시간 없는 토큰
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Self {
            header: Header::new(Algorithm::HS256),
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// 패널 상태를 서명된 토큰으로 인코딩
    pub fn encode(&self, state: &PanelState) -> Result<String> {
        let (left, right) = state.paths();
        let claims = PanelClaims {
            panel_left: left.to_path_buf(),
            panel_right: right.to_path_buf(),
            state_panel: state.active_panel,
            state_panel_element_index: state.active_element_index,
        };

        jsonwebtoken::encode(&self.header, &claims, &self.encoding)
            .map_err(|e| TwinPanelError::TokenEncode(e.to_string()))
    }

    /// 토큰을 패널 상태로 디코딩
    ///
    /// 경로의 실제 존재 여부는 검사하지 않는다 (`PanelState::validate` 참고).
    pub fn decode(&self, token: &str) -> Result<PanelState> {
        let data = jsonwebtoken::decode::<PanelClaims>(token.trim(), &self.decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "rejected panel token");
                TwinPanelError::InvalidToken
            })?;

        let claims = data.claims;
        let mut state = PanelState::new(claims.panel_left, claims.panel_right);
        state.active_panel = claims.state_panel;
        state.active_element_index = claims.state_panel_element_index;
        Ok(state)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.header.alg)
            .field("secret", &"<redacted>")
            .finish()
    }
}
