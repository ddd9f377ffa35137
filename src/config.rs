//! 서버 설정
//!
//! 설정 파일(TOML) → 환경 변수 → CLI 인자 순으로 덮어쓴다.
//! 시작 시 한 번 로드되며 이후에는 변경되지 않는다.

use crate::utils::error::{Result, TwinPanelError};
use crate::utils::path_names::normalize_lexically;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// 설정 파일 경로 환경 변수
pub const CONFIG_FILE_ENV: &str = "TWINPANEL_CONFIG_FILE";
/// 토큰 서명 키 환경 변수 (설정 파일보다 우선)
pub const TOKEN_SECRET_ENV: &str = "TWINPANEL_TOKEN_SECRET";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3333";

/// 토큰 서명 키
///
/// 로그에 노출되지 않도록 `Debug` 출력은 가려진다.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret(String);

impl TokenSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(<redacted>)")
    }
}

/// 설정 파일 원본 (모든 필드 선택)
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub bind_addr: Option<SocketAddr>,
    pub token_secret: Option<String>,
    pub default_path: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub fn from_toml_str(data: &str) -> Result<Self> {
        toml::from_str(data).map_err(|e| TwinPanelError::Config(e.to_string()))
    }
}

/// CLI에서 넘어오는 덮어쓰기 값
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub bind_addr: Option<SocketAddr>,
    pub default_path: Option<PathBuf>,
}

/// 검증이 끝난 서버 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 바인드 주소
    pub bind_addr: SocketAddr,
    /// 토큰 서명 키
    pub token_secret: TokenSecret,
    /// 토큰이 없을 때 두 패널이 시작하는 경로
    pub default_path: PathBuf,
    /// 패널이 벗어날 수 없는 루트 경로
    pub root: PathBuf,
    /// 정적 UI 디렉토리 (있을 때만 `/`에서 제공)
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// 설정 파일, 환경 변수, CLI 인자를 합쳐 설정 로드
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let file = match Self::config_file_path(overrides.config_file.as_deref()) {
            Some(path) => {
                let data = fs::read_to_string(&path).map_err(|e| {
                    TwinPanelError::Config(format!("cannot read {}: {}", path.display(), e))
                })?;
                tracing::info!(path = %path.display(), "loaded config file");
                ConfigFile::from_toml_str(&data)?
            }
            None => ConfigFile::default(),
        };

        let env_secret = env::var(TOKEN_SECRET_ENV).ok();
        Self::resolve(file, overrides, env_secret)
    }

    /// 설정 파일 경로 결정
    ///
    /// CLI 인자 → 환경 변수 → `<config_dir>/twinpanel/config.toml` (존재할 때만)
    fn config_file_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(custom) = env::var(CONFIG_FILE_ENV) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::config_dir()
            .map(|dir| dir.join("twinpanel").join("config.toml"))
            .filter(|path| path.is_file())
    }

    /// 원본 값들을 합치고 검증
    pub fn resolve(
        file: ConfigFile,
        overrides: &ConfigOverrides,
        env_secret: Option<String>,
    ) -> Result<Self> {
        let secret = env_secret
            .filter(|s| !s.trim().is_empty())
            .or(file.token_secret)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                TwinPanelError::Config(format!(
                    "token_secret is required (config file or {})",
                    TOKEN_SECRET_ENV
                ))
            })?;

        let bind_addr = match overrides.bind_addr.or(file.bind_addr) {
            Some(addr) => addr,
            None => DEFAULT_BIND_ADDR
                .parse()
                .map_err(|e| TwinPanelError::Config(format!("bad default bind address: {}", e)))?,
        };

        let root = normalize_lexically(&file.root.unwrap_or_else(default_root));
        ensure_absolute_dir("root", &root)?;

        let default_path = match overrides.default_path.clone().or(file.default_path) {
            Some(path) => normalize_lexically(&path),
            None => dirs::home_dir()
                .map(|home| normalize_lexically(&home))
                .filter(|home| home.starts_with(&root) && home.is_dir())
                .unwrap_or_else(|| root.clone()),
        };
        ensure_absolute_dir("default_path", &default_path)?;
        if !default_path.starts_with(&root) {
            return Err(TwinPanelError::Config(format!(
                "default_path {} is outside root {}",
                default_path.display(),
                root.display()
            )));
        }

        Ok(Self {
            bind_addr,
            token_secret: TokenSecret::new(secret),
            default_path,
            root,
            static_dir: file.static_dir,
        })
    }
}

fn default_root() -> PathBuf {
    #[cfg(windows)]
    {
        PathBuf::from("C:\\")
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/")
    }
}

fn ensure_absolute_dir(field: &str, path: &Path) -> Result<()> {
    if !path.is_absolute() || !path.is_dir() {
        return Err(TwinPanelError::Config(format!(
            "{} must be an existing absolute directory: {}",
            field,
            path.display()
        )));
    }
    Ok(())
}
