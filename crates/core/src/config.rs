//! 설정 관리 — leakcheck.toml 파싱 및 런타임 설정
//!
//! [`LeakcheckConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`LEAKCHECK_GENERAL_LOG_LEVEL=debug` 형식)
//! 3. 설정 파일 (`leakcheck.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), leakcheck_core::error::LeakcheckError> {
//! use leakcheck_core::config::LeakcheckConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = LeakcheckConfig::load("leakcheck.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = LeakcheckConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, LeakcheckError};

/// Leakcheck 통합 설정
///
/// `leakcheck.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeakcheckConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 감사 엔진 설정
    #[serde(default)]
    pub audit: AuditConfigSection,
}

impl LeakcheckConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LeakcheckError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값으로 대체하여 로드합니다.
    ///
    /// 일회성 감사 명령은 설정 파일 없이도 동작해야 하므로, 파일 부재는
    /// 에러가 아니라 기본값 적용으로 처리합니다. 환경변수 오버라이드와
    /// 유효성 검증은 동일하게 적용됩니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, LeakcheckError> {
        let path = path.as_ref();
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(LeakcheckError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, LeakcheckError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LeakcheckError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LeakcheckError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LeakcheckError> {
        toml::from_str(toml_str).map_err(|e| {
            LeakcheckError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LEAKCHECK_{SECTION}_{FIELD}`
    /// 예: `LEAKCHECK_GENERAL_LOG_LEVEL=debug`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "LEAKCHECK_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LEAKCHECK_GENERAL_LOG_FORMAT");

        // Audit
        override_usize(
            &mut self.audit.max_line_length,
            "LEAKCHECK_AUDIT_MAX_LINE_LENGTH",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LeakcheckError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        // max_line_length 검증
        if self.audit.max_line_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "audit.max_line_length".to_owned(),
                reason: "must be greater than zero".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 감사 엔진 설정 섹션
///
/// 탐지 규칙 자체(의심 키 접두사 목록, 미리보기 160자 제한 등)는 고정
/// 상수이며 설정 대상이 아닙니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfigSection {
    /// 한 줄의 최대 허용 길이 (바이트). 초과 라인은 조용히 건너뜁니다.
    pub max_line_length: usize,
}

impl Default for AuditConfigSection {
    fn default() -> Self {
        Self {
            max_line_length: 1024 * 1024, // 1MB
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LeakcheckConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.audit.max_line_length, 1024 * 1024);
    }

    #[test]
    fn parse_minimal_toml() {
        let config = LeakcheckConfig::parse("[general]\nlog_level = \"debug\"").unwrap();
        assert_eq!(config.general.log_level, "debug");
        // 나머지 필드는 기본값
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.audit.max_line_length, 1024 * 1024);
    }

    #[test]
    fn parse_empty_toml_uses_defaults() {
        let config = LeakcheckConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn parse_audit_section() {
        let config =
            LeakcheckConfig::parse("[audit]\nmax_line_length = 4096").unwrap();
        assert_eq!(config.audit.max_line_length, 4096);
    }

    #[test]
    fn parse_invalid_toml_fails() {
        let result = LeakcheckConfig::parse("[general\nlog_level = \"info\"");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_bad_log_level() {
        let mut config = LeakcheckConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.log_level"));
    }

    #[test]
    fn validate_rejects_bad_log_format() {
        let mut config = LeakcheckConfig::default();
        config.general.log_format = "xml".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_line_length() {
        let mut config = LeakcheckConfig::default();
        config.audit.max_line_length = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_line_length"));
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = LeakcheckConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed = LeakcheckConfig::parse(&serialized).unwrap();
        assert_eq!(parsed.general.log_level, config.general.log_level);
        assert_eq!(parsed.audit.max_line_length, config.audit.max_line_length);
    }
}
