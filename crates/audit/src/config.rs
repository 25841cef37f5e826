//! 감사 엔진 설정
//!
//! [`AuditConfig`]는 core의 [`AuditConfigSection`](leakcheck_core::config::AuditConfigSection)을
//! 기반으로 엔진 전용 설정을 제공합니다.
//!
//! 탐지 규칙의 의심 키 접두사 목록과 미리보기 160자 제한은 설정이 아닌
//! 고정 상수입니다 ([`classify`](crate::classify), [`decoder`](crate::decoder) 참고).

use serde::{Deserialize, Serialize};

use crate::error::LeakAuditError;

/// 감사 엔진 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// 한 줄의 최대 허용 길이 (바이트). 초과 라인은 조용히 건너뜁니다.
    pub max_line_length: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            max_line_length: 1024 * 1024, // 1MB
        }
    }
}

impl AuditConfig {
    /// core의 `AuditConfigSection`에서 엔진 설정을 생성합니다.
    pub fn from_core(core: &leakcheck_core::config::AuditConfigSection) -> Self {
        Self {
            max_line_length: core.max_line_length,
        }
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LeakAuditError> {
        if self.max_line_length == 0 {
            return Err(LeakAuditError::Config {
                field: "max_line_length".to_owned(),
                reason: "must be greater than zero".to_owned(),
            });
        }
        Ok(())
    }
}
