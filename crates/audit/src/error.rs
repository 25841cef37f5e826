//! 감사 엔진 에러 타입
//!
//! [`LeakAuditError`]는 감사 엔진 내부에서 발생하는 모든 에러를 표현합니다.
//! `From<LeakAuditError> for LeakcheckError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.
//!
//! 깨진 레코드 라인은 에러가 아닙니다 — 디코더가 조용히 건너뛰며,
//! 여기에는 입력 소스 자체의 장애만 나타납니다.

use leakcheck_core::error::{AuditError, LeakcheckError};

/// 감사 엔진 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum LeakAuditError {
    /// 입력 로그 파일을 열거나 읽을 수 없음
    #[error("input unavailable: {path}: {reason}")]
    Input {
        /// 입력 파일 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LeakAuditError> for LeakcheckError {
    fn from(err: LeakAuditError) -> Self {
        match err {
            LeakAuditError::Input { path, reason } => {
                LeakcheckError::Audit(AuditError::InputUnavailable { path, reason })
            }
            other => LeakcheckError::Audit(AuditError::Failed(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_display() {
        let err = LeakAuditError::Input {
            path: "/tmp/memory.jsonl".to_owned(),
            reason: "No such file or directory".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/memory.jsonl"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn input_error_maps_to_input_unavailable() {
        let err = LeakAuditError::Input {
            path: "a.jsonl".to_owned(),
            reason: "denied".to_owned(),
        };
        let top: LeakcheckError = err.into();
        assert!(matches!(
            top,
            LeakcheckError::Audit(AuditError::InputUnavailable { .. })
        ));
    }

    #[test]
    fn config_error_maps_to_failed() {
        let err = LeakAuditError::Config {
            field: "max_line_length".to_owned(),
            reason: "must be greater than zero".to_owned(),
        };
        let top: LeakcheckError = err.into();
        assert!(matches!(top, LeakcheckError::Audit(AuditError::Failed(_))));
        assert!(top.to_string().contains("max_line_length"));
    }
}
