//! 에러 타입 — 도메인별 에러 정의

/// Leakcheck 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum LeakcheckError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 감사(audit) 실행 에러
    #[error("audit error: {0}")]
    Audit(#[from] AuditError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 감사 실행 에러
///
/// `leakcheck-audit` 크레이트의 도메인 에러가 이 타입으로 변환되어
/// 상위 레이어로 전파됩니다.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// 입력 로그를 열거나 읽을 수 없음
    #[error("input unavailable: {path}: {reason}")]
    InputUnavailable { path: String, reason: String },

    /// 감사 실행 실패
    #[error("audit run failed: {0}")]
    Failed(String),
}
