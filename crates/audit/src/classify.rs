//! 키 분류 술어 — 세션 키 / 의심 키 판별
//!
//! 상태 없는 순수 함수 두 개로 구성됩니다. 접두사 목록은 고정
//! 상수이며 사용자 설정 대상이 아닙니다. 테스트 픽스처가 이 목록을
//! 그대로 가정하므로 목록을 "개선"해서는 안 됩니다.

/// 세션 네임스페이스 접두사 (대소문자 구분)
pub const SESSION_PREFIX: &str = "session.";

/// 자격증명 형태로 간주하는 키 접두사 목록
///
/// 소문자로 변환한 키에 대해 접두사 일치를 검사합니다.
/// `auth.` 같은 점 네임스페이스와 `token` 같은 단순 접두사가 섞여
/// 있는 것은 의도된 구성입니다.
pub const SUSPICIOUS_PREFIXES: [&str; 6] =
    ["auth.", "token", "secret", "apikey", "api_key", "jwt"];

/// 키가 세션 스코프인지 판별합니다.
///
/// `"session."` 리터럴 접두사로 시작하는 경우에만 참이며,
/// 대소문자를 구분합니다.
pub fn is_session_key(key: &str) -> bool {
    key.starts_with(SESSION_PREFIX)
}

/// 키가 자격증명/비밀 형태인지 판별합니다.
///
/// 키를 소문자로 변환한 뒤 [`SUSPICIOUS_PREFIXES`] 중 하나로
/// 시작하면 참입니다.
pub fn is_suspicious_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    SUSPICIOUS_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}
