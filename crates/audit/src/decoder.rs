//! 레코드 디코더 — 로그 한 줄을 타입이 있는 이벤트 레코드로 변환
//!
//! 입력 한 줄을 JSON 객체로 파싱하여 [`EventRecord`]를 생성합니다.
//! 필드 검증과 트리밍은 전부 이 단계에서 한 번만 수행되므로, 이후
//! 단계는 `Some`이면 항상 유효한 값이라고 가정할 수 있습니다.
//!
//! # 건너뛰기 규칙
//! - 공백 라인: 파싱 시도 없이 건너뜀
//! - 파싱 실패 / 최상위가 객체가 아님 / 길이 초과: 조용히 건너뜀
//!
//! 건너뛴 라인은 에러가 아니며 어떤 카운터도 증가시키지 않습니다.

use leakcheck_core::types::{EventKind, EventRecord};

/// 값 미리보기 최대 길이 (문자 수)
pub const PREVIEW_MAX_CHARS: usize = 160;

/// 레코드 디코더
///
/// 한 줄 단위로 동작하는 무상태 디코더입니다. 유일한 설정은
/// 길이 제한뿐이며, 제한을 넘는 라인은 파싱하지 않고 버립니다.
#[derive(Debug, Clone)]
pub struct RecordDecoder {
    /// 최대 허용 입력 크기 (바이트)
    max_line_length: usize,
}

impl RecordDecoder {
    /// 기본 길이 제한(1MB)으로 새 디코더를 생성합니다.
    pub fn new() -> Self {
        Self {
            max_line_length: 1024 * 1024,
        }
    }

    /// 최대 라인 길이를 설정합니다.
    pub fn with_max_line_length(mut self, length: usize) -> Self {
        self.max_line_length = length;
        self
    }

    /// 한 줄을 디코딩합니다.
    ///
    /// 성공 시 `Some(EventRecord)`를 반환하며, 호출자가 총계에
    /// 반영해야 합니다. 건너뛴 라인은 `None`입니다.
    pub fn decode(&self, line: &str) -> Option<EventRecord> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if line.len() > self.max_line_length {
            tracing::debug!(
                length = line.len(),
                max = self.max_line_length,
                "skipping oversized line"
            );
            return None;
        }

        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unparseable line");
                return None;
            }
        };

        // 최상위가 JSON 객체여야 합니다
        let obj = value.as_object()?;

        let kind = EventKind::from_event_field(obj.get("event").and_then(|v| v.as_str()));

        Some(EventRecord {
            kind,
            key: extract_trimmed(obj, "key"),
            user_id: extract_trimmed(obj, "user_id"),
            trace_id: extract_trimmed(obj, "trace_id"),
            value_preview: obj.get("value_preview").and_then(stringify_preview),
        })
    }
}

impl Default for RecordDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// 객체에서 문자열 필드를 꺼내 트리밍합니다.
///
/// 필드가 없거나, 문자열이 아니거나, 트리밍 후 비어 있으면 `None`입니다.
fn extract_trimmed(obj: &serde_json::Map<String, serde_json::Value>, field: &str) -> Option<String> {
    let trimmed = obj.get(field)?.as_str()?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// 미리보기 값을 문자열로 만들고 160자로 자릅니다.
///
/// 문자열 값은 그대로, 그 외 JSON 값은 압축 직렬화 형태를 사용합니다.
/// null은 미리보기 없음으로 처리합니다.
fn stringify_preview(value: &serde_json::Value) -> Option<String> {
    let text = match value {
        serde_json::Value::Null => return None,
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Some(truncate_preview(text))
}

/// 미리보기 문자열을 [`PREVIEW_MAX_CHARS`]자로 자릅니다 (문자 경계 안전).
pub fn truncate_preview(text: String) -> String {
    if text.chars().count() <= PREVIEW_MAX_CHARS {
        text
    } else {
        text.chars().take(PREVIEW_MAX_CHARS).collect()
    }
}
