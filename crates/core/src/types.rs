//! 도메인 타입 — 시스템 전역에서 사용되는 공통 타입
//!
//! 메모리 로그 감사에 관련된 모든 모듈이 공유하는 데이터 구조를 정의합니다.
//! 레코드는 디코딩 시점에 한 번 검증/정규화되며 이후 불변입니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 이벤트 종류
///
/// 로그 레코드의 `event` 필드에서 파생됩니다. 인식되지 않는 값은
/// [`EventKind::Other`]로 매핑되어 총계에는 포함되지만 인덱싱에서는 제외됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// 메모리 읽기 (`"memory_read"`)
    MemoryRead,
    /// 메모리 쓰기 (`"memory_write"`)
    MemoryWrite,
    /// 그 외 모든 이벤트
    #[default]
    Other,
}

impl EventKind {
    /// `event` 필드 문자열에서 이벤트 종류를 파생합니다.
    ///
    /// 필드가 없거나 문자열이 아니면 `None`이 전달되며 `Other`가 됩니다.
    pub fn from_event_field(value: Option<&str>) -> Self {
        match value {
            Some("memory_read") => Self::MemoryRead,
            Some("memory_write") => Self::MemoryWrite,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MemoryRead => write!(f, "memory_read"),
            Self::MemoryWrite => write!(f, "memory_write"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// 이벤트 레코드
///
/// 디코딩된 로그 한 줄을 나타냅니다. 모든 선택 필드는 디코딩 시점에
/// 트리밍되며, 빈 문자열은 `None`으로 정규화됩니다. 따라서 `Some`은
/// 항상 비어 있지 않은 유효한 값을 의미합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// 이벤트 종류
    pub kind: EventKind,
    /// 메모리 슬롯 키 (없으면 인덱싱 제외)
    pub key: Option<String>,
    /// 행위자 식별자 (없으면 비교 대상에서 제외, 총계에는 포함)
    pub user_id: Option<String>,
    /// 실행 트레이스 식별자
    pub trace_id: Option<String>,
    /// 값 미리보기 (최대 160자, 표시 용도로만 사용)
    pub value_preview: Option<String>,
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] key={} user={} trace={}",
            self.kind,
            self.key.as_deref().unwrap_or("-"),
            self.user_id.as_deref().unwrap_or("-"),
            self.trace_id.as_deref().unwrap_or("-"),
        )
    }
}

/// 심각도 레벨
///
/// 탐지 규칙별 심각도를 나타냅니다. 사람이 읽는 출력에서만 사용되며
/// 구조화 리포트에는 포함되지 않습니다.
/// `Ord` 구현으로 심각도 비교가 가능합니다 (`Info < Low < Medium < High < Critical`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    /// 정보성
    #[default]
    Info,
    /// 낮은 심각도
    Low,
    /// 중간 심각도
    Medium,
    /// 높은 심각도
    High,
    /// 치명적 — 즉시 대응 필요
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "Info"),
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// 탐지 규칙 종류
///
/// 세 가지 누출 패턴 각각에 고정 식별자와 심각도가 부여됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    /// 한 식별자가 쓴 키를 다른 식별자가 읽음
    CrossUserKeyReuse,
    /// 세션 키가 둘 이상의 트레이스에 걸쳐 나타남
    CrossTraceSessionKeyReuse,
    /// 자격증명 형태의 키를 비작성자가 읽음
    SuspiciousKeyReadCrossUser,
}

impl FindingKind {
    /// 모든 규칙 종류 (탐지 실행 순서이자 출력 순서의 기준)
    pub const ALL: [Self; 3] = [
        Self::CrossUserKeyReuse,
        Self::CrossTraceSessionKeyReuse,
        Self::SuspiciousKeyReadCrossUser,
    ];

    /// 구조화 리포트에서 사용하는 고정 규칙 식별자
    pub fn rule_name(self) -> &'static str {
        match self {
            Self::CrossUserKeyReuse => "cross_user_key_reuse",
            Self::CrossTraceSessionKeyReuse => "cross_trace_session_key_reuse",
            Self::SuspiciousKeyReadCrossUser => "suspicious_key_read_cross_user",
        }
    }

    /// 사람이 읽는 출력용 제목
    pub fn title(self) -> &'static str {
        match self {
            Self::CrossUserKeyReuse => "Cross-user key reuse",
            Self::CrossTraceSessionKeyReuse => "Cross-trace session key reuse",
            Self::SuspiciousKeyReadCrossUser => "Suspicious key read by non-writer",
        }
    }

    /// 규칙별 심각도 (텍스트 렌더링 전용)
    pub fn severity(self) -> Severity {
        match self {
            Self::CrossUserKeyReuse => Severity::High,
            Self::CrossTraceSessionKeyReuse => Severity::Medium,
            Self::SuspiciousKeyReadCrossUser => Severity::Critical,
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rule_name())
    }
}

/// 탐지 결과 (Finding)
///
/// 탐지된 누출 패턴 한 건과 그 증거를 나타냅니다. 생성 이후 변경되지
/// 않는 순수 파생 데이터입니다. 집합 형태의 증거 필드는 생성 시점에
/// 정렬된 `Vec`으로 고정되어 직렬화 결과가 실행 간에 안정적입니다.
///
/// `untagged`로 직렬화되므로 JSON에는 증거 필드만 나타나며, 규칙
/// 이름은 리포트의 맵 키가 담당합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Finding {
    /// 한 식별자가 쓴 키를 다른 식별자가 읽은 경우 (읽기 1건당 1건)
    CrossUserKeyReuse {
        /// 해당 키
        key: String,
        /// 읽은 식별자
        read_user: String,
        /// 읽기가 발생한 트레이스
        read_trace: Option<String>,
        /// 이 키를 쓴 식별자 집합 (정렬됨)
        writer_users: Vec<String>,
        /// 쓰기가 발생한 트레이스 집합 (정렬됨)
        writer_traces: Vec<String>,
        /// 읽힌 값 미리보기 (최대 160자)
        read_preview: Option<String>,
    },
    /// 세션 키가 둘 이상의 트레이스에 나타난 경우 (키당 1건)
    CrossTraceSessionKeyReuse {
        /// 해당 키
        key: String,
        /// 관측된 트레이스 집합 (정렬됨)
        trace_ids: Vec<String>,
    },
    /// 자격증명 형태의 키를 비작성자가 읽은 경우 (읽기 1건당 1건)
    SuspiciousKeyReadCrossUser {
        /// 해당 키
        key: String,
        /// 읽은 식별자
        read_user: String,
        /// 이 키를 쓴 식별자 집합 (정렬됨)
        writer_users: Vec<String>,
        /// 읽기가 발생한 트레이스
        read_trace: Option<String>,
        /// 읽힌 값 미리보기 (최대 160자)
        read_preview: Option<String>,
    },
}

impl Finding {
    /// 이 결과가 속한 규칙 종류를 반환합니다.
    pub fn kind(&self) -> FindingKind {
        match self {
            Self::CrossUserKeyReuse { .. } => FindingKind::CrossUserKeyReuse,
            Self::CrossTraceSessionKeyReuse { .. } => FindingKind::CrossTraceSessionKeyReuse,
            Self::SuspiciousKeyReadCrossUser { .. } => FindingKind::SuspiciousKeyReadCrossUser,
        }
    }

    /// 문제가 된 키를 반환합니다.
    pub fn key(&self) -> &str {
        match self {
            Self::CrossUserKeyReuse { key, .. }
            | Self::CrossTraceSessionKeyReuse { key, .. }
            | Self::SuspiciousKeyReadCrossUser { key, .. } => key,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] key={}", self.kind(), self.key())
    }
}

/// 디코딩 총계
///
/// 디코딩된 레코드의 종류별 개수를 집계합니다.
/// 불변식: `events_loaded == writes + reads + other`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// 성공적으로 디코딩된 레코드 총수
    pub events_loaded: u64,
    /// 쓰기 이벤트 수
    pub writes: u64,
    /// 읽기 이벤트 수
    pub reads: u64,
    /// 그 외 이벤트 수
    pub other: u64,
}

impl AuditSummary {
    /// 디코딩된 레코드 한 건을 집계에 반영합니다.
    pub fn record(&mut self, kind: EventKind) {
        self.events_loaded += 1;
        match kind {
            EventKind::MemoryWrite => self.writes += 1,
            EventKind::MemoryRead => self.reads += 1,
            EventKind::Other => self.other += 1,
        }
    }

    /// 집계 불변식을 검사합니다.
    pub fn is_consistent(&self) -> bool {
        self.events_loaded == self.writes + self.reads + self.other
    }
}

impl fmt::Display for AuditSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "events={} writes={} reads={} other={}",
            self.events_loaded, self.writes, self.reads, self.other,
        )
    }
}
