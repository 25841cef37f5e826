//! 감사 리포트 — 총계와 탐지 결과의 구조화 조립
//!
//! [`AuditReport`]는 한 번의 감사 실행이 내는 유일한 산출물입니다.
//! JSON 직렬화 형태가 외부 계약이므로 필드 구성을 바꾸면 안 됩니다:
//!
//! ```json
//! {
//!   "events_loaded": 0, "writes": 0, "reads": 0,
//!   "counts":   { "<rule>": 0 },
//!   "findings": { "<rule>": [] }
//! }
//! ```
//!
//! 세 규칙 키는 탐지 결과가 없어도 항상 존재합니다. 맵은 `BTreeMap`이라
//! 키 순서가, 결과 목록은 탐지 순서가 고정되어 같은 입력이면 직렬화
//! 바이트까지 동일합니다.

use std::collections::BTreeMap;

use serde::Serialize;

use leakcheck_core::types::{AuditSummary, Finding, FindingKind};

/// 감사 리포트
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// 디코딩된 레코드 총수
    pub events_loaded: u64,
    /// 쓰기 이벤트 수
    pub writes: u64,
    /// 읽기 이벤트 수
    pub reads: u64,
    /// 규칙별 탐지 건수 (항상 3개 키)
    pub counts: BTreeMap<&'static str, u64>,
    /// 규칙별 탐지 결과 (항상 3개 키)
    pub findings: BTreeMap<&'static str, Vec<Finding>>,

    /// 읽기/쓰기 외 이벤트 수 (텍스트 출력 전용, 직렬화 제외)
    #[serde(skip)]
    pub other: u64,
}

impl AuditReport {
    /// 총계와 탐지 결과 목록에서 리포트를 조립합니다.
    ///
    /// 결과를 규칙별로 분류하고 건수를 맞춰 기록합니다. 조립 후
    /// `counts[rule] == findings[rule].len()`이 항상 성립합니다.
    pub fn assemble(summary: AuditSummary, all_findings: Vec<Finding>) -> Self {
        let mut findings: BTreeMap<&'static str, Vec<Finding>> = FindingKind::ALL
            .iter()
            .map(|kind| (kind.rule_name(), Vec::new()))
            .collect();

        for finding in all_findings {
            // ALL이 모든 변형을 커버하므로 엔트리는 항상 존재합니다
            if let Some(bucket) = findings.get_mut(finding.kind().rule_name()) {
                bucket.push(finding);
            }
        }

        let counts = findings
            .iter()
            .map(|(rule, list)| (*rule, list.len() as u64))
            .collect();

        Self {
            events_loaded: summary.events_loaded,
            writes: summary.writes,
            reads: summary.reads,
            counts,
            findings,
            other: summary.other,
        }
    }

    /// 규칙 종류에 해당하는 탐지 결과 목록을 반환합니다.
    pub fn findings_for(&self, kind: FindingKind) -> &[Finding] {
        self.findings
            .get(kind.rule_name())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// 전체 탐지 건수를 반환합니다.
    pub fn total_findings(&self) -> u64 {
        self.counts.values().sum()
    }

    /// 탐지 결과가 하나도 없는지 확인합니다.
    pub fn is_clean(&self) -> bool {
        self.total_findings() == 0
    }
}
