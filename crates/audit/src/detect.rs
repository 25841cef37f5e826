//! 누출 탐지 규칙 — 키 인덱스 위의 세 가지 독립 패스
//!
//! 각 탐지기는 [`KeyIndex`]에 대해 읽기 전용으로 동작하며 서로 상태를
//! 공유하지 않습니다. 키 순회는 정렬 순서, 읽기 처리는 도착 순서,
//! 집합 증거는 생성 시점에 정렬되므로 출력은 항상 결정적입니다.
//!
//! 식별자 비교의 공통 규칙: 트리밍 후 비어 있지 않은 문자열만 유효한
//! 식별자입니다. 식별자가 없는 레코드는 어떤 비교에도 참여하지 않으므로
//! 탐지 결과를 만들 수도, 억제할 수도 없습니다. (정규화는 디코딩
//! 시점에 끝나 있어 여기서는 `Some` 여부만 확인합니다.)

use std::collections::BTreeSet;

use leakcheck_core::types::{EventRecord, Finding};

use crate::classify::{is_session_key, is_suspicious_key};
use crate::index::KeyIndex;

/// 모든 탐지기를 고정 순서로 실행하여 결과를 합칩니다.
///
/// 순서: cross-user → cross-trace session → suspicious read.
pub fn run_all(index: &KeyIndex) -> Vec<Finding> {
    let mut findings = detect_cross_user_reuse(index);
    findings.extend(detect_cross_trace_session_reuse(index));
    findings.extend(detect_suspicious_cross_user_reads(index));
    findings
}

/// 규칙 1: 한 식별자가 쓴 키를 다른 식별자가 읽은 경우를 찾습니다.
///
/// 읽기와 쓰기가 모두 있는 키에 대해, 유효한 식별자를 가진 각 읽기가
/// 작성자 집합에 속하지 않으면 읽기 1건당 1건의 결과를 냅니다.
/// 쓰기가 없는 키는 비교할 작성자 식별자가 없으므로 결과를 내지 않습니다.
pub fn detect_cross_user_reuse(index: &KeyIndex) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (key, slots) in index.iter() {
        if !slots.has_both() {
            continue;
        }

        let writer_users = collect_users(&slots.writes);
        let writer_traces = collect_traces(&slots.writes);

        for read in &slots.reads {
            let Some(read_user) = read.user_id.as_deref() else {
                continue; // 식별자 없는 읽기는 평가 불가
            };
            if writer_users.contains(read_user) {
                continue;
            }

            tracing::debug!(key, read_user, "cross-user key reuse detected");
            findings.push(Finding::CrossUserKeyReuse {
                key: key.to_owned(),
                read_user: read_user.to_owned(),
                read_trace: read.trace_id.clone(),
                writer_users: sorted_vec(&writer_users),
                writer_traces: sorted_vec(&writer_traces),
                read_preview: read.value_preview.clone(),
            });
        }
    }

    findings
}

/// 규칙 2: 세션 키가 둘 이상의 트레이스에 걸쳐 나타난 경우를 찾습니다.
///
/// 읽기와 쓰기를 합친 트레이스 집합의 크기가 2 이상이면 키당 정확히
/// 1건의 결과를 냅니다.
pub fn detect_cross_trace_session_reuse(index: &KeyIndex) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (key, slots) in index.iter() {
        if !is_session_key(key) {
            continue;
        }

        let mut trace_ids = collect_traces(&slots.writes);
        trace_ids.extend(collect_traces(&slots.reads));

        if trace_ids.len() > 1 {
            tracing::debug!(key, traces = trace_ids.len(), "session key crossed traces");
            findings.push(Finding::CrossTraceSessionKeyReuse {
                key: key.to_owned(),
                trace_ids: trace_ids.into_iter().collect(),
            });
        }
    }

    findings
}

/// 규칙 3: 자격증명 형태의 키를 비작성자가 읽은 경우를 찾습니다.
///
/// 규칙 1과 같은 읽기 단위 평가를 의심 키에만 적용하며, 증거에서
/// 작성자 트레이스 집합은 생략합니다.
pub fn detect_suspicious_cross_user_reads(index: &KeyIndex) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (key, slots) in index.iter() {
        if !is_suspicious_key(key) || !slots.has_both() {
            continue;
        }

        let writer_users = collect_users(&slots.writes);

        for read in &slots.reads {
            let Some(read_user) = read.user_id.as_deref() else {
                continue;
            };
            if writer_users.contains(read_user) {
                continue;
            }

            tracing::debug!(key, read_user, "suspicious key read by non-writer");
            findings.push(Finding::SuspiciousKeyReadCrossUser {
                key: key.to_owned(),
                read_user: read_user.to_owned(),
                writer_users: sorted_vec(&writer_users),
                read_trace: read.trace_id.clone(),
                read_preview: read.value_preview.clone(),
            });
        }
    }

    findings
}

/// 레코드 목록에서 유효한 식별자 집합을 수집합니다.
fn collect_users(records: &[EventRecord]) -> BTreeSet<String> {
    records
        .iter()
        .filter_map(|r| r.user_id.clone())
        .collect()
}

/// 레코드 목록에서 유효한 트레이스 집합을 수집합니다.
fn collect_traces(records: &[EventRecord]) -> BTreeSet<String> {
    records
        .iter()
        .filter_map(|r| r.trace_id.clone())
        .collect()
}

fn sorted_vec(set: &BTreeSet<String>) -> Vec<String> {
    set.iter().cloned().collect()
}
