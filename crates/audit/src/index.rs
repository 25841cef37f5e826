//! 이벤트 인덱서 — 키별 읽기/쓰기 시퀀스 분할
//!
//! 디코딩된 레코드 전체를 한 번 순회하여 키별로 쓰기 목록과 읽기
//! 목록을 만듭니다. 키 안에서는 입력 도착 순서가 보존되고, 키 순회는
//! `BTreeMap` 덕분에 항상 정렬 순서라서 리포트 출력이 결정적입니다.
//!
//! `Other` 종류의 레코드와 키가 없는 레코드는 인덱스에서 제외됩니다.
//! (총계는 디코딩 단계에서 별도로 집계됩니다.)

use std::collections::BTreeMap;

use leakcheck_core::types::{EventKind, EventRecord};

/// 한 키의 읽기/쓰기 시퀀스
#[derive(Debug, Clone, Default)]
pub struct KeySlots {
    /// 쓰기 레코드 (도착 순서)
    pub writes: Vec<EventRecord>,
    /// 읽기 레코드 (도착 순서)
    pub reads: Vec<EventRecord>,
}

impl KeySlots {
    /// 읽기와 쓰기가 모두 있는 키인지 확인합니다.
    pub fn has_both(&self) -> bool {
        !self.writes.is_empty() && !self.reads.is_empty()
    }
}

/// 키 인덱스 — 정규화된 키에서 읽기/쓰기 시퀀스로의 정렬된 멀티맵
///
/// 실행당 한 번 구축되며 이후 읽기 전용입니다. 인덱스에 없는 키는
/// 작성자/읽은이가 없는 것으로 취급됩니다.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    entries: BTreeMap<String, KeySlots>,
}

impl KeyIndex {
    /// 디코딩된 레코드 시퀀스에서 인덱스를 구축합니다. O(n)
    pub fn build(records: &[EventRecord]) -> Self {
        let mut entries: BTreeMap<String, KeySlots> = BTreeMap::new();

        for record in records {
            let Some(key) = record.key.as_deref() else {
                continue;
            };
            match record.kind {
                EventKind::MemoryWrite => {
                    entries
                        .entry(key.to_owned())
                        .or_default()
                        .writes
                        .push(record.clone());
                }
                EventKind::MemoryRead => {
                    entries
                        .entry(key.to_owned())
                        .or_default()
                        .reads
                        .push(record.clone());
                }
                EventKind::Other => {}
            }
        }

        tracing::debug!(keys = entries.len(), "key index built");
        Self { entries }
    }

    /// 키에 해당하는 시퀀스를 반환합니다.
    pub fn get(&self, key: &str) -> Option<&KeySlots> {
        self.entries.get(key)
    }

    /// 키 정렬 순서로 (키, 시퀀스) 쌍을 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeySlots)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 인덱싱된 키 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 인덱스가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
