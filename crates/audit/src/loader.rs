//! 로그 수집기 — JSONL 파일에서 레코드 스트림 생성
//!
//! 입력 파일을 비동기로 열어 라인 단위로 읽고, 각 라인을 디코더에
//! 넘겨 레코드와 총계를 함께 만듭니다. 파일을 열거나 읽는 데 실패하면
//! 에러이고, 개별 라인이 깨진 것은 에러가 아닙니다.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

use leakcheck_core::types::{AuditSummary, EventRecord};

use crate::decoder::RecordDecoder;
use crate::error::LeakAuditError;

/// JSONL 로그 수집기
#[derive(Debug, Clone, Default)]
pub struct LogLoader {
    decoder: RecordDecoder,
}

impl LogLoader {
    /// 기본 디코더로 새 수집기를 생성합니다.
    pub fn new() -> Self {
        Self {
            decoder: RecordDecoder::new(),
        }
    }

    /// 지정한 디코더를 사용하는 수집기를 생성합니다.
    pub fn with_decoder(decoder: RecordDecoder) -> Self {
        Self { decoder }
    }

    /// 로그 파일 전체를 읽어 디코딩된 레코드와 총계를 반환합니다.
    ///
    /// 파일을 열 수 없으면 [`LeakAuditError::Input`]을 반환합니다.
    /// 디코딩에 실패한 라인은 건너뛰며 개수만 로그로 남깁니다.
    pub async fn load(
        &self,
        path: &Path,
    ) -> Result<(Vec<EventRecord>, AuditSummary), LeakAuditError> {
        let file = File::open(path).await.map_err(|e| LeakAuditError::Input {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut lines = BufReader::new(file).lines();
        let mut records = Vec::new();
        let mut summary = AuditSummary::default();
        let mut skipped: u64 = 0;

        while let Some(line) = lines.next_line().await? {
            match self.decoder.decode(&line) {
                Some(record) => {
                    summary.record(record.kind);
                    records.push(record);
                }
                None => skipped += 1,
            }
        }

        tracing::info!(
            path = %path.display(),
            loaded = summary.events_loaded,
            skipped,
            "log file loaded"
        );
        Ok((records, summary))
    }
}
