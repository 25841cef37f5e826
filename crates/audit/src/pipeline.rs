//! 감사 파이프라인 — 수집부터 리포트까지의 오케스트레이션
//!
//! 단계를 고정 순서로 연결합니다:
//! 수집/디코딩 → 인덱싱 → 탐지(3패스) → 리포트 조립.
//!
//! 파이프라인 자체는 상태를 갖지 않으며 `run`은 같은 입력에 대해
//! 항상 같은 리포트를 냅니다.

use std::path::Path;

use crate::config::AuditConfig;
use crate::decoder::RecordDecoder;
use crate::detect;
use crate::error::LeakAuditError;
use crate::index::KeyIndex;
use crate::loader::LogLoader;
use crate::report::AuditReport;

/// 감사 파이프라인
#[derive(Debug, Clone)]
pub struct AuditPipeline {
    loader: LogLoader,
}

impl AuditPipeline {
    /// 설정으로 파이프라인을 생성합니다. 설정 검증에 실패하면 에러입니다.
    pub fn new(config: AuditConfig) -> Result<Self, LeakAuditError> {
        config.validate()?;
        let decoder = RecordDecoder::new().with_max_line_length(config.max_line_length);
        Ok(Self {
            loader: LogLoader::with_decoder(decoder),
        })
    }

    /// 로그 파일 하나에 대해 전체 감사를 실행합니다.
    pub async fn run(&self, log_path: &Path) -> Result<AuditReport, LeakAuditError> {
        let (records, summary) = self.loader.load(log_path).await?;

        let index = KeyIndex::build(&records);
        let findings = detect::run_all(&index);

        tracing::info!(
            events = summary.events_loaded,
            keys = index.len(),
            findings = findings.len(),
            "audit complete"
        );
        Ok(AuditReport::assemble(summary, findings))
    }
}

impl Default for AuditPipeline {
    fn default() -> Self {
        Self {
            loader: LogLoader::new(),
        }
    }
}
