#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`loader`]: JSONL 로그 파일에서 원시 라인 수집 및 디코딩
//! - [`decoder`]: 한 줄을 타입이 있는 이벤트 레코드로 변환
//! - [`classify`]: 세션 키 / 의심 키 판별 술어
//! - [`index`]: 키별 읽기/쓰기 시퀀스 인덱스 (정렬된 멀티맵)
//! - [`detect`]: 세 가지 누출 탐지 규칙
//! - [`report`]: 집계 및 구조화 리포트 조립
//! - [`pipeline`]: 전체 파이프라인 오케스트레이션
//! - [`config`]: 엔진 설정 (core 설정 확장)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! LogLoader -> RecordDecoder -> KeyIndex -> Detectors -> AuditReport
//!     |             |              |            |
//!  JSONL 파일    필드 정규화     키별 분할    3개 규칙 패스
//! ```

pub mod classify;
pub mod config;
pub mod decoder;
pub mod detect;
pub mod error;
pub mod index;
pub mod loader;
pub mod pipeline;
pub mod report;

// --- 주요 타입 re-export ---

// 파이프라인
pub use pipeline::AuditPipeline;

// 설정
pub use config::AuditConfig;

// 에러
pub use error::LeakAuditError;

// 디코더
pub use decoder::RecordDecoder;

// 인덱스
pub use index::{KeyIndex, KeySlots};

// 리포트
pub use report::AuditReport;

// 수집
pub use loader::LogLoader;
