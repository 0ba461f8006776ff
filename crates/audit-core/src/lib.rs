//! # Audit Core
//!
//! 진입 셋업 검증 도구의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 분석 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 진입 셋업 분석 레코드 (`TradeAnalysis`)
//! - 신호 열거형 (추세, RSI, 가격 형태, 돌파 상태)
//! - 캔들 데이터 구조체
//! - 에러 타입
//! - 로깅 인프라

pub mod error;
pub mod logging;
pub mod types;

pub use error::*;
pub use logging::*;
pub use types::*;
