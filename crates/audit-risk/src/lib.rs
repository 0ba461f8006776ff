//! # Audit Risk
//!
//! 레버리지 포지션 리스크 계산 모듈.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 리스크 계수(레버리지 × 포지션 비율) 계산과 등급 판정
//! - 초기/유지/추가 증거금 계산
//! - 격리 모드 강제청산가 계산 (롱/숏)
//!
//! # 예제
//!
//! ```rust,ignore
//! use audit_risk::{PositionRiskCalculator, PositionRiskInput, RiskConfig};
//!
//! let calc = PositionRiskCalculator::new(RiskConfig::default());
//! let summary = calc.assess(&input)?;
//! println!("강제청산가: {:?}", summary.liquidation_price);
//! ```

pub mod config;
pub mod position;

// 주요 타입 재내보내기
pub use config::RiskConfig;
pub use position::{PositionRiskCalculator, PositionRiskInput, PositionRiskSummary, RiskLevel};
