//! # Audit Analysis
//!
//! 진입 셋업 일관성 채점 및 모순점 분석 엔진.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 5개 부분 점수 계산기 (EMA/KST 일관성, 손절률, 레버리지 위험,
//!   방향·추세 매칭)
//! - 고정 가중치 종합 점수 (0~100)와 해석 구간
//! - 지표 모순점 분석 (규칙 그룹 1~7, 방출 순서 고정)
//! - 지지/저항 수준 계산
//!
//! 모든 엔진 함수는 불변 레코드에 대한 순수 함수이며, 레코드별 병렬
//! 호출이 안전합니다.
//!
//! # 예제
//!
//! ```rust,ignore
//! use audit_analysis::{evaluate, ConsistencyBand};
//!
//! let report = evaluate(&analysis);
//! if report.band == ConsistencyBand::High && report.contradictions.is_empty() {
//!     // 진입 논리에 강한 기술적 근거
//! }
//! ```

pub mod consistency;
pub mod contradiction;
pub mod levels;

// 주요 타입 재내보내기
pub use consistency::{
    evaluate, score_base_stop_loss, score_direction_trend_match, score_ema_consistency,
    score_kst_consistency, score_lever_stop_loss, score_total, ConsistencyBand,
    ConsistencyReport, ACCEPTABLE_CONSISTENCY_MIN, HIGH_CONSISTENCY_MIN,
};
pub use contradiction::find_contradictions;
pub use levels::SupportResistance;
