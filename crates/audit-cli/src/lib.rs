//! CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 진입 셋업 종합 분석 보고서 (`analyze`)
//! - 지지/저항 수준 계산 (`levels`)
//! - 포지션 리스크/강제청산가 계산 (`margin`)

pub mod commands;
pub mod input;

pub use commands::*;
pub use input::{CandleFile, SetupFile};
