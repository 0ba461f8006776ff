//! 도메인 타입 정의.

pub mod candle;
pub mod signal;
pub mod trade;

pub use candle::Candle;
pub use signal::{
    BreakoutDirection, CrossState, LevelTimeframe, OpenDirection, PatternKind, PatternSpan,
    RsiLevel, SignalTimeframe, Trend,
};
pub use trade::{EmaReading, KstReading, PricePattern, TradeAnalysis, TradeAnalysisBuilder};
