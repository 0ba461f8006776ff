//! CLI 명령 구현.

pub mod analyze;
pub mod levels;
pub mod margin;

pub use analyze::{run_analyze, AnalyzeConfig};
pub use levels::{run_levels, LevelsConfig};
pub use margin::{run_margin, MarginConfig};
