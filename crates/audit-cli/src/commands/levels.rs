//! `levels` 명령: 지지/저항 수준 계산.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context};

use audit_analysis::SupportResistance;
use audit_core::LevelTimeframe;

use crate::input::CandleFile;

/// `levels` 명령 설정.
#[derive(Debug, Clone)]
pub struct LevelsConfig {
    /// 캔들 입력 파일 경로 (TOML)
    pub input: PathBuf,
    /// 타임프레임 ("daily" 또는 "4h")
    pub timeframe: String,
}

/// 타임프레임 인자를 파싱합니다.
pub fn parse_level_timeframe(value: &str) -> anyhow::Result<LevelTimeframe> {
    match value.to_lowercase().as_str() {
        "daily" | "d" | "1d" => Ok(LevelTimeframe::Daily),
        "4h" | "four_hour" => Ok(LevelTimeframe::FourHour),
        other => bail!("지원하지 않는 타임프레임: {} (daily 또는 4h)", other),
    }
}

/// 캔들 파일에서 지지/저항 수준을 계산하고 출력합니다.
pub fn run_levels(config: LevelsConfig) -> anyhow::Result<()> {
    let timeframe = parse_level_timeframe(&config.timeframe)?;
    let text = std::fs::read_to_string(&config.input)
        .with_context(|| format!("입력 파일을 읽을 수 없습니다: {}", config.input.display()))?;
    let file = CandleFile::from_toml(&text).context("캔들 파일 파싱 실패")?;

    let sr = SupportResistance::compute(&file.candles, timeframe)
        .context("지지/저항 계산 실패")?;
    print!("{}", render_levels(&sr));
    Ok(())
}

/// 지지/저항 계산 결과를 렌더링합니다.
pub fn render_levels(sr: &SupportResistance) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "===== {} 지지/저항 계산 결과 (캔들 {}개) =====",
        sr.timeframe, sr.candle_count
    );

    let _ = writeln!(out, "\n【역사적 고저점】");
    let _ = writeln!(out, "기간 최고가 (저항): {} USDT", sr.highest_high);
    let _ = writeln!(out, "기간 최저가 (지지): {} USDT", sr.lowest_low);

    let _ = writeln!(out, "\n【피봇 포인트 (최신 캔들)】");
    let _ = writeln!(out, "피봇 (P): {}", sr.pivot);
    let _ = writeln!(out, "지지선: S1={} | S2={} | S3={}", sr.s1, sr.s2, sr.s3);
    let _ = writeln!(out, "저항선: R1={} | R2={} | R3={}", sr.r1, sr.r2, sr.r3);

    let _ = writeln!(out, "\n【밀집 거래 구간】");
    let _ = writeln!(out, "밀집 거래 지지: {} USDT", sr.dense_support);
    let _ = writeln!(out, "밀집 거래 저항: {} USDT", sr.dense_resistance);
    let _ = writeln!(out, "===============================================");
    out
}
