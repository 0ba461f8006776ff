//! 선언적 입력 파일 파싱.
//!
//! 원본 도구의 대화식 콘솔 입력을 TOML 문서로 대체합니다. 파일을
//! 역직렬화한 뒤 빌더 경계에서 불변식을 검증하여 `TradeAnalysis`를
//! 구성합니다.
//!
//! # 입력 파일 예시
//!
//! ```toml
//! coin_type = "SOL/USDT"
//! open_dir = "long"
//! leverage = 5
//! open_price = "100"
//! liquid_price = "70"
//! stop_loss = "95"
//!
//! [trend]
//! long = "up"
//! mid = "up"
//! short = "up"
//! break_times = 0
//!
//! [rsi]
//! level = "normal"
//! duration = 3
//! unit = "시간"
//!
//! [[pattern]]
//! kind = "flag_up"
//! span = "short"
//!
//! [[ema]]
//! timeframe = "h4"
//! period = 26
//! trend = "up"
//! is_turning = false
//! # ... day, week
//!
//! [[kst]]
//! timeframe = "h4"
//! periods = [10, 15, 20, 30]
//! cross_state = "cross_up"
//! # ... day, week
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;

use audit_core::{
    AuditResult, EmaReading, KstReading, OpenDirection, PricePattern, RsiLevel, TradeAnalysis,
    TradeAnalysisBuilder, Trend,
};

/// 진입 셋업 입력 파일.
#[derive(Debug, Deserialize)]
pub struct SetupFile {
    /// 거래 종목
    pub coin_type: String,
    /// 진입 방향
    pub open_dir: OpenDirection,
    /// 레버리지 배수
    pub leverage: u32,
    /// 목표 진입가
    pub open_price: Decimal,
    /// 강제청산가
    pub liquid_price: Decimal,
    /// 손절가
    pub stop_loss: Decimal,
    /// 다우 이론 추세
    pub trend: TrendSection,
    /// RSI 상태
    pub rsi: RsiSection,
    /// 가격 형태 목록
    #[serde(default, rename = "pattern")]
    pub patterns: Vec<PricePattern>,
    /// 타임프레임별 EMA 판독값
    #[serde(rename = "ema")]
    pub emas: Vec<EmaReading>,
    /// 타임프레임별 KST 판독값
    #[serde(rename = "kst")]
    pub ksts: Vec<KstReading>,
}

/// 다우 이론 추세 섹션.
#[derive(Debug, Deserialize)]
pub struct TrendSection {
    /// 장기 추세
    pub long: Trend,
    /// 중기 추세
    pub mid: Trend,
    /// 단기 추세
    pub short: Trend,
    /// 단기 추세선 돌파 횟수
    #[serde(default)]
    pub break_times: u32,
}

/// RSI 섹션.
#[derive(Debug, Deserialize)]
pub struct RsiSection {
    /// RSI 수준
    pub level: RsiLevel,
    /// 지속 시간
    pub duration: u32,
    /// 지속 시간 단위
    pub unit: String,
}

impl SetupFile {
    /// TOML 문서를 파싱합니다.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// 검증된 분석 레코드로 변환합니다.
    ///
    /// 형태 목록은 빌더를 거치며 "없음" 센티널 정규화가 적용됩니다.
    pub fn into_analysis(self) -> AuditResult<TradeAnalysis> {
        let mut builder = TradeAnalysisBuilder::new(
            self.coin_type,
            self.open_dir,
            self.leverage,
            self.open_price,
            self.liquid_price,
            self.stop_loss,
        )
        .trends(self.trend.long, self.trend.mid, self.trend.short)
        .break_times(self.trend.break_times)
        .rsi(self.rsi.level, self.rsi.duration, self.rsi.unit);

        for pattern in self.patterns {
            builder = builder.pattern(pattern);
        }
        for ema in self.emas {
            builder = builder.ema(ema);
        }
        for kst in self.ksts {
            builder = builder.kst(kst);
        }
        builder.build()
    }
}

/// 지지/저항 계산용 캔들 입력 파일.
#[derive(Debug, Deserialize)]
pub struct CandleFile {
    /// 캔들 목록 (과거 → 최신 순)
    #[serde(rename = "candle")]
    pub candles: Vec<audit_core::Candle>,
}

impl CandleFile {
    /// TOML 문서를 파싱합니다.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"
coin_type = "SOL/USDT"
open_dir = "long"
leverage = 5
open_price = "100"
liquid_price = "70"
stop_loss = "95"

[trend]
long = "up"
mid = "up"
short = "up"
break_times = 0

[rsi]
level = "normal"
duration = 3
unit = "시간"

[[pattern]]
kind = "flag_up"
span = "short"

[[ema]]
timeframe = "h4"
period = 26
trend = "up"
is_turning = false

[[ema]]
timeframe = "day"
period = 26
trend = "up"
is_turning = false

[[ema]]
timeframe = "week"
period = 50
trend = "up"
is_turning = true

[[kst]]
timeframe = "h4"
periods = [10, 15, 20, 30]
cross_state = "cross_up"

[[kst]]
timeframe = "day"
periods = [10, 15, 20, 30]
cross_state = "cross_up"

[[kst]]
timeframe = "week"
periods = [6, 9, 12, 15]
cross_state = "cross_up"
"#;

    #[test]
    fn test_parse_and_build() {
        let file = SetupFile::from_toml(SAMPLE).unwrap();
        let ta = file.into_analysis().unwrap();

        assert_eq!(ta.coin_type, "SOL/USDT");
        assert_eq!(ta.stop_loss_rate, dec!(5));
        assert_eq!(ta.lever_stop_loss_risk, dec!(25));
        assert_eq!(ta.ema_list.len(), 3);
        assert_eq!(ta.kst_list.len(), 3);
        assert_eq!(ta.price_patterns.len(), 1);
    }

    #[test]
    fn test_duplicate_ema_timeframe_rejected_at_build() {
        let duplicated = SAMPLE.replace("timeframe = \"week\"\nperiod = 50", "timeframe = \"day\"\nperiod = 50");
        let file = SetupFile::from_toml(&duplicated).unwrap();
        assert!(file.into_analysis().is_err());
    }

    #[test]
    fn test_candle_file() {
        let text = r#"
[[candle]]
open = "100"
high = "110"
low = "90"
close = "105"
volume = "1000"

[[candle]]
open = "105"
high = "112"
low = "101"
close = "108"
"#;
        let file = CandleFile::from_toml(text).unwrap();
        assert_eq!(file.candles.len(), 2);
        assert_eq!(file.candles[1].volume, dec!(0));
    }
}
