//! 진입 셋업 분석 레코드.
//!
//! `TradeAnalysis`는 입력 계층이 한 번 구성한 뒤 분석 엔진에는 읽기
//! 전용으로 전달되는 단일 루트 레코드입니다. 파생 값(기초 손절률,
//! 레버리지 손절 위험률)과 목록 불변식(EMA/KST 각 3개, 형태 센티널)은
//! 빌더 경계에서 확정하며, 채점 로직에는 검증을 흩어 두지 않습니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AuditError, AuditResult};
use crate::types::signal::{
    BreakoutDirection, CrossState, OpenDirection, PatternKind, PatternSpan, RsiLevel,
    SignalTimeframe, Trend,
};

/// 가격 형태 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePattern {
    /// 형태 종류
    pub kind: PatternKind,
    /// 형태 지속 기간 분류
    pub span: PatternSpan,
    /// 돌파 방향 (삼각형 계열 전용, 그 외 `None`)
    #[serde(default = "default_breakout")]
    pub breakout: BreakoutDirection,
}

fn default_breakout() -> BreakoutDirection {
    BreakoutDirection::None
}

impl PricePattern {
    /// 센티널("형태 없음") 항목 생성.
    pub fn none() -> Self {
        Self {
            kind: PatternKind::None,
            span: PatternSpan::Short,
            breakout: BreakoutDirection::None,
        }
    }
}

/// 단일 타임프레임 EMA 판독값.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmaReading {
    /// 평가 타임프레임
    pub timeframe: SignalTimeframe,
    /// EMA 기간 (예: 12/26/50/100/200)
    pub period: u32,
    /// EMA 추세
    pub trend: Trend,
    /// 전환(꺾임) 여부
    pub is_turning: bool,
}

/// 단일 타임프레임 KST 판독값.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KstReading {
    /// 평가 타임프레임
    pub timeframe: SignalTimeframe,
    /// KST 기간 조합 (정확히 4개, 예: 10,15,20,30)
    pub periods: [u32; 4],
    /// 시그널선 돌파 상태
    pub cross_state: CrossState,
}

/// 진입 셋업 분석 레코드.
///
/// 호출자가 소유하며 구성 후 불변입니다. 모든 파생 필드는
/// [`TradeAnalysisBuilder::build`]에서 계산됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeAnalysis {
    /// 거래 종목 (예: "SOL/USDT")
    pub coin_type: String,
    /// 진입 방향
    pub open_dir: OpenDirection,
    /// 레버리지 배수 (1 이상)
    pub leverage: u32,
    /// 목표 진입가
    pub open_price: Decimal,
    /// 강제청산가
    pub liquid_price: Decimal,
    /// 손절가
    pub stop_loss: Decimal,
    /// 기초 손절률 (%) = |진입가 − 손절가| / 진입가 × 100
    pub stop_loss_rate: Decimal,
    /// 레버리지 손절 위험률 (%) = 기초 손절률 × 레버리지
    pub lever_stop_loss_risk: Decimal,

    /// 장기 추세 (다우 이론)
    pub long_trend: Trend,
    /// 중기 추세
    pub mid_trend: Trend,
    /// 단기 추세
    pub short_trend: Trend,
    /// 단기 추세선 돌파(이탈) 횟수
    pub short_trend_line_break_times: u32,

    /// RSI 수준
    pub rsi_level: RsiLevel,
    /// RSI 수준 지속 시간 (양의 정수)
    pub rsi_duration: u32,
    /// 지속 시간 단위 (예: "시간", "일")
    pub rsi_unit: String,

    /// 가격 형태 목록 (센티널 `[없음]` 단독 또는 실제 형태만)
    pub price_patterns: Vec<PricePattern>,
    /// 타임프레임별 EMA 판독값 (정확히 3개, 중복 없음)
    pub ema_list: Vec<EmaReading>,
    /// 타임프레임별 KST 판독값 (정확히 3개, 중복 없음)
    pub kst_list: Vec<KstReading>,
}

impl TradeAnalysis {
    /// 형태 지속 기간 분류에 대응하는 추세 필드를 반환합니다.
    ///
    /// 장기 → 장기 추세, 중기 → 중기 추세, 단기 → 단기 추세.
    pub fn trend_for_span(&self, span: PatternSpan) -> Trend {
        match span {
            PatternSpan::Long => self.long_trend,
            PatternSpan::Medium => self.mid_trend,
            PatternSpan::Short => self.short_trend,
        }
    }

    /// 선택된 형태가 없는지 확인합니다 (빈 목록 또는 센티널 단독).
    pub fn has_no_pattern(&self) -> bool {
        self.price_patterns.is_empty()
            || (self.price_patterns.len() == 1 && self.price_patterns[0].kind == PatternKind::None)
    }
}

/// `TradeAnalysis` 빌더.
///
/// 파생 필드 계산과 목록 정규화를 담당합니다. 형태 목록의 "없음"
/// 센티널은 추가 시점에 이전 항목을 모두 대체합니다.
#[derive(Debug, Clone)]
pub struct TradeAnalysisBuilder {
    coin_type: String,
    open_dir: OpenDirection,
    leverage: u32,
    open_price: Decimal,
    liquid_price: Decimal,
    stop_loss: Decimal,
    long_trend: Trend,
    mid_trend: Trend,
    short_trend: Trend,
    short_trend_line_break_times: u32,
    rsi_level: RsiLevel,
    rsi_duration: u32,
    rsi_unit: String,
    price_patterns: Vec<PricePattern>,
    ema_list: Vec<EmaReading>,
    kst_list: Vec<KstReading>,
}

impl TradeAnalysisBuilder {
    /// 진입 기본 파라미터로 빌더를 생성합니다.
    pub fn new(
        coin_type: impl Into<String>,
        open_dir: OpenDirection,
        leverage: u32,
        open_price: Decimal,
        liquid_price: Decimal,
        stop_loss: Decimal,
    ) -> Self {
        Self {
            coin_type: coin_type.into(),
            open_dir,
            leverage,
            open_price,
            liquid_price,
            stop_loss,
            long_trend: Trend::Sideways,
            mid_trend: Trend::Sideways,
            short_trend: Trend::Sideways,
            short_trend_line_break_times: 0,
            rsi_level: RsiLevel::Normal,
            rsi_duration: 1,
            rsi_unit: "시간".to_string(),
            price_patterns: Vec::new(),
            ema_list: Vec::new(),
            kst_list: Vec::new(),
        }
    }

    /// 다우 이론 추세(장기/중기/단기)를 설정합니다.
    pub fn trends(mut self, long: Trend, mid: Trend, short: Trend) -> Self {
        self.long_trend = long;
        self.mid_trend = mid;
        self.short_trend = short;
        self
    }

    /// 단기 추세선 돌파 횟수를 설정합니다.
    pub fn break_times(mut self, times: u32) -> Self {
        self.short_trend_line_break_times = times;
        self
    }

    /// RSI 상태를 설정합니다.
    pub fn rsi(mut self, level: RsiLevel, duration: u32, unit: impl Into<String>) -> Self {
        self.rsi_level = level;
        self.rsi_duration = duration;
        self.rsi_unit = unit.into();
        self
    }

    /// 가격 형태를 추가합니다.
    ///
    /// "없음" 센티널은 이전에 추가된 모든 형태를 대체합니다. 센티널만
    /// 있는 목록에 실제 형태를 추가하면 센티널이 제거됩니다.
    pub fn pattern(mut self, pattern: PricePattern) -> Self {
        if pattern.kind == PatternKind::None {
            self.price_patterns.clear();
            self.price_patterns.push(PricePattern::none());
        } else {
            self.price_patterns
                .retain(|p| p.kind != PatternKind::None);
            self.price_patterns.push(pattern);
        }
        self
    }

    /// EMA 판독값을 추가합니다.
    pub fn ema(mut self, reading: EmaReading) -> Self {
        self.ema_list.push(reading);
        self
    }

    /// KST 판독값을 추가합니다.
    pub fn kst(mut self, reading: KstReading) -> Self {
        self.kst_list.push(reading);
        self
    }

    /// 불변식을 검증하고 파생 필드를 계산하여 레코드를 완성합니다.
    ///
    /// # 에러
    ///
    /// - 레버리지 < 1, 가격 ≤ 0, RSI 지속 시간 = 0
    /// - EMA/KST 목록이 3개가 아니거나 타임프레임이 중복된 경우
    /// - KST 기간에 0이 포함된 경우
    ///
    /// 손절가가 진입 방향과 반대쪽에 있으면 에러가 아니라 경고 로그만
    /// 남깁니다 (롱: 손절가는 진입가 아래, 숏: 위).
    pub fn build(self) -> AuditResult<TradeAnalysis> {
        if self.leverage < 1 {
            return Err(AuditError::InvalidPrecondition(
                "레버리지 배수는 1 이상이어야 합니다".to_string(),
            ));
        }
        for (name, price) in [
            ("진입가", self.open_price),
            ("강제청산가", self.liquid_price),
            ("손절가", self.stop_loss),
        ] {
            if price <= Decimal::ZERO {
                return Err(AuditError::InvalidPrecondition(format!(
                    "{}는 양수여야 합니다: {}",
                    name, price
                )));
            }
        }
        if self.rsi_duration == 0 {
            return Err(AuditError::InvalidPrecondition(
                "RSI 지속 시간은 양의 정수여야 합니다".to_string(),
            ));
        }

        validate_timeframe_list("EMA", self.ema_list.len(), self.ema_list.iter().map(|e| e.timeframe))?;
        validate_timeframe_list("KST", self.kst_list.len(), self.kst_list.iter().map(|k| k.timeframe))?;
        for kst in &self.kst_list {
            if kst.periods.iter().any(|&p| p == 0) {
                return Err(AuditError::InvalidPrecondition(format!(
                    "{} KST 기간은 모두 양의 정수여야 합니다",
                    kst.timeframe
                )));
            }
        }
        if self.price_patterns.len() > 1
            && self.price_patterns.iter().any(|p| p.kind == PatternKind::None)
        {
            return Err(AuditError::InvalidPrecondition(
                "형태 목록의 센티널(없음)은 단독으로만 존재할 수 있습니다".to_string(),
            ));
        }

        // 기초 손절률: 진입가 대비 손절가 거리의 절대값 (%)
        match self.open_dir {
            OpenDirection::Long if self.stop_loss >= self.open_price => {
                warn!(
                    coin = %self.coin_type,
                    "롱 손절가는 진입가보다 낮아야 합니다. 현재 설정이 비합리적일 수 있습니다"
                );
            }
            OpenDirection::Short if self.stop_loss <= self.open_price => {
                warn!(
                    coin = %self.coin_type,
                    "숏 손절가는 진입가보다 높아야 합니다. 현재 설정이 비합리적일 수 있습니다"
                );
            }
            _ => {}
        }
        let stop_loss_rate =
            ((self.open_price - self.stop_loss).abs() / self.open_price) * Decimal::from(100);
        let lever_stop_loss_risk = stop_loss_rate * Decimal::from(self.leverage);

        Ok(TradeAnalysis {
            coin_type: self.coin_type,
            open_dir: self.open_dir,
            leverage: self.leverage,
            open_price: self.open_price,
            liquid_price: self.liquid_price,
            stop_loss: self.stop_loss,
            stop_loss_rate,
            lever_stop_loss_risk,
            long_trend: self.long_trend,
            mid_trend: self.mid_trend,
            short_trend: self.short_trend,
            short_trend_line_break_times: self.short_trend_line_break_times,
            rsi_level: self.rsi_level,
            rsi_duration: self.rsi_duration,
            rsi_unit: self.rsi_unit,
            price_patterns: self.price_patterns,
            ema_list: self.ema_list,
            kst_list: self.kst_list,
        })
    }
}

fn validate_timeframe_list(
    name: &str,
    len: usize,
    timeframes: impl Iterator<Item = SignalTimeframe>,
) -> AuditResult<()> {
    if len != 3 {
        return Err(AuditError::InvalidPrecondition(format!(
            "{} 목록은 타임프레임별 1개씩 정확히 3개여야 합니다 (현재 {}개)",
            name, len
        )));
    }
    let mut seen: Vec<SignalTimeframe> = Vec::with_capacity(3);
    for tf in timeframes {
        if seen.contains(&tf) {
            return Err(AuditError::InvalidPrecondition(format!(
                "{} 목록에 {} 타임프레임이 중복되었습니다",
                name, tf
            )));
        }
        seen.push(tf);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn full_ema_kst(builder: TradeAnalysisBuilder) -> TradeAnalysisBuilder {
        let mut b = builder;
        for tf in SignalTimeframe::all() {
            b = b.ema(EmaReading {
                timeframe: tf,
                period: 26,
                trend: Trend::Up,
                is_turning: false,
            });
            b = b.kst(KstReading {
                timeframe: tf,
                periods: [10, 15, 20, 30],
                cross_state: CrossState::CrossUp,
            });
        }
        b
    }

    #[test]
    fn test_derived_rates() {
        let ta = full_ema_kst(TradeAnalysisBuilder::new(
            "SOL/USDT",
            OpenDirection::Long,
            5,
            dec!(100),
            dec!(80),
            dec!(95),
        ))
        .build()
        .unwrap();

        assert_eq!(ta.stop_loss_rate, dec!(5));
        assert_eq!(ta.lever_stop_loss_risk, dec!(25));
    }

    #[test]
    fn test_short_side_rate_is_absolute() {
        let ta = full_ema_kst(TradeAnalysisBuilder::new(
            "BTC/USDT",
            OpenDirection::Short,
            10,
            dec!(50000),
            dec!(60000),
            dec!(52000),
        ))
        .build()
        .unwrap();

        assert_eq!(ta.stop_loss_rate, dec!(4));
        assert_eq!(ta.lever_stop_loss_risk, dec!(40));
    }

    #[test]
    fn test_none_sentinel_clears_prior_patterns() {
        let builder = full_ema_kst(TradeAnalysisBuilder::new(
            "SOL/USDT",
            OpenDirection::Long,
            3,
            dec!(100),
            dec!(70),
            dec!(95),
        ))
        .pattern(PricePattern {
            kind: PatternKind::FlagUp,
            span: PatternSpan::Short,
            breakout: BreakoutDirection::None,
        })
        .pattern(PricePattern {
            kind: PatternKind::DoubleTop,
            span: PatternSpan::Medium,
            breakout: BreakoutDirection::None,
        })
        .pattern(PricePattern::none());

        let ta = builder.build().unwrap();
        assert_eq!(ta.price_patterns.len(), 1);
        assert_eq!(ta.price_patterns[0].kind, PatternKind::None);
        assert!(ta.has_no_pattern());
    }

    #[test]
    fn test_real_pattern_replaces_sentinel() {
        let ta = full_ema_kst(TradeAnalysisBuilder::new(
            "SOL/USDT",
            OpenDirection::Long,
            3,
            dec!(100),
            dec!(70),
            dec!(95),
        ))
        .pattern(PricePattern::none())
        .pattern(PricePattern {
            kind: PatternKind::DoubleBottom,
            span: PatternSpan::Long,
            breakout: BreakoutDirection::None,
        })
        .build()
        .unwrap();

        assert_eq!(ta.price_patterns.len(), 1);
        assert_eq!(ta.price_patterns[0].kind, PatternKind::DoubleBottom);
    }

    #[test]
    fn test_ema_arity_enforced() {
        let err = TradeAnalysisBuilder::new(
            "SOL/USDT",
            OpenDirection::Long,
            3,
            dec!(100),
            dec!(70),
            dec!(95),
        )
        .build()
        .unwrap_err();
        assert!(err.is_misuse());
    }

    #[test]
    fn test_duplicate_timeframe_rejected() {
        let mut builder = TradeAnalysisBuilder::new(
            "SOL/USDT",
            OpenDirection::Long,
            3,
            dec!(100),
            dec!(70),
            dec!(95),
        );
        for _ in 0..3 {
            builder = builder.ema(EmaReading {
                timeframe: SignalTimeframe::Day,
                period: 26,
                trend: Trend::Up,
                is_turning: false,
            });
        }
        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("중복"));
    }

    #[test]
    fn test_zero_kst_period_rejected() {
        let mut builder = TradeAnalysisBuilder::new(
            "SOL/USDT",
            OpenDirection::Long,
            3,
            dec!(100),
            dec!(70),
            dec!(95),
        );
        for tf in SignalTimeframe::all() {
            builder = builder.ema(EmaReading {
                timeframe: tf,
                period: 26,
                trend: Trend::Up,
                is_turning: false,
            });
            builder = builder.kst(KstReading {
                timeframe: tf,
                periods: [10, 0, 20, 30],
                cross_state: CrossState::None,
            });
        }
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_trend_for_span() {
        let ta = full_ema_kst(TradeAnalysisBuilder::new(
            "SOL/USDT",
            OpenDirection::Long,
            3,
            dec!(100),
            dec!(70),
            dec!(95),
        ))
        .trends(Trend::Up, Trend::Sideways, Trend::Down)
        .build()
        .unwrap();

        assert_eq!(ta.trend_for_span(PatternSpan::Long), Trend::Up);
        assert_eq!(ta.trend_for_span(PatternSpan::Medium), Trend::Sideways);
        assert_eq!(ta.trend_for_span(PatternSpan::Short), Trend::Down);
    }
}
