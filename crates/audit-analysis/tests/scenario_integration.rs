//! 진입 셋업 평가 시나리오 통합 테스트.
//!
//! 채점기와 모순점 분석기를 레코드 수준에서 함께 검증합니다.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use audit_analysis::contradiction::{
    diverging_direction_conflict_message, MSG_TREND_RSI_OVERBOUGHT, MSG_TRENDLINE_INVALIDATED,
    MSG_TRENDLINE_WEAKENED,
};
use audit_analysis::{
    evaluate, find_contradictions, score_direction_trend_match, score_lever_stop_loss,
    score_total, ConsistencyBand,
};
use audit_core::{
    BreakoutDirection, CrossState, EmaReading, KstReading, OpenDirection, PatternKind,
    PatternSpan, PricePattern, RsiLevel, SignalTimeframe, TradeAnalysis, TradeAnalysisBuilder,
    Trend,
};

/// 모든 신호가 롱을 지지하는 기준 셋업.
///
/// 진입가 100 / 손절가 95 → 손절률 5%, 레버리지 5배 → 위험률 25%.
fn aligned_long_setup() -> TradeAnalysisBuilder {
    let mut builder = TradeAnalysisBuilder::new(
        "SOL/USDT",
        OpenDirection::Long,
        5,
        dec!(100),
        dec!(70),
        dec!(95),
    )
    .trends(Trend::Up, Trend::Up, Trend::Up);
    for tf in SignalTimeframe::all() {
        builder = builder
            .ema(EmaReading {
                timeframe: tf,
                period: 26,
                trend: Trend::Up,
                is_turning: false,
            })
            .kst(KstReading {
                timeframe: tf,
                periods: [10, 15, 20, 30],
                cross_state: CrossState::CrossUp,
            });
    }
    builder
}

#[test]
fn scenario_a_fully_aligned_long_scores_100() {
    let ta = aligned_long_setup().build().unwrap();
    assert_eq!(ta.lever_stop_loss_risk, dec!(25));

    let report = evaluate(&ta);
    assert_eq!(report.ema_score, 100);
    assert_eq!(report.kst_score, 100);
    assert_eq!(report.base_stop_loss_score, 10);
    assert_eq!(report.lever_stop_loss_score, 10);
    assert_eq!(report.dir_trend_match_score, 20);
    assert_eq!(report.total_score, 100);
    assert_eq!(report.band, ConsistencyBand::High);
    assert!(!report.high_lever_risk);
    assert!(report.contradictions.is_empty());
}

#[test]
fn scenario_b_frequent_breaks_penalize_and_flag() {
    let ta = aligned_long_setup().break_times(7).build().unwrap();

    // 7회 돌파: 기본 20점에서 15점 감점
    assert_eq!(score_direction_trend_match(&ta), 5);

    let report = evaluate(&ta);
    assert_eq!(report.dir_trend_match_score, 5);
    assert_eq!(report.total_score, 85);
    assert!(report
        .contradictions
        .contains(&MSG_TRENDLINE_WEAKENED.to_string()));
    assert!(report
        .contradictions
        .contains(&MSG_TRENDLINE_INVALIDATED.to_string()));
}

#[test]
fn scenario_c_diverging_breakout_against_short_entry() {
    let mut builder = TradeAnalysisBuilder::new(
        "BTC/USDT",
        OpenDirection::Short,
        3,
        dec!(50000),
        dec!(60000),
        dec!(52500),
    )
    .trends(Trend::Down, Trend::Down, Trend::Down)
    .pattern(PricePattern {
        kind: PatternKind::TriangleDiverging,
        span: PatternSpan::Short,
        breakout: BreakoutDirection::Up,
    });
    for tf in SignalTimeframe::all() {
        builder = builder
            .ema(EmaReading {
                timeframe: tf,
                period: 26,
                trend: Trend::Down,
                is_turning: false,
            })
            .kst(KstReading {
                timeframe: tf,
                periods: [10, 15, 20, 30],
                cross_state: CrossState::CrossDown,
            });
    }
    let ta = builder.build().unwrap();

    let findings = find_contradictions(&ta, false);
    let expected =
        diverging_direction_conflict_message(&ta.price_patterns[0], OpenDirection::Short);
    assert!(findings.contains(&expected));
}

#[test]
fn scenario_d_overbought_rsi_in_uptrend() {
    // 다른 필드와 무관하게 추세 vs RSI 규칙은 발화한다
    let ta = aligned_long_setup()
        .rsi(RsiLevel::Overbought, 6, "시간")
        .break_times(2)
        .build()
        .unwrap();
    let findings = find_contradictions(&ta, false);
    assert_eq!(findings[0], MSG_TREND_RSI_OVERBOUGHT.to_string());
}

#[test]
fn penalty_plateau_between_breakpoints() {
    let score_at = |times: u32| {
        let ta = aligned_long_setup().break_times(times).build().unwrap();
        score_direction_trend_match(&ta)
    };

    // 4회는 3회와 동일, 6회는 5회와 동일 (의도된 계단식 조견표)
    assert_eq!(score_at(0), 20);
    assert_eq!(score_at(3), 17);
    assert_eq!(score_at(4), 20);
    assert_eq!(score_at(5), 12);
    assert_eq!(score_at(6), 20);
    assert_eq!(score_at(7), 5);
    assert_eq!(score_at(12), 5);

    // 감점 분기점에서 점수는 단조 비증가
    assert!(score_at(3) <= score_at(0));
    assert!(score_at(7) <= score_at(5));
}

fn arb_trend() -> impl Strategy<Value = Trend> {
    prop_oneof![
        Just(Trend::Up),
        Just(Trend::Down),
        Just(Trend::Sideways),
    ]
}

fn arb_cross() -> impl Strategy<Value = CrossState> {
    prop_oneof![
        Just(CrossState::CrossUp),
        Just(CrossState::CrossDown),
        Just(CrossState::None),
    ]
}

fn arb_analysis() -> impl Strategy<Value = TradeAnalysis> {
    (
        prop_oneof![Just(OpenDirection::Long), Just(OpenDirection::Short)],
        1u32..50,
        // 손절가를 진입가 100 기준 50~150 범위에서 생성
        5000i64..15000,
        [arb_trend(), arb_trend(), arb_trend()],
        0u32..20,
        [arb_trend(), arb_trend(), arb_trend()],
        [arb_cross(), arb_cross(), arb_cross()],
    )
        .prop_map(
            |(open_dir, leverage, stop_cents, trends, break_times, ema_trends, crosses)| {
                let stop = Decimal::new(stop_cents, 2);
                let mut builder = TradeAnalysisBuilder::new(
                    "TEST/USDT",
                    open_dir,
                    leverage,
                    dec!(100),
                    dec!(50),
                    stop,
                )
                .trends(trends[0], trends[1], trends[2])
                .break_times(break_times);
                for (i, tf) in SignalTimeframe::all().into_iter().enumerate() {
                    builder = builder
                        .ema(EmaReading {
                            timeframe: tf,
                            period: 26,
                            trend: ema_trends[i],
                            is_turning: false,
                        })
                        .kst(KstReading {
                            timeframe: tf,
                            periods: [10, 15, 20, 30],
                            cross_state: crosses[i],
                        });
                }
                builder.build().unwrap()
            },
        )
}

proptest! {
    /// 모든 유효 입력에서 종합 점수는 [0, 100] 범위 안에 있다.
    #[test]
    fn prop_total_score_in_range(ta in arb_analysis()) {
        let total = score_total(&ta);
        prop_assert!((0..=100).contains(&total));
    }

    /// 위험률 60% 초과는 항상 (0, true), 40% 이하는 항상 (10, false).
    #[test]
    fn prop_lever_risk_bands(cents in 0i64..1_000_000) {
        let risk = Decimal::new(cents, 2);
        let (score, high) = score_lever_stop_loss(risk);
        if risk > dec!(60.0) {
            prop_assert_eq!((score, high), (0, true));
        } else if risk <= dec!(40.0) {
            prop_assert_eq!((score, high), (10, false));
        } else {
            prop_assert_eq!((score, high), (5, false));
        }
    }

    /// 평가 보고서의 구간은 항상 종합 점수와 정합한다.
    #[test]
    fn prop_band_matches_total(ta in arb_analysis()) {
        let report = evaluate(&ta);
        prop_assert_eq!(report.band, ConsistencyBand::from_score(report.total_score));
        prop_assert_eq!(report.total_score, score_total(&ta));
    }
}

#[test]
fn total_100_requires_every_component_maxed() {
    // 한 구성요소만 낮춰도 100에 도달할 수 없다
    let mut builder = TradeAnalysisBuilder::new(
        "SOL/USDT",
        OpenDirection::Long,
        5,
        dec!(100),
        dec!(70),
        dec!(95),
    )
    .trends(Trend::Up, Trend::Up, Trend::Sideways);
    for tf in SignalTimeframe::all() {
        builder = builder
            .ema(EmaReading {
                timeframe: tf,
                period: 26,
                trend: Trend::Up,
                is_turning: false,
            })
            .kst(KstReading {
                timeframe: tf,
                periods: [10, 15, 20, 30],
                cross_state: CrossState::CrossUp,
            });
    }
    let ta = builder.build().unwrap();
    assert_eq!(score_total(&ta), 95);
}
