//! 지표 모순점 분석기.
//!
//! 레코드 전체를 교차 참조하여 논리적 모순을 찾아내는 독립 규칙
//! 집합입니다. 각 규칙은 서로 독립적이고 누적적이며(어떤 부분집합도
//! 동시에 발화 가능), 부분 점수가 아니라 원본 레코드를 직접 재평가
//! 합니다 (규칙이 점수 값을 명시적으로 재사용하는 경우 제외).
//!
//! 방출 순서는 규칙 그룹 1→7 순으로 고정되어 있고, 형태 규칙(그룹 3)
//! 내부에서는 입력 형태 목록 순서를 따릅니다. 이 순서는 관찰 가능한
//! 계약이며 테스트가 정확한 시퀀스를 단언할 수 있습니다.
//!
//! # 규칙 그룹
//!
//! 1. 추세 vs RSI (상승·과매수 / 하락·과매도)
//! 2. 단기 추세선 돌파 횟수 (≥2 약화, ≥3 무효 — 동시 발화 가능)
//! 3. 가격 형태별 규칙 (강세/약세 형태 vs 대응 주기 추세, 삼각형 규칙)
//! 4. EMA/KST 일관성 60점 미만
//! 5. 기초 손절률 (>10% 과대 / <1% 과소)
//! 6. 레버리지 손절 위험률 (>60% 강 / >40% 중 — 택일)
//! 7. 방향·추세 매칭 0점

use rust_decimal_macros::dec;

use audit_core::{
    BreakoutDirection, OpenDirection, PatternKind, PricePattern, RsiLevel, TradeAnalysis, Trend,
};

use crate::consistency::{
    score_direction_trend_match, score_ema_consistency, score_kst_consistency,
    ACCEPTABLE_CONSISTENCY_MIN,
};

/// 규칙 1: 상승 추세 + RSI 과매수.
pub const MSG_TREND_RSI_OVERBOUGHT: &str =
    "장기/중기 추세가 상승인데 RSI가 과매수 상태로, 추세 지속성이 의심됩니다";

/// 규칙 1: 하락 추세 + RSI 과매도.
pub const MSG_TREND_RSI_OVERSOLD: &str =
    "장기/중기 추세가 하락인데 RSI가 과매도 상태로, 추세 지속성이 의심됩니다";

/// 규칙 2: 돌파 2회 이상 — 추세 약화.
pub const MSG_TRENDLINE_WEAKENED: &str =
    "단기 추세선 돌파 횟수 2회 이상으로 추세 유효성이 약화되어 진입 논리 일관성이 떨어집니다";

/// 규칙 2: 돌파 3회 이상 — 추세 무효.
pub const MSG_TRENDLINE_INVALIDATED: &str =
    "[고위험] 단기 추세선 돌파 횟수 3회 이상으로 추세가 무효화되어 진입 논리에 근거가 없습니다";

/// 규칙 4: EMA 일관성 낮음.
pub const MSG_EMA_LOW: &str =
    "EMA 다중 타임프레임 신호 일관성이 낮아(60점 미만) 추세 판단이 혼란스럽습니다";

/// 규칙 4: KST 일관성 낮음.
pub const MSG_KST_LOW: &str =
    "KST 다중 타임프레임 신호 일관성이 낮아(60점 미만) 돌파 신호가 혼란스럽습니다";

/// 규칙 5: 손절률 과대.
pub const MSG_STOP_TOO_WIDE: &str =
    "기초 손절률이 10%를 초과하여 무레버리지 상태에서도 위험이 큽니다";

/// 규칙 5: 손절률 과소.
pub const MSG_STOP_TOO_TIGHT: &str =
    "기초 손절률이 1% 미만이라 작은 변동에도 손절될 수 있습니다";

/// 규칙 6: 레버리지 위험 극단.
pub const MSG_LEVER_RISK_EXTREME: &str =
    "[고위험] 레버리지 손절 위험률이 60%를 초과하여 손절 시 증거금의 60% 이상을 잃는 극단적 위험입니다";

/// 규칙 6: 레버리지 위험 상승.
pub const MSG_LEVER_RISK_ELEVATED: &str =
    "레버리지 손절 위험률이 40~60% 구간으로 손절 위험이 높아 신중한 진입이 필요합니다";

/// 규칙 7: 방향 지지 부재.
pub const MSG_NO_DIRECTION_SUPPORT: &str =
    "진입 방향과 추세 매칭도가 0점이고 단기 추세선 돌파가 잦아 진입 논리가 무효입니다";

/// 강세/약세 형태가 대응 주기 추세와 충돌할 때의 메시지.
pub fn pattern_trend_conflict_message(pattern: &PricePattern, trend: Trend) -> String {
    let bias = if pattern.kind.is_bullish() { "강세" } else { "약세" };
    format!(
        "{} 「{}」({} 형태)가 대응 주기의 {} 추세와 충돌합니다",
        pattern.span, pattern.kind, bias, trend
    )
}

/// 수렴 삼각형: 장기 횡보로 형태 유효성 의심.
pub fn converging_needs_trend_message(pattern: &PricePattern) -> String {
    format!(
        "{} 「수렴 삼각형」은 뚜렷한 추세를 전제로 하는데 장기 추세가 횡보라 형태 유효성이 의심됩니다",
        pattern.span
    )
}

/// 수렴 삼각형: 단기 추세와 돌파 방향의 모순.
pub fn converging_breakout_conflict_message(pattern: &PricePattern, short_trend: Trend) -> String {
    format!(
        "{} 「수렴 삼각형」 단기 추세는 {}인데 {}하여 추세 지속성이 모순됩니다",
        pattern.span, short_trend, pattern.breakout
    )
}

/// 확산 삼각형: 돌파 부재로 신호 무효.
pub fn diverging_no_breakout_message(pattern: &PricePattern) -> String {
    format!(
        "{} 「확산 삼각형」은 추세 반전을 예고하지만 아직 돌파가 없어 형태 신호가 무효입니다",
        pattern.span
    )
}

/// 확산 삼각형: 돌파 방향과 진입 방향의 충돌.
pub fn diverging_direction_conflict_message(
    pattern: &PricePattern,
    open_dir: OpenDirection,
) -> String {
    format!(
        "{} 「확산 삼각형」이 {}하여 {} 진입 방향과 충돌합니다",
        pattern.span, pattern.breakout, open_dir
    )
}

/// 지표 모순점을 분석합니다.
///
/// `_high_lever_risk`는 레버리지 손절 점수 계산이 산출한 플래그입니다.
/// 규칙 6은 위험률 구간을 레코드에서 직접 재산출하므로 이 값은 결과에
/// 영향을 주지 않으며, 점수 계산기와의 호출 규약을 위해 유지됩니다.
///
/// # 반환
///
/// 규칙 그룹 순서(1→7)로 정렬된 모순점 문자열 목록. 모순이 없으면 빈
/// 목록을 반환합니다.
pub fn find_contradictions(analysis: &TradeAnalysis, _high_lever_risk: bool) -> Vec<String> {
    let mut findings = Vec::new();

    // 그룹 1: 추세 vs RSI
    if (analysis.long_trend == Trend::Up || analysis.mid_trend == Trend::Up)
        && analysis.rsi_level == RsiLevel::Overbought
    {
        findings.push(MSG_TREND_RSI_OVERBOUGHT.to_string());
    }
    if (analysis.long_trend == Trend::Down || analysis.mid_trend == Trend::Down)
        && analysis.rsi_level == RsiLevel::Oversold
    {
        findings.push(MSG_TREND_RSI_OVERSOLD.to_string());
    }

    // 그룹 2: 단기 추세선 돌파 횟수 (두 플래그 동시 발화 가능)
    if analysis.short_trend_line_break_times >= 2 {
        findings.push(MSG_TRENDLINE_WEAKENED.to_string());
    }
    if analysis.short_trend_line_break_times >= 3 {
        findings.push(MSG_TRENDLINE_INVALIDATED.to_string());
    }

    // 그룹 3: 가격 형태별 규칙 (입력 목록 순서 유지)
    for pattern in &analysis.price_patterns {
        if pattern.kind == PatternKind::None {
            continue;
        }
        let span_trend = analysis.trend_for_span(pattern.span);

        if pattern.kind.is_bullish() && span_trend == Trend::Down {
            findings.push(pattern_trend_conflict_message(pattern, Trend::Down));
        }
        if pattern.kind.is_bearish() && span_trend == Trend::Up {
            findings.push(pattern_trend_conflict_message(pattern, Trend::Up));
        }

        if pattern.kind == PatternKind::TriangleConverging {
            if analysis.long_trend == Trend::Sideways {
                findings.push(converging_needs_trend_message(pattern));
            }
            if analysis.short_trend == Trend::Up && pattern.breakout == BreakoutDirection::Down {
                findings.push(converging_breakout_conflict_message(pattern, Trend::Up));
            }
            if analysis.short_trend == Trend::Down && pattern.breakout == BreakoutDirection::Up {
                findings.push(converging_breakout_conflict_message(pattern, Trend::Down));
            }
        }

        if pattern.kind == PatternKind::TriangleDiverging {
            if analysis.long_trend != Trend::Sideways
                && pattern.breakout == BreakoutDirection::None
            {
                findings.push(diverging_no_breakout_message(pattern));
            }
            if pattern.breakout == BreakoutDirection::Up
                && analysis.open_dir == OpenDirection::Short
            {
                findings.push(diverging_direction_conflict_message(
                    pattern,
                    OpenDirection::Short,
                ));
            }
            if pattern.breakout == BreakoutDirection::Down
                && analysis.open_dir == OpenDirection::Long
            {
                findings.push(diverging_direction_conflict_message(
                    pattern,
                    OpenDirection::Long,
                ));
            }
        }
    }

    // 그룹 4: EMA/KST 일관성 낮음
    if score_ema_consistency(&analysis.ema_list) < ACCEPTABLE_CONSISTENCY_MIN {
        findings.push(MSG_EMA_LOW.to_string());
    }
    if score_kst_consistency(&analysis.kst_list) < ACCEPTABLE_CONSISTENCY_MIN {
        findings.push(MSG_KST_LOW.to_string());
    }

    // 그룹 5: 기초 손절률
    if analysis.stop_loss_rate > dec!(10.0) {
        findings.push(MSG_STOP_TOO_WIDE.to_string());
    }
    if analysis.stop_loss_rate < dec!(1.0) {
        findings.push(MSG_STOP_TOO_TIGHT.to_string());
    }

    // 그룹 6: 레버리지 손절 위험률 (강/중 택일, 레코드에서 재산출)
    if analysis.lever_stop_loss_risk > dec!(60.0) {
        findings.push(MSG_LEVER_RISK_EXTREME.to_string());
    } else if analysis.lever_stop_loss_risk > dec!(40.0) {
        findings.push(MSG_LEVER_RISK_ELEVATED.to_string());
    }

    // 그룹 7: 방향·추세 매칭 부재
    if score_direction_trend_match(analysis) == 0 {
        findings.push(MSG_NO_DIRECTION_SUPPORT.to_string());
    }

    findings
}
