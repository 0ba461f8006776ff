//! 신호 일관성 채점기.
//!
//! 진입 셋업 레코드의 서로 겹치지 않는 구간에서 5개의 부분 점수를
//! 계산하고 고정 가중치로 합산하여 종합 일관성 점수(0~100)를 산출합니다.
//!
//! # 점수 구성 (합계 최대 100)
//!
//! 1. **EMA 일관성** (0~100, 가중치 0.3): 3개 타임프레임 추세의 최대
//!    동일 그룹 비율
//! 2. **KST 일관성** (0~100, 가중치 0.3): 동일 규칙을 돌파 상태에 적용
//! 3. **기초 손절률** (0~10, 직접 가산): 3~8% 구간 만점
//! 4. **레버리지 손절 위험** (0~10, 직접 가산): 40% 이하 만점,
//!    60% 초과 시 고위험 플래그
//! 5. **방향·추세 매칭** (0~20, 직접 가산): 매칭 수 기반, 단기 추세선
//!    돌파 횟수에 따른 감점
//!
//! EMA/KST는 100점 스케일에 0.3을 곱하고 나머지는 점수 그대로 더하는
//! 비대칭 가중이 설계상 의도이며, 최대치가 정확히 100이 되도록
//! 맞춰져 있습니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

use audit_core::{EmaReading, KstReading, TradeAnalysis};

use crate::contradiction::find_contradictions;

/// "높은 일관성" 구간의 하한 (점수 계약의 일부).
pub const HIGH_CONSISTENCY_MIN: i32 = 80;

/// "보통 일관성" 구간의 하한 (점수 계약의 일부).
pub const ACCEPTABLE_CONSISTENCY_MIN: i32 = 60;

/// 3개 값 중 최대 동일 그룹 크기를 100점 스케일로 환산.
///
/// 빈 목록은 0점으로 처리합니다. 정상 경로에서는 목록 길이가 항상
/// 3으로 고정되어 있으므로 이 분기는 방어적 처리입니다.
fn largest_group_score<T: Eq + Hash>(values: impl ExactSizeIterator<Item = T>) -> i32 {
    let len = values.len();
    if len == 0 {
        return 0;
    }
    let mut counts: HashMap<T, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let max_count = counts.values().copied().max().unwrap_or(0);
    ((max_count * 100) / len) as i32
}

/// EMA 다중 타임프레임 신호 일관성 점수 (0~100).
///
/// 3개 EMA 추세 값 중 가장 큰 동일 추세 그룹의 크기 m에 대해
/// floor(100·m/3)을 반환합니다.
pub fn score_ema_consistency(ema_list: &[EmaReading]) -> i32 {
    largest_group_score(ema_list.iter().map(|e| e.trend))
}

/// KST 다중 타임프레임 신호 일관성 점수 (0~100).
///
/// EMA와 동일한 규칙을 돌파 상태 값에 적용합니다.
pub fn score_kst_consistency(kst_list: &[KstReading]) -> i32 {
    largest_group_score(kst_list.iter().map(|k| k.cross_state))
}

/// 기초 손절률 합리성 점수 (0/5/10).
///
/// 3.0~8.0% → 10점, 1.0~3.0% 미만 또는 8.0% 초과~10.0% → 5점,
/// 그 외 → 0점. 경계값 3.0과 8.0은 만점 구간에 포함됩니다.
pub fn score_base_stop_loss(stop_loss_rate: Decimal) -> i32 {
    if stop_loss_rate >= dec!(3.0) && stop_loss_rate <= dec!(8.0) {
        10
    } else if (stop_loss_rate >= dec!(1.0) && stop_loss_rate < dec!(3.0))
        || (stop_loss_rate > dec!(8.0) && stop_loss_rate <= dec!(10.0))
    {
        5
    } else {
        0
    }
}

/// 레버리지 손절 위험 점수 (0/5/10)와 고위험 플래그.
///
/// 40% 이하 → (10, false), 40% 초과~60% → (5, false),
/// 60% 초과 → (0, true).
pub fn score_lever_stop_loss(lever_stop_loss_risk: Decimal) -> (i32, bool) {
    if lever_stop_loss_risk <= dec!(40.0) {
        (10, false)
    } else if lever_stop_loss_risk <= dec!(60.0) {
        (5, false)
    } else {
        (0, true)
    }
}

/// 진입 방향·추세 매칭 점수 (0~20, 감점 반영).
///
/// 장기/중기/단기 추세 중 진입 방향을 지지하는 개수(롱↔상승, 숏↔하락)로
/// 기본 점수 {0→0, 1→5, 2→15, 3→20}을 정한 뒤, 단기 추세선 돌파 횟수에
/// 따라 감점합니다: 정확히 3회 → −3, 정확히 5회 → −8, 7회 이상 → −15.
/// 4회와 6회는 감점이 없습니다 (의도된 계단식 조견표). 결과는 0 미만으로
/// 내려가지 않습니다.
pub fn score_direction_trend_match(analysis: &TradeAnalysis) -> i32 {
    let supporting = analysis.open_dir.supporting_trend();
    let match_count = [analysis.long_trend, analysis.mid_trend, analysis.short_trend]
        .iter()
        .filter(|&&t| t == supporting)
        .count();

    let base_score = match match_count {
        3 => 20,
        2 => 15,
        1 => 5,
        _ => 0,
    };

    let penalty = match analysis.short_trend_line_break_times {
        3 => 3,
        5 => 8,
        t if t >= 7 => 15,
        _ => 0,
    };

    (base_score - penalty).max(0)
}

/// 종합 일관성 점수 (0~100).
///
/// round(0.3·EMA + 0.3·KST) + 기초손절 + 레버리지손절 + 방향매칭.
/// 최대치: 30 + 30 + 10 + 10 + 20 = 100.
pub fn score_total(analysis: &TradeAnalysis) -> i32 {
    let ema_score = score_ema_consistency(&analysis.ema_list);
    let kst_score = score_kst_consistency(&analysis.kst_list);
    let base_sl_score = score_base_stop_loss(analysis.stop_loss_rate);
    let (lever_sl_score, _) = score_lever_stop_loss(analysis.lever_stop_loss_risk);
    let dir_match_score = score_direction_trend_match(analysis);

    let total = 0.3 * f64::from(ema_score)
        + 0.3 * f64::from(kst_score)
        + f64::from(base_sl_score + lever_sl_score + dir_match_score);
    total.round() as i32
}

/// 종합 점수의 해석 구간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyBand {
    /// 80점 이상: 신호 고도 일치
    High,
    /// 60점 이상: 신호 기본 일치
    Acceptable,
    /// 60점 미만: 신호 혼란, 관망 권고
    Weak,
}

impl ConsistencyBand {
    /// 종합 점수에서 구간을 결정합니다.
    pub fn from_score(score: i32) -> Self {
        if score >= HIGH_CONSISTENCY_MIN {
            ConsistencyBand::High
        } else if score >= ACCEPTABLE_CONSISTENCY_MIN {
            ConsistencyBand::Acceptable
        } else {
            ConsistencyBand::Weak
        }
    }

    /// 보고서용 평가 문구.
    pub fn description(&self) -> &'static str {
        match self {
            ConsistencyBand::High => {
                "신호가 고도로 일치하고 리스크 관리가 합리적이며, 진입 논리에 강한 기술적 근거가 있습니다"
            }
            ConsistencyBand::Acceptable => {
                "신호가 기본적으로 일치하고 리스크 관리가 무난하며, 진입 논리에 일정한 기술적 근거가 있습니다"
            }
            ConsistencyBand::Weak => {
                "신호가 혼란스럽거나 리스크 관리가 비합리적이어서 진입 근거가 약합니다. 관망을 권고합니다"
            }
        }
    }
}

impl fmt::Display for ConsistencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyBand::High => write!(f, "높음"),
            ConsistencyBand::Acceptable => write!(f, "보통"),
            ConsistencyBand::Weak => write!(f, "약함"),
        }
    }
}

/// 한 번의 호출로 산출되는 전체 평가 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// EMA 일관성 점수 (0~100)
    pub ema_score: i32,
    /// KST 일관성 점수 (0~100)
    pub kst_score: i32,
    /// 기초 손절률 점수 (0/5/10)
    pub base_stop_loss_score: i32,
    /// 레버리지 손절 위험 점수 (0/5/10)
    pub lever_stop_loss_score: i32,
    /// 방향·추세 매칭 점수 (0~20)
    pub dir_trend_match_score: i32,
    /// 종합 일관성 점수 (0~100)
    pub total_score: i32,
    /// 점수 해석 구간
    pub band: ConsistencyBand,
    /// 레버리지 손절 고위험 여부 (위험률 > 60%)
    pub high_lever_risk: bool,
    /// 식별된 지표 모순점 (규칙 그룹 순서 고정)
    pub contradictions: Vec<String>,
}

/// 레코드 전체를 평가하여 보고서를 생성합니다.
///
/// 모든 부분 점수, 종합 점수, 해석 구간, 고위험 플래그, 모순점 목록을
/// 한 번에 계산합니다. 순수 함수이며 레코드별 병렬 호출이 안전합니다.
pub fn evaluate(analysis: &TradeAnalysis) -> ConsistencyReport {
    let ema_score = score_ema_consistency(&analysis.ema_list);
    let kst_score = score_kst_consistency(&analysis.kst_list);
    let base_stop_loss_score = score_base_stop_loss(analysis.stop_loss_rate);
    let (lever_stop_loss_score, high_lever_risk) =
        score_lever_stop_loss(analysis.lever_stop_loss_risk);
    let dir_trend_match_score = score_direction_trend_match(analysis);
    let total_score = score_total(analysis);
    let contradictions = find_contradictions(analysis, high_lever_risk);

    debug!(
        coin = %analysis.coin_type,
        ema_score,
        kst_score,
        base_stop_loss_score,
        lever_stop_loss_score,
        dir_trend_match_score,
        total_score,
        contradiction_count = contradictions.len(),
        "consistency evaluation complete"
    );

    ConsistencyReport {
        ema_score,
        kst_score,
        base_stop_loss_score,
        lever_stop_loss_score,
        dir_trend_match_score,
        total_score,
        band: ConsistencyBand::from_score(total_score),
        high_lever_risk,
        contradictions,
    }
}
