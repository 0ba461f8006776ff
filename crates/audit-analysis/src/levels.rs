//! 지지/저항 수준 계산기.
//!
//! 캔들 시퀀스에서 세 종류의 지지/저항을 계산합니다:
//! - 기간 내 역사적 고점(저항)과 저점(지지)
//! - 최신 캔들 기준 클래식 피봇 포인트 (S1~S3, R1~R3)
//! - 밀집 거래 구간: 종가 평균 ± 1 표준편차

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use audit_core::{AuditError, AuditResult, Candle, LevelTimeframe};

/// 지지/저항 계산 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportResistance {
    /// 계산에 사용한 타임프레임
    pub timeframe: LevelTimeframe,
    /// 입력 캔들 수
    pub candle_count: usize,
    /// 기간 내 최고가 (저항)
    pub highest_high: Decimal,
    /// 기간 내 최저가 (지지)
    pub lowest_low: Decimal,
    /// 피봇 포인트 (최신 캔들의 (H+L+C)/3)
    pub pivot: Decimal,
    /// 1차 지지선 (2P − H)
    pub s1: Decimal,
    /// 2차 지지선 (P − range)
    pub s2: Decimal,
    /// 3차 지지선 (P − 2·range)
    pub s3: Decimal,
    /// 1차 저항선 (2P − L)
    pub r1: Decimal,
    /// 2차 저항선 (P + range)
    pub r2: Decimal,
    /// 3차 저항선 (P + 2·range)
    pub r3: Decimal,
    /// 종가 평균
    pub avg_close: Decimal,
    /// 종가 모표준편차
    pub std_close: Decimal,
    /// 밀집 거래 지지 (평균 − 표준편차)
    pub dense_support: Decimal,
    /// 밀집 거래 저항 (평균 + 표준편차)
    pub dense_resistance: Decimal,
}

impl SupportResistance {
    /// 캔들 시퀀스에서 지지/저항 수준을 계산합니다.
    ///
    /// 피봇 포인트는 목록의 마지막(최신) 캔들로 계산합니다.
    ///
    /// # 에러
    ///
    /// 캔들 목록이 비어 있거나 고가 < 저가인 캔들이 있으면
    /// `InvalidPrecondition`을 반환합니다.
    pub fn compute(candles: &[Candle], timeframe: LevelTimeframe) -> AuditResult<Self> {
        if candles.is_empty() {
            return Err(AuditError::InvalidPrecondition(
                "캔들 목록은 비어 있을 수 없습니다".to_string(),
            ));
        }
        if let Some(idx) = candles.iter().position(|c| !c.is_valid()) {
            return Err(AuditError::InvalidPrecondition(format!(
                "{}번째 캔들의 고가가 저가보다 낮습니다",
                idx + 1
            )));
        }

        let mut highest_high = candles[0].high;
        let mut lowest_low = candles[0].low;
        for candle in candles {
            highest_high = highest_high.max(candle.high);
            lowest_low = lowest_low.min(candle.low);
        }

        // 피봇 포인트: 최신 캔들 기준
        let latest = candles.last().unwrap();
        let pivot = (latest.high + latest.low + latest.close) / Decimal::from(3);
        let range = latest.range();
        let two = Decimal::from(2);
        let s1 = two * pivot - latest.high;
        let s2 = pivot - range;
        let s3 = pivot - two * range;
        let r1 = two * pivot - latest.low;
        let r2 = pivot + range;
        let r3 = pivot + two * range;

        let count = Decimal::from(candles.len() as u64);
        let avg_close = candles.iter().map(|c| c.close).sum::<Decimal>() / count;

        // 표준편차는 f64로 계산 후 복원 (제곱근 연산)
        let avg_f64 = avg_close.to_f64().unwrap_or(0.0);
        let variance = candles
            .iter()
            .map(|c| {
                let diff = c.close.to_f64().unwrap_or(0.0) - avg_f64;
                diff * diff
            })
            .sum::<f64>()
            / candles.len() as f64;
        let std_close = Decimal::from_f64(variance.sqrt()).unwrap_or(Decimal::ZERO);

        Ok(Self {
            timeframe,
            candle_count: candles.len(),
            highest_high,
            lowest_low,
            pivot,
            s1,
            s2,
            s3,
            r1,
            r2,
            r3,
            avg_close,
            std_close,
            dense_support: avg_close - std_close,
            dense_resistance: avg_close + std_close,
        })
    }
}
