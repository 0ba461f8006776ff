//! 포지션 리스크 설정.
//!
//! 유지증거금률과 통화별 리스크 임계값을 정의합니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 포지션 리스크 계산 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// 유지증거금률 (기본값: 0.5%, USDT 본위 무기한 계약 기준.
    /// 거래소에 따라 조정 가능)
    #[serde(default = "default_maintenance_margin_rate")]
    pub maintenance_margin_rate: Decimal,

    /// 기본 리스크 계수 임계값 (기본값: 1000)
    /// 리스크 계수 = 레버리지 × 포지션 비율(%)
    #[serde(default = "default_risk_threshold")]
    pub default_risk_threshold: Decimal,

    /// 통화별 임계값 재정의 (예: "BTC" → 1000)
    #[serde(default)]
    pub currency_thresholds: HashMap<String, Decimal>,
}

fn default_maintenance_margin_rate() -> Decimal {
    dec!(0.005)
}

fn default_risk_threshold() -> Decimal {
    dec!(1000)
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            maintenance_margin_rate: default_maintenance_margin_rate(),
            default_risk_threshold: default_risk_threshold(),
            currency_thresholds: HashMap::new(),
        }
    }
}

impl RiskConfig {
    /// 통화에 적용할 리스크 임계값을 반환합니다.
    ///
    /// 재정의가 없으면 기본 임계값을 사용합니다.
    pub fn threshold_for(&self, currency: &str) -> Decimal {
        self.currency_thresholds
            .get(currency)
            .copied()
            .unwrap_or(self.default_risk_threshold)
    }
}
