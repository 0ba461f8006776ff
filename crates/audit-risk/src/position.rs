//! 포지션 리스크 및 강제청산가 계산기.
//!
//! USDT 본위 무기한 계약의 격리(isolated) 모드를 가정하고 다음을
//! 계산합니다:
//! - 리스크 계수(레버리지 × 포지션 비율)와 등급 판정
//! - 초기 증거금 / 유지증거금 / 추가 필요 증거금
//! - 강제청산가 (롱/숏)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use audit_core::{AuditError, AuditResult, OpenDirection};

use crate::config::RiskConfig;

/// 리스크 계수 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// 리스크 계수 0 (미진입 또는 무레버리지)
    None,
    /// 임계값의 80% 이내
    Safe,
    /// 임계값 근접 (80% 초과 ~ 100%)
    Warning,
    /// 임계값 초과 (거래 금지 권고)
    Exceeded,
}

impl RiskLevel {
    /// 보고서용 판정 문구.
    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::None => "무위험 (미진입/무레버리지)",
            RiskLevel::Safe => "안전 (리스크 계수가 임계값의 80% 이내)",
            RiskLevel::Warning => "예비 경고 (리스크 계수가 임계값에 근접)",
            RiskLevel::Exceeded => "초과 (리스크 계수가 임계값을 초과, 거래 금지 권고)",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::None => write!(f, "무위험"),
            RiskLevel::Safe => write!(f, "안전"),
            RiskLevel::Warning => write!(f, "예비 경고"),
            RiskLevel::Exceeded => write!(f, "초과"),
        }
    }
}

/// 포지션 리스크 계산 입력.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRiskInput {
    /// 거래 통화 (예: "BTC")
    pub currency: String,
    /// 진입 방향
    pub direction: OpenDirection,
    /// 총 자본 (USDT)
    pub total_capital: Decimal,
    /// 레버리지 배수 (1 이상)
    pub leverage: Decimal,
    /// 단일 포지션 비율 (총 자본 대비 %, 0~100)
    pub position_ratio: Decimal,
    /// 진입 가격 (USDT)
    pub entry_price: Decimal,
}

/// 포지션 리스크 계산 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRiskSummary {
    /// 적용된 리스크 임계값
    pub risk_threshold: Decimal,
    /// 리스크 계수 = 레버리지 × 포지션 비율
    pub risk_coefficient: Decimal,
    /// 리스크 등급
    pub risk_level: RiskLevel,
    /// 초기(점유) 증거금 = 총 자본 × 비율/100
    pub initial_margin: Decimal,
    /// 포지션 가치 = 초기 증거금 × 레버리지
    pub position_value: Decimal,
    /// 포지션 수량 (코인) = 포지션 가치 / 진입가
    pub position_amount: Decimal,
    /// 유지증거금 = 포지션 가치 × 유지증거금률
    pub maintenance_margin: Decimal,
    /// 강제청산가 (포지션 수량이 0이면 정의되지 않음)
    pub liquidation_price: Option<Decimal>,
    /// 추가 필요 증거금 (포지션 수량이 0이면 정의되지 않음)
    pub margin_to_add: Option<Decimal>,
}

/// 포지션 리스크 계산기.
#[derive(Debug, Clone, Default)]
pub struct PositionRiskCalculator {
    config: RiskConfig,
}

impl PositionRiskCalculator {
    /// 설정으로 계산기를 생성합니다.
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// 포지션 리스크를 평가합니다.
    ///
    /// # 에러
    ///
    /// 레버리지 < 1, 포지션 비율이 0~100 밖, 진입가 ≤ 0, 총 자본 ≤ 0인
    /// 경우 `InvalidPrecondition`을 반환합니다.
    pub fn assess(&self, input: &PositionRiskInput) -> AuditResult<PositionRiskSummary> {
        if input.leverage < Decimal::ONE {
            return Err(AuditError::InvalidPrecondition(
                "레버리지 배수는 1 이상이어야 합니다 (주요 거래소 최소 1x)".to_string(),
            ));
        }
        if input.position_ratio < Decimal::ZERO || input.position_ratio > Decimal::from(100) {
            return Err(AuditError::InvalidPrecondition(
                "포지션 비율은 0~100(%) 범위여야 합니다".to_string(),
            ));
        }
        if input.entry_price <= Decimal::ZERO {
            return Err(AuditError::InvalidPrecondition(
                "진입 가격은 양수여야 합니다".to_string(),
            ));
        }
        if input.total_capital <= Decimal::ZERO {
            return Err(AuditError::InvalidPrecondition(
                "총 자본은 양수여야 합니다".to_string(),
            ));
        }

        let threshold = self.config.threshold_for(&input.currency);
        let mmr = self.config.maintenance_margin_rate;

        let risk_coefficient = input.leverage * input.position_ratio;
        let risk_level = judge_risk_level(risk_coefficient, threshold);

        let initial_margin = input.total_capital * input.position_ratio / Decimal::from(100);
        let position_value = initial_margin * input.leverage;
        let position_amount = position_value / input.entry_price;
        let maintenance_margin = position_value * mmr;

        // 포지션 수량 0이면 청산가가 정의되지 않음 (비율 0%)
        let (liquidation_price, margin_to_add) = if position_amount.is_zero() {
            (None, None)
        } else {
            let buffer = (initial_margin - position_value * mmr) / position_amount;
            let liquidation = match input.direction {
                OpenDirection::Long => input.entry_price - buffer,
                OpenDirection::Short => input.entry_price + buffer,
            };

            // 청산가 도달 시점의 미실현 손실 기준 잔여 증거금
            let unrealized_loss = match input.direction {
                OpenDirection::Long => (input.entry_price - liquidation) * position_amount,
                OpenDirection::Short => (liquidation - input.entry_price) * position_amount,
            };
            let surplus = initial_margin - unrealized_loss;
            let to_add = (maintenance_margin - surplus).max(Decimal::ZERO);
            (Some(liquidation), Some(to_add))
        };

        debug!(
            currency = %input.currency,
            %risk_coefficient,
            level = %risk_level,
            %initial_margin,
            %position_value,
            "position risk assessed"
        );

        Ok(PositionRiskSummary {
            risk_threshold: threshold,
            risk_coefficient,
            risk_level,
            initial_margin,
            position_value,
            position_amount,
            maintenance_margin,
            liquidation_price,
            margin_to_add,
        })
    }
}

/// 리스크 계수를 임계값과 비교하여 등급을 판정합니다.
fn judge_risk_level(coefficient: Decimal, threshold: Decimal) -> RiskLevel {
    let safe_bound = threshold * Decimal::new(8, 1); // 0.8
    if coefficient.is_zero() {
        RiskLevel::None
    } else if coefficient <= safe_bound {
        RiskLevel::Safe
    } else if coefficient <= threshold {
        RiskLevel::Warning
    } else {
        RiskLevel::Exceeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(leverage: Decimal, ratio: Decimal) -> PositionRiskInput {
        PositionRiskInput {
            currency: "BTC".to_string(),
            direction: OpenDirection::Long,
            total_capital: dec!(1000),
            leverage,
            position_ratio: ratio,
            entry_price: dec!(100),
        }
    }

    #[test]
    fn test_margins_and_liquidation_long() {
        let calc = PositionRiskCalculator::default();
        let summary = calc.assess(&input(dec!(10), dec!(10))).unwrap();

        // 자본 1000, 비율 10% → 초기 증거금 100, 포지션 가치 1000, 수량 10
        assert_eq!(summary.initial_margin, dec!(100));
        assert_eq!(summary.position_value, dec!(1000));
        assert_eq!(summary.position_amount, dec!(10));
        assert_eq!(summary.maintenance_margin, dec!(5));

        // 롱 청산가 = 100 − (100 − 5)/10 = 90.5
        assert_eq!(summary.liquidation_price, Some(dec!(90.5)));
        // 청산 시점 잔여 증거금 = 유지증거금 → 추가 필요분 0
        assert_eq!(summary.margin_to_add, Some(dec!(0)));
    }

    #[test]
    fn test_liquidation_short_is_above_entry() {
        let calc = PositionRiskCalculator::default();
        let mut short_input = input(dec!(10), dec!(10));
        short_input.direction = OpenDirection::Short;
        let summary = calc.assess(&short_input).unwrap();
        assert_eq!(summary.liquidation_price, Some(dec!(109.5)));
    }

    #[test]
    fn test_risk_level_bands() {
        let calc = PositionRiskCalculator::default();

        // 10 × 10 = 100 ≤ 800 → 안전
        assert_eq!(
            calc.assess(&input(dec!(10), dec!(10))).unwrap().risk_level,
            RiskLevel::Safe
        );
        // 20 × 45 = 900 → 예비 경고
        assert_eq!(
            calc.assess(&input(dec!(20), dec!(45))).unwrap().risk_level,
            RiskLevel::Warning
        );
        // 20 × 60 = 1200 → 초과
        assert_eq!(
            calc.assess(&input(dec!(20), dec!(60))).unwrap().risk_level,
            RiskLevel::Exceeded
        );
        // 비율 0 → 무위험, 청산가 미정의
        let summary = calc.assess(&input(dec!(10), dec!(0))).unwrap();
        assert_eq!(summary.risk_level, RiskLevel::None);
        assert_eq!(summary.liquidation_price, None);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let calc = PositionRiskCalculator::default();

        let mut bad = input(dec!(0.5), dec!(10));
        assert!(calc.assess(&bad).is_err());

        bad = input(dec!(10), dec!(101));
        assert!(calc.assess(&bad).is_err());

        bad = input(dec!(10), dec!(10));
        bad.entry_price = Decimal::ZERO;
        assert!(calc.assess(&bad).is_err());

        bad = input(dec!(10), dec!(10));
        bad.total_capital = dec!(-5);
        assert!(calc.assess(&bad).is_err());
    }
}
