//! `margin` 명령: 포지션 리스크 및 강제청산가 계산.

use std::fmt::Write as _;

use anyhow::{bail, Context};
use rust_decimal::Decimal;

use audit_core::OpenDirection;
use audit_risk::{PositionRiskCalculator, PositionRiskInput, PositionRiskSummary, RiskConfig};

/// `margin` 명령 설정.
#[derive(Debug, Clone)]
pub struct MarginConfig {
    /// 거래 통화 (예: BTC)
    pub currency: String,
    /// 진입 방향 ("long" 또는 "short")
    pub direction: String,
    /// 총 자본 (USDT)
    pub capital: Decimal,
    /// 레버리지 배수
    pub leverage: Decimal,
    /// 포지션 비율 (0~100, %)
    pub ratio: Decimal,
    /// 진입 가격 (USDT)
    pub entry: Decimal,
}

/// 진입 방향 인자를 파싱합니다.
pub fn parse_direction(value: &str) -> anyhow::Result<OpenDirection> {
    match value.to_lowercase().as_str() {
        "long" | "l" => Ok(OpenDirection::Long),
        "short" | "s" => Ok(OpenDirection::Short),
        other => bail!("지원하지 않는 진입 방향: {} (long 또는 short)", other),
    }
}

/// 포지션 리스크를 계산하고 출력합니다.
pub fn run_margin(config: MarginConfig) -> anyhow::Result<()> {
    let direction = parse_direction(&config.direction)?;
    let calculator = PositionRiskCalculator::new(RiskConfig::default());
    let input = PositionRiskInput {
        currency: config.currency,
        direction,
        total_capital: config.capital,
        leverage: config.leverage,
        position_ratio: config.ratio,
        entry_price: config.entry,
    };
    let summary = calculator.assess(&input).context("포지션 리스크 계산 실패")?;
    print!("{}", render_margin(&summary));
    Ok(())
}

/// 포지션 리스크 계산 결과를 렌더링합니다.
pub fn render_margin(summary: &PositionRiskSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "===== 포지션 리스크 계산 결과 =====");
    let _ = writeln!(out, "리스크 임계값: {}", summary.risk_threshold);
    let _ = writeln!(out, "리스크 계수: {}", summary.risk_coefficient);
    let _ = writeln!(
        out,
        "리스크 등급: {} — {}",
        summary.risk_level,
        summary.risk_level.description()
    );
    let _ = writeln!(out, "초기 증거금 (점유): {} USDT", summary.initial_margin);
    let _ = writeln!(out, "포지션 가치: {} USDT", summary.position_value);
    let _ = writeln!(out, "포지션 수량: {} 코인", summary.position_amount);
    let _ = writeln!(out, "유지증거금 요건: {} USDT", summary.maintenance_margin);
    match summary.margin_to_add {
        Some(amount) => {
            let _ = writeln!(out, "추가 필요 증거금: {} USDT", amount);
        }
        None => {
            let _ = writeln!(out, "추가 필요 증거금: 해당 없음 (포지션 없음)");
        }
    }
    match summary.liquidation_price {
        Some(price) => {
            let _ = writeln!(out, "강제청산가: {} USDT", price);
        }
        None => {
            let _ = writeln!(out, "강제청산가: 해당 없음 (포지션 없음)");
        }
    }
    let _ = writeln!(out, "=====================================");
    out
}
