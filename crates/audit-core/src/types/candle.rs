//! 캔들(OHLCV) 레코드.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 단일 캔들의 시가/고가/저가/종가/거래량.
///
/// 지지/저항 계산 입력으로 사용됩니다. 거래량과 시각은 선택 입력이며
/// 거래량 생략 시 0으로 처리됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// 캔들 시작 시각 (UTC)
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량
    #[serde(default)]
    pub volume: Decimal,
}

impl Candle {
    /// 고가-저가 범위.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    /// 고가가 저가 이상인 유효한 캔들인지 확인합니다.
    pub fn is_valid(&self) -> bool {
        self.high >= self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_range_and_validity() {
        let candle = Candle {
            timestamp: None,
            open: dec!(100),
            high: dec!(110),
            low: dec!(95),
            close: dec!(105),
            volume: dec!(1000),
        };
        assert_eq!(candle.range(), dec!(15));
        assert!(candle.is_valid());

        let broken = Candle {
            timestamp: None,
            open: dec!(100),
            high: dec!(90),
            low: dec!(95),
            close: dec!(92),
            volume: Decimal::ZERO,
        };
        assert!(!broken.is_valid());
    }
}
