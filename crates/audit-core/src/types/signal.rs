//! 신호 열거형 정의.
//!
//! 원본 입력에서 느슨한 문자열로 다루던 값(추세, 방향, 돌파 상태 등)을
//! 닫힌 enum으로 정의합니다. 잘못된 값은 타입 수준에서 표현 불가능하므로
//! 비교 지점마다 문자열 오타를 검사할 필요가 없습니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 추세 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// 상승 추세
    Up,
    /// 하락 추세
    Down,
    /// 횡보
    Sideways,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "상승"),
            Trend::Down => write!(f, "하락"),
            Trend::Sideways => write!(f, "횡보"),
        }
    }
}

/// 진입 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenDirection {
    /// 롱 (매수)
    Long,
    /// 숏 (매도)
    Short,
}

impl OpenDirection {
    /// 이 진입 방향을 지지하는 추세를 반환합니다.
    ///
    /// 롱은 상승 추세, 숏은 하락 추세와 정합합니다.
    pub fn supporting_trend(&self) -> Trend {
        match self {
            OpenDirection::Long => Trend::Up,
            OpenDirection::Short => Trend::Down,
        }
    }
}

impl fmt::Display for OpenDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenDirection::Long => write!(f, "롱"),
            OpenDirection::Short => write!(f, "숏"),
        }
    }
}

/// RSI 수준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiLevel {
    /// 과매수
    Overbought,
    /// 과매도
    Oversold,
    /// 중립 구간
    Normal,
}

impl fmt::Display for RsiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsiLevel::Overbought => write!(f, "과매수"),
            RsiLevel::Oversold => write!(f, "과매도"),
            RsiLevel::Normal => write!(f, "중립"),
        }
    }
}

/// KST 시그널선 돌파 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossState {
    /// 시그널선 상향 돌파
    CrossUp,
    /// 시그널선 하향 돌파
    CrossDown,
    /// 미돌파
    None,
}

impl fmt::Display for CrossState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossState::CrossUp => write!(f, "상향 돌파"),
            CrossState::CrossDown => write!(f, "하향 돌파"),
            CrossState::None => write!(f, "미돌파"),
        }
    }
}

/// EMA/KST 지표가 평가되는 타임프레임.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalTimeframe {
    /// 4시간봉
    H4,
    /// 일봉
    Day,
    /// 주봉
    Week,
}

impl SignalTimeframe {
    /// 전체 타임프레임을 고정 순서(4시간 → 일 → 주)로 반환합니다.
    pub fn all() -> [SignalTimeframe; 3] {
        [SignalTimeframe::H4, SignalTimeframe::Day, SignalTimeframe::Week]
    }
}

impl fmt::Display for SignalTimeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalTimeframe::H4 => write!(f, "4시간봉"),
            SignalTimeframe::Day => write!(f, "일봉"),
            SignalTimeframe::Week => write!(f, "주봉"),
        }
    }
}

/// 가격 형태의 지속 기간 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSpan {
    /// 단기 (1주 이하)
    Short,
    /// 중기 (1~4주)
    Medium,
    /// 장기 (4주 초과)
    Long,
}

impl fmt::Display for PatternSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternSpan::Short => write!(f, "단기"),
            PatternSpan::Medium => write!(f, "중기"),
            PatternSpan::Long => write!(f, "장기"),
        }
    }
}

/// 삼각형 형태의 돌파 방향.
///
/// 삼각형 계열 형태에서만 의미가 있으며, 그 외 형태는 `None`입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakoutDirection {
    /// 상단 경계 돌파
    Up,
    /// 하단 경계 돌파
    Down,
    /// 미돌파
    None,
}

impl fmt::Display for BreakoutDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakoutDirection::Up => write!(f, "상단 돌파"),
            BreakoutDirection::Down => write!(f, "하단 돌파"),
            BreakoutDirection::None => write!(f, "미돌파"),
        }
    }
}

/// 가격 형태 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// 헤드앤숄더 탑 (약세)
    HeadShouldersTop,
    /// 역헤드앤숄더 (강세)
    HeadShouldersBottom,
    /// 상승 깃발형 (강세)
    FlagUp,
    /// 하락 깃발형 (약세)
    FlagDown,
    /// 수렴 삼각형 (추세 지속)
    TriangleConverging,
    /// 확산 삼각형 (추세 반전)
    TriangleDiverging,
    /// 이중 천장 (약세)
    DoubleTop,
    /// 이중 바닥 (강세)
    DoubleBottom,
    /// 형태 없음 (센티널: 목록 전체를 대체)
    None,
}

impl PatternKind {
    /// 강세 형태 여부.
    pub fn is_bullish(&self) -> bool {
        matches!(
            self,
            PatternKind::HeadShouldersBottom | PatternKind::FlagUp | PatternKind::DoubleBottom
        )
    }

    /// 약세 형태 여부.
    pub fn is_bearish(&self) -> bool {
        matches!(
            self,
            PatternKind::HeadShouldersTop | PatternKind::FlagDown | PatternKind::DoubleTop
        )
    }

    /// 삼각형 계열 여부.
    pub fn is_triangle(&self) -> bool {
        matches!(
            self,
            PatternKind::TriangleConverging | PatternKind::TriangleDiverging
        )
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::HeadShouldersTop => write!(f, "헤드앤숄더 탑"),
            PatternKind::HeadShouldersBottom => write!(f, "역헤드앤숄더"),
            PatternKind::FlagUp => write!(f, "상승 깃발형"),
            PatternKind::FlagDown => write!(f, "하락 깃발형"),
            PatternKind::TriangleConverging => write!(f, "수렴 삼각형"),
            PatternKind::TriangleDiverging => write!(f, "확산 삼각형"),
            PatternKind::DoubleTop => write!(f, "이중 천장"),
            PatternKind::DoubleBottom => write!(f, "이중 바닥"),
            PatternKind::None => write!(f, "없음"),
        }
    }
}

/// 지지/저항 계산에 쓰이는 캔들 타임프레임.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelTimeframe {
    /// 일봉
    Daily,
    /// 4시간봉
    FourHour,
}

impl fmt::Display for LevelTimeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelTimeframe::Daily => write!(f, "일봉"),
            LevelTimeframe::FourHour => write!(f, "4시간봉"),
        }
    }
}
