//! 진입 셋업 검증 시스템의 에러 타입.
//!
//! 이 모듈은 분석 엔진 전반에서 사용되는 에러 타입을 정의합니다.
//! 핵심 엔진의 유일한 실패 모드는 사전조건 위반입니다. 열거형 필드는
//! 닫힌 enum으로 표현되어 잘못된 값 자체가 표현 불가능하므로,
//! 사전조건 위반은 고정 길이 목록이나 수치 범위에서만 발생합니다.

use thiserror::Error;

/// 핵심 분석 에러.
#[derive(Debug, Error)]
pub enum AuditError {
    /// 사전조건 위반 (고정 길이 목록, 타임프레임 중복, 범위 밖 수치)
    #[error("사전조건 위반: {0}")]
    InvalidPrecondition(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 분석 작업을 위한 Result 타입.
pub type AuditResult<T> = Result<T, AuditError>;

impl AuditError {
    /// 입력 계층에서 이미 걸러졌어야 하는 프로그래밍 오류인지 확인합니다.
    ///
    /// 사전조건 위반은 일시적 상태가 아니라 호출부의 오용 신호이므로
    /// 재시도 대상이 아닙니다.
    pub fn is_misuse(&self) -> bool {
        matches!(self, AuditError::InvalidPrecondition(_))
    }
}
