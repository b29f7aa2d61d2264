use thiserror::Error;

use crate::conversion::ConversionError;

/// 계산 엔진이 보고하는 오류.
///
/// 오류는 발견된 지점에서 그대로 전파되며, 이후 단계의 계산은 수행하지 않는다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 입력값 누락·범위 위반. 어떤 계산 단계도 실행되기 전에 발생한다.
    #[error("입력 검증 실패 ({field}): {message}")]
    Validation { field: String, message: String },

    #[error("단위 변환 불가: {0}")]
    UnsupportedUnitConversion(#[from] ConversionError),

    /// 분모가 0이거나 전제 조건이 성립하지 않는 지표
    #[error("지표를 정의할 수 없음 ({metric}): {reason}")]
    UndefinedMetric { metric: String, reason: String },

    #[error("IRR 수렴 실패: {reason}")]
    IrrNotConvergent { reason: String },
}

impl EngineError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn undefined(metric: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::UndefinedMetric {
            metric: metric.into(),
            reason: reason.into(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
