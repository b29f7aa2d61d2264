use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuantityClass {
    /// 생산능력(질량/시간)
    Capacity,
    /// 질량 기준 단가(통화/질량)
    Price,
    /// 에너지 기준 단가(통화/에너지)
    EnergyPrice,
    /// 발열량(에너지/질량)
    EnergyContent,
    /// 탄소집약도(CO2 질량/에너지 또는 CO2 질량/질량)
    CarbonIntensity,
    /// 수율(질량/질량 또는 에너지/질량)
    Yield,
    /// 분율(0~1)
    Fraction,
    /// 금액
    Currency,
    /// 밀도
    Density,
}

impl QuantityClass {
    pub const ALL: [QuantityClass; 9] = [
        QuantityClass::Capacity,
        QuantityClass::Price,
        QuantityClass::EnergyPrice,
        QuantityClass::EnergyContent,
        QuantityClass::CarbonIntensity,
        QuantityClass::Yield,
        QuantityClass::Fraction,
        QuantityClass::Currency,
        QuantityClass::Density,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuantityClass::Capacity => "capacity",
            QuantityClass::Price => "price",
            QuantityClass::EnergyPrice => "energy-price",
            QuantityClass::EnergyContent => "energy-content",
            QuantityClass::CarbonIntensity => "carbon-intensity",
            QuantityClass::Yield => "yield",
            QuantityClass::Fraction => "fraction",
            QuantityClass::Currency => "currency",
            QuantityClass::Density => "density",
        }
    }
}

impl fmt::Display for QuantityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QuantityClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('_', "-");
        QuantityClass::ALL
            .into_iter()
            .find(|c| c.label() == key)
            .ok_or_else(|| format!("알 수 없는 물리량: {s}"))
    }
}

/// 같은 물리량 안에서 서로 환산 가능한 단위 묶음.
///
/// 탄소집약도와 수율은 질량 기준과 에너지 기준이 공존하는데, 두 기준 사이의
/// 환산은 발열량이 필요하므로 단위 변환기에서 다루지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Basis {
    /// 기준이 하나뿐인 물리량
    Single,
    /// 질량 기준(…/kg, t/t)
    Mass,
    /// 에너지 기준(…/MJ, MWh/t)
    Energy,
}

/// 계산값 또는 "정의되지 않음" 표시.
///
/// 분모가 0이거나 전제 조건이 성립하지 않는 지표는 0이나 무한대 대신
/// `Undefined`로 보고한다.
#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
    Defined(f64),
    Undefined { reason: String },
}

impl Metric {
    pub fn undefined(reason: impl Into<String>) -> Self {
        Metric::Undefined {
            reason: reason.into(),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Defined(v) => Some(*v),
            Metric::Undefined { .. } => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Metric::Defined(_))
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Metric::Defined(v) => {
                let mut s = serializer.serialize_struct("Metric", 1)?;
                s.serialize_field("value", v)?;
                s.end()
            }
            Metric::Undefined { reason } => {
                let mut s = serializer.serialize_struct("Metric", 2)?;
                s.serialize_field("value", &Option::<f64>::None)?;
                s.serialize_field("undefined_reason", reason)?;
                s.end()
            }
        }
    }
}
