use serde::{Deserialize, Serialize};

use crate::quantity::Basis;

/// 제품 1톤당 투입량(수율) 단위.
///
/// 질량 기준은 t/t, 에너지 기준(전력 등)은 MWh/t 를 내부 기준으로 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YieldUnit {
    TonnePerTonne,
    KilogramPerKilogram,
    KilogramPerTonne,
    Percent,
    MegawattHourPerTonne,
    KilowattHourPerKilogram,
    KilowattHourPerTonne,
    GigajoulePerTonne,
}

impl YieldUnit {
    pub const ALL: [YieldUnit; 8] = [
        YieldUnit::TonnePerTonne,
        YieldUnit::KilogramPerKilogram,
        YieldUnit::KilogramPerTonne,
        YieldUnit::Percent,
        YieldUnit::MegawattHourPerTonne,
        YieldUnit::KilowattHourPerKilogram,
        YieldUnit::KilowattHourPerTonne,
        YieldUnit::GigajoulePerTonne,
    ];

    /// 허용되는 단위 표기. 첫 항목이 대표 표기다.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            YieldUnit::TonnePerTonne => &["t/t"],
            YieldUnit::KilogramPerKilogram => &["kg/kg"],
            YieldUnit::KilogramPerTonne => &["kg/t"],
            YieldUnit::Percent => &["%", "wt%"],
            YieldUnit::MegawattHourPerTonne => &["MWh/t"],
            YieldUnit::KilowattHourPerKilogram => &["kWh/kg"],
            YieldUnit::KilowattHourPerTonne => &["kWh/t"],
            YieldUnit::GigajoulePerTonne => &["GJ/t"],
        }
    }

    pub fn basis(self) -> Basis {
        match self {
            YieldUnit::TonnePerTonne
            | YieldUnit::KilogramPerKilogram
            | YieldUnit::KilogramPerTonne
            | YieldUnit::Percent => Basis::Mass,
            _ => Basis::Energy,
        }
    }
}

fn to_base(value: f64, unit: YieldUnit) -> f64 {
    match unit {
        YieldUnit::TonnePerTonne | YieldUnit::KilogramPerKilogram => value,
        YieldUnit::KilogramPerTonne => value / 1000.0,
        YieldUnit::Percent => value / 100.0,
        // kWh/kg = MWh/t
        YieldUnit::MegawattHourPerTonne | YieldUnit::KilowattHourPerKilogram => value,
        YieldUnit::KilowattHourPerTonne => value / 1000.0,
        YieldUnit::GigajoulePerTonne => value / 3.6,
    }
}

fn from_base(value: f64, unit: YieldUnit) -> f64 {
    match unit {
        YieldUnit::TonnePerTonne | YieldUnit::KilogramPerKilogram => value,
        YieldUnit::KilogramPerTonne => value * 1000.0,
        YieldUnit::Percent => value * 100.0,
        YieldUnit::MegawattHourPerTonne | YieldUnit::KilowattHourPerKilogram => value,
        YieldUnit::KilowattHourPerTonne => value * 1000.0,
        YieldUnit::GigajoulePerTonne => value * 3.6,
    }
}

/// 수율을 변환한다. 기준이 다르면 `None`을 반환한다.
pub fn convert_yield(value: f64, from: YieldUnit, to: YieldUnit) -> Option<f64> {
    if from.basis() != to.basis() {
        return None;
    }
    Some(from_base(to_base(value, from), to))
}
