use serde::{Deserialize, Serialize};

use crate::quantity::Basis;

/// 탄소집약도 단위.
///
/// 에너지 기준(내부 기준 gCO2e/MJ)과 질량 기준(내부 기준 kgCO2e/kg)이 있으며,
/// 서로 다른 기준 사이의 변환은 지원하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarbonIntensityUnit {
    GramPerMegajoule,
    KilogramPerMegajoule,
    KilogramPerGigajoule,
    GramPerKilowattHour,
    KilogramPerMegawattHour,
    KilogramPerKilogram,
    TonnePerTonne,
    GramPerKilogram,
}

impl CarbonIntensityUnit {
    pub const ALL: [CarbonIntensityUnit; 8] = [
        CarbonIntensityUnit::GramPerMegajoule,
        CarbonIntensityUnit::KilogramPerMegajoule,
        CarbonIntensityUnit::KilogramPerGigajoule,
        CarbonIntensityUnit::GramPerKilowattHour,
        CarbonIntensityUnit::KilogramPerMegawattHour,
        CarbonIntensityUnit::KilogramPerKilogram,
        CarbonIntensityUnit::TonnePerTonne,
        CarbonIntensityUnit::GramPerKilogram,
    ];

    /// 허용되는 단위 표기. 첫 항목이 대표 표기다.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CarbonIntensityUnit::GramPerMegajoule => &["gCO2e/MJ", "gCO2/MJ", "g/MJ"],
            CarbonIntensityUnit::KilogramPerMegajoule => &["kgCO2e/MJ", "kgCO2/MJ", "kg/MJ"],
            CarbonIntensityUnit::KilogramPerGigajoule => &["kgCO2e/GJ", "kgCO2/GJ"],
            CarbonIntensityUnit::GramPerKilowattHour => &["gCO2e/kWh", "gCO2/kWh"],
            CarbonIntensityUnit::KilogramPerMegawattHour => &["kgCO2e/MWh", "kgCO2/MWh"],
            CarbonIntensityUnit::KilogramPerKilogram => &["kgCO2e/kg", "kgCO2/kg"],
            CarbonIntensityUnit::TonnePerTonne => &["tCO2e/t", "tCO2/t"],
            CarbonIntensityUnit::GramPerKilogram => &["gCO2e/kg", "gCO2/kg"],
        }
    }

    pub fn basis(self) -> Basis {
        match self {
            CarbonIntensityUnit::KilogramPerKilogram
            | CarbonIntensityUnit::TonnePerTonne
            | CarbonIntensityUnit::GramPerKilogram => Basis::Mass,
            _ => Basis::Energy,
        }
    }
}

/// 같은 기준의 내부 단위(gCO2e/MJ 또는 kgCO2e/kg)로 환산한다.
fn to_base(value: f64, unit: CarbonIntensityUnit) -> f64 {
    match unit {
        CarbonIntensityUnit::GramPerMegajoule => value,
        CarbonIntensityUnit::KilogramPerMegajoule => value * 1000.0,
        // kg/GJ = g/MJ
        CarbonIntensityUnit::KilogramPerGigajoule => value,
        CarbonIntensityUnit::GramPerKilowattHour => value / 3.6,
        CarbonIntensityUnit::KilogramPerMegawattHour => value / 3.6,
        CarbonIntensityUnit::KilogramPerKilogram | CarbonIntensityUnit::TonnePerTonne => value,
        CarbonIntensityUnit::GramPerKilogram => value / 1000.0,
    }
}

fn from_base(value: f64, unit: CarbonIntensityUnit) -> f64 {
    match unit {
        CarbonIntensityUnit::GramPerMegajoule => value,
        CarbonIntensityUnit::KilogramPerMegajoule => value / 1000.0,
        CarbonIntensityUnit::KilogramPerGigajoule => value,
        CarbonIntensityUnit::GramPerKilowattHour => value * 3.6,
        CarbonIntensityUnit::KilogramPerMegawattHour => value * 3.6,
        CarbonIntensityUnit::KilogramPerKilogram | CarbonIntensityUnit::TonnePerTonne => value,
        CarbonIntensityUnit::GramPerKilogram => value * 1000.0,
    }
}

/// 탄소집약도를 변환한다. 기준이 다르면 `None`을 반환한다.
pub fn convert_carbon_intensity(
    value: f64,
    from: CarbonIntensityUnit,
    to: CarbonIntensityUnit,
) -> Option<f64> {
    if from.basis() != to.basis() {
        return None;
    }
    Some(from_base(to_base(value, from), to))
}
