//! 분율·금액·밀도처럼 단위 수가 적은 물리량.

use serde::{Deserialize, Serialize};

/// 분율 단위. 내부 기준은 0~1 소수다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FractionUnit {
    Fraction,
    Percent,
}

impl FractionUnit {
    pub const ALL: [FractionUnit; 2] = [FractionUnit::Fraction, FractionUnit::Percent];

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            FractionUnit::Fraction => &["fraction", "-", "kg/kg"],
            FractionUnit::Percent => &["%", "wt%", "percent"],
        }
    }

    fn factor(self) -> f64 {
        match self {
            FractionUnit::Fraction => 1.0,
            FractionUnit::Percent => 0.01,
        }
    }
}

/// 금액 단위. 내부 기준은 USD다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencyUnit {
    Usd,
    KiloUsd,
    MegaUsd,
}

impl CurrencyUnit {
    pub const ALL: [CurrencyUnit; 3] = [CurrencyUnit::Usd, CurrencyUnit::KiloUsd, CurrencyUnit::MegaUsd];

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CurrencyUnit::Usd => &["USD", "$"],
            CurrencyUnit::KiloUsd => &["kUSD", "k$"],
            CurrencyUnit::MegaUsd => &["MUSD", "M$", "MMUSD"],
        }
    }

    fn factor(self) -> f64 {
        match self {
            CurrencyUnit::Usd => 1.0,
            CurrencyUnit::KiloUsd => 1.0e3,
            CurrencyUnit::MegaUsd => 1.0e6,
        }
    }
}

/// 밀도 단위. 내부 기준은 kg/m3 다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DensityUnit {
    KilogramPerCubicMeter,
    KilogramPerLiter,
    GramPerCubicCentimeter,
}

impl DensityUnit {
    pub const ALL: [DensityUnit; 3] = [
        DensityUnit::KilogramPerCubicMeter,
        DensityUnit::KilogramPerLiter,
        DensityUnit::GramPerCubicCentimeter,
    ];

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            DensityUnit::KilogramPerCubicMeter => &["kg/m3", "kg/m^3"],
            DensityUnit::KilogramPerLiter => &["kg/L"],
            DensityUnit::GramPerCubicCentimeter => &["g/cm3", "g/cm^3", "g/mL", "g/ml"],
        }
    }

    fn factor(self) -> f64 {
        match self {
            DensityUnit::KilogramPerCubicMeter => 1.0,
            DensityUnit::KilogramPerLiter | DensityUnit::GramPerCubicCentimeter => 1000.0,
        }
    }
}

/// 분율을 변환한다.
pub fn convert_fraction(value: f64, from: FractionUnit, to: FractionUnit) -> f64 {
    value * from.factor() / to.factor()
}

/// 금액을 변환한다.
pub fn convert_currency(value: f64, from: CurrencyUnit, to: CurrencyUnit) -> f64 {
    value * from.factor() / to.factor()
}

/// 밀도를 변환한다.
pub fn convert_density(value: f64, from: DensityUnit, to: DensityUnit) -> f64 {
    value * from.factor() / to.factor()
}
