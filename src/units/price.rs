use serde::{Deserialize, Serialize};

/// 질량 기준 단가 단위. 내부 기준은 USD/t 이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceUnit {
    UsdPerTonne,
    UsdPerKilogram,
    UsdPerPound,
    KiloUsdPerTonne,
}

impl PriceUnit {
    pub const ALL: [PriceUnit; 4] = [
        PriceUnit::UsdPerTonne,
        PriceUnit::UsdPerKilogram,
        PriceUnit::UsdPerPound,
        PriceUnit::KiloUsdPerTonne,
    ];

    /// 허용되는 단위 표기. 첫 항목이 대표 표기다.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            PriceUnit::UsdPerTonne => &["USD/t", "$/t", "usd/tonne"],
            PriceUnit::UsdPerKilogram => &["USD/kg", "$/kg"],
            PriceUnit::UsdPerPound => &["USD/lb", "$/lb"],
            PriceUnit::KiloUsdPerTonne => &["kUSD/t", "k$/t"],
        }
    }
}

fn to_usd_per_tonne(value: f64, unit: PriceUnit) -> f64 {
    match unit {
        PriceUnit::UsdPerTonne => value,
        PriceUnit::UsdPerKilogram => value * 1000.0,
        PriceUnit::UsdPerPound => value / 0.000_453_592,
        PriceUnit::KiloUsdPerTonne => value * 1000.0,
    }
}

fn from_usd_per_tonne(value: f64, unit: PriceUnit) -> f64 {
    match unit {
        PriceUnit::UsdPerTonne => value,
        PriceUnit::UsdPerKilogram => value / 1000.0,
        PriceUnit::UsdPerPound => value * 0.000_453_592,
        PriceUnit::KiloUsdPerTonne => value / 1000.0,
    }
}

/// 질량 기준 단가를 변환한다.
pub fn convert_price(value: f64, from: PriceUnit, to: PriceUnit) -> f64 {
    let base = to_usd_per_tonne(value, from);
    from_usd_per_tonne(base, to)
}
