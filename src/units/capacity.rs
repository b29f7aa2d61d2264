use serde::{Deserialize, Serialize};

/// 생산능력(질량/시간) 단위. 내부 기준은 t/yr 이다.
///
/// 일·시간 단위는 달력 기준(365일, 8760시간)으로 연간 환산한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapacityUnit {
    TonnePerYear,
    KilogramPerYear,
    KilotonnePerYear,
    MegatonnePerYear,
    TonnePerDay,
    TonnePerHour,
    KilogramPerHour,
}

impl CapacityUnit {
    pub const ALL: [CapacityUnit; 7] = [
        CapacityUnit::TonnePerYear,
        CapacityUnit::KilogramPerYear,
        CapacityUnit::KilotonnePerYear,
        CapacityUnit::MegatonnePerYear,
        CapacityUnit::TonnePerDay,
        CapacityUnit::TonnePerHour,
        CapacityUnit::KilogramPerHour,
    ];

    /// 허용되는 단위 표기. 첫 항목이 대표 표기다.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CapacityUnit::TonnePerYear => &["t/yr", "t/y", "t/a", "tpa"],
            CapacityUnit::KilogramPerYear => &["kg/yr", "kg/y", "kg/a"],
            CapacityUnit::KilotonnePerYear => &["kt/yr", "kt/y", "kt/a", "ktpa"],
            CapacityUnit::MegatonnePerYear => &["Mt/yr", "Mt/y", "Mt/a", "Mtpa"],
            CapacityUnit::TonnePerDay => &["t/d", "t/day", "tpd"],
            CapacityUnit::TonnePerHour => &["t/h", "t/hr"],
            CapacityUnit::KilogramPerHour => &["kg/h", "kg/hr"],
        }
    }
}

fn to_tonne_per_year(value: f64, unit: CapacityUnit) -> f64 {
    match unit {
        CapacityUnit::TonnePerYear => value,
        CapacityUnit::KilogramPerYear => value / 1000.0,
        CapacityUnit::KilotonnePerYear => value * 1000.0,
        CapacityUnit::MegatonnePerYear => value * 1_000_000.0,
        CapacityUnit::TonnePerDay => value * 365.0,
        CapacityUnit::TonnePerHour => value * 8760.0,
        CapacityUnit::KilogramPerHour => value * 8.76,
    }
}

fn from_tonne_per_year(value: f64, unit: CapacityUnit) -> f64 {
    match unit {
        CapacityUnit::TonnePerYear => value,
        CapacityUnit::KilogramPerYear => value * 1000.0,
        CapacityUnit::KilotonnePerYear => value / 1000.0,
        CapacityUnit::MegatonnePerYear => value / 1_000_000.0,
        CapacityUnit::TonnePerDay => value / 365.0,
        CapacityUnit::TonnePerHour => value / 8760.0,
        CapacityUnit::KilogramPerHour => value / 8.76,
    }
}

/// 생산능력을 변환한다.
pub fn convert_capacity(value: f64, from: CapacityUnit, to: CapacityUnit) -> f64 {
    let base = to_tonne_per_year(value, from);
    from_tonne_per_year(base, to)
}
