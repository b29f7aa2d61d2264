use serde::{Deserialize, Serialize};

/// 발열량(에너지/질량) 단위. 내부 기준은 MJ/kg 이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyContentUnit {
    MegajoulePerKilogram,
    GigajoulePerTonne,
    KilowattHourPerKilogram,
    MegajoulePerTonne,
    BtuPerPound,
}

impl EnergyContentUnit {
    pub const ALL: [EnergyContentUnit; 5] = [
        EnergyContentUnit::MegajoulePerKilogram,
        EnergyContentUnit::GigajoulePerTonne,
        EnergyContentUnit::KilowattHourPerKilogram,
        EnergyContentUnit::MegajoulePerTonne,
        EnergyContentUnit::BtuPerPound,
    ];

    /// 허용되는 단위 표기. 첫 항목이 대표 표기다.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            EnergyContentUnit::MegajoulePerKilogram => &["MJ/kg"],
            EnergyContentUnit::GigajoulePerTonne => &["GJ/t"],
            EnergyContentUnit::KilowattHourPerKilogram => &["kWh/kg"],
            EnergyContentUnit::MegajoulePerTonne => &["MJ/t"],
            EnergyContentUnit::BtuPerPound => &["Btu/lb", "btu/lbm"],
        }
    }
}

fn to_mj_per_kg(value: f64, unit: EnergyContentUnit) -> f64 {
    match unit {
        EnergyContentUnit::MegajoulePerKilogram | EnergyContentUnit::GigajoulePerTonne => value,
        EnergyContentUnit::KilowattHourPerKilogram => value * 3.6,
        EnergyContentUnit::MegajoulePerTonne => value / 1000.0,
        EnergyContentUnit::BtuPerPound => value * 0.002_326,
    }
}

fn from_mj_per_kg(value: f64, unit: EnergyContentUnit) -> f64 {
    match unit {
        EnergyContentUnit::MegajoulePerKilogram | EnergyContentUnit::GigajoulePerTonne => value,
        EnergyContentUnit::KilowattHourPerKilogram => value / 3.6,
        EnergyContentUnit::MegajoulePerTonne => value * 1000.0,
        EnergyContentUnit::BtuPerPound => value / 0.002_326,
    }
}

/// 발열량을 변환한다.
pub fn convert_energy_content(
    value: f64,
    from: EnergyContentUnit,
    to: EnergyContentUnit,
) -> f64 {
    let base = to_mj_per_kg(value, from);
    from_mj_per_kg(base, to)
}
