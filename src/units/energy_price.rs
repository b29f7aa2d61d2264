use serde::{Deserialize, Serialize};

/// 에너지 기준 단가 단위. 내부 기준은 USD/MWh 이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyPriceUnit {
    UsdPerMegawattHour,
    UsdPerKilowattHour,
    UsdPerGigajoule,
    UsdPerMegajoule,
    UsdPerMmbtu,
}

impl EnergyPriceUnit {
    pub const ALL: [EnergyPriceUnit; 5] = [
        EnergyPriceUnit::UsdPerMegawattHour,
        EnergyPriceUnit::UsdPerKilowattHour,
        EnergyPriceUnit::UsdPerGigajoule,
        EnergyPriceUnit::UsdPerMegajoule,
        EnergyPriceUnit::UsdPerMmbtu,
    ];

    /// 허용되는 단위 표기. 첫 항목이 대표 표기다.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            EnergyPriceUnit::UsdPerMegawattHour => &["USD/MWh", "$/MWh"],
            EnergyPriceUnit::UsdPerKilowattHour => &["USD/kWh", "$/kWh"],
            EnergyPriceUnit::UsdPerGigajoule => &["USD/GJ", "$/GJ"],
            EnergyPriceUnit::UsdPerMegajoule => &["USD/MJ", "$/MJ"],
            EnergyPriceUnit::UsdPerMmbtu => &["USD/MMBtu", "$/MMBtu"],
        }
    }
}

// 1 MWh = 3.6 GJ = 3600 MJ, 1 MMBtu = 0.293071 MWh
const GJ_PER_MWH: f64 = 3.6;
const MWH_PER_MMBTU: f64 = 0.293_071;

fn to_usd_per_mwh(value: f64, unit: EnergyPriceUnit) -> f64 {
    match unit {
        EnergyPriceUnit::UsdPerMegawattHour => value,
        EnergyPriceUnit::UsdPerKilowattHour => value * 1000.0,
        EnergyPriceUnit::UsdPerGigajoule => value * GJ_PER_MWH,
        EnergyPriceUnit::UsdPerMegajoule => value * GJ_PER_MWH * 1000.0,
        EnergyPriceUnit::UsdPerMmbtu => value / MWH_PER_MMBTU,
    }
}

fn from_usd_per_mwh(value: f64, unit: EnergyPriceUnit) -> f64 {
    match unit {
        EnergyPriceUnit::UsdPerMegawattHour => value,
        EnergyPriceUnit::UsdPerKilowattHour => value / 1000.0,
        EnergyPriceUnit::UsdPerGigajoule => value / GJ_PER_MWH,
        EnergyPriceUnit::UsdPerMegajoule => value / (GJ_PER_MWH * 1000.0),
        EnergyPriceUnit::UsdPerMmbtu => value * MWH_PER_MMBTU,
    }
}

/// 에너지 기준 단가를 변환한다.
pub fn convert_energy_price(value: f64, from: EnergyPriceUnit, to: EnergyPriceUnit) -> f64 {
    let base = to_usd_per_mwh(value, from);
    from_usd_per_mwh(base, to)
}
