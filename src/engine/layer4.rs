//! 4단계: 최종 지표 (총 운영비, CO2 배출량, LCOP, LCCA).

use super::layer1::CoreParameters;
use super::layer2::{UnitCosts, GRAMS_PER_KILOGRAM};
use super::layer3::Aggregates;
use crate::error::{EngineError, EngineResult};
use crate::finance::capital_recovery_factor;
use crate::normalize::NormalizedInput;
use crate::quantity::Metric;

/// t → kg 단위 배율
pub const KILOGRAMS_PER_TONNE: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FinalKpis {
    /// [USD/yr]
    pub total_opex: f64,
    /// [kgCO2e/yr]
    pub total_co2_emissions: f64,
    pub capital_recovery_factor: f64,
    /// [USD/yr]
    pub annualized_capital: f64,
    /// [USD/t]
    pub lcop: f64,
    /// [USD/tCO2e]
    pub lcca: Metric,
}

/// LCOP 분자를 이루는 연간 비용 항목 [USD/yr].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LcopTerms {
    pub feedstock_cost: f64,
    pub hydrogen_cost: f64,
    pub electricity_cost: f64,
    pub indirect_opex: f64,
    pub annualized_capital: f64,
}

impl LcopTerms {
    pub fn total(&self) -> f64 {
        self.feedstock_cost
            + self.hydrogen_cost
            + self.electricity_cost
            + self.indirect_opex
            + self.annualized_capital
    }
}

/// 균등화 생산원가 [USD/t]. 생산량 0은 오류다.
pub fn levelized_cost_of_production(terms: &LcopTerms, production: f64) -> EngineResult<f64> {
    if production == 0.0 {
        return Err(EngineError::undefined("lcop", "생산량이 0"));
    }
    Ok(terms.total() / production)
}

/// 연간 CO2 배출량 [kgCO2e/yr].
///
/// `CI[kg/MJ] * 발열량[MJ/kg] * 생산량[t/yr] * 1000`
pub fn total_co2_emissions(carbon_intensity: f64, energy_content: f64, production: f64) -> f64 {
    carbon_intensity * energy_content * production * KILOGRAMS_PER_TONNE
}

/// 균등화 탄소 저감비용 [USD/tCO2e]. 배출량이 0이면 정의되지 않는다.
pub fn levelized_cost_of_carbon_abatement(
    lcop: f64,
    reference_fuel_price: f64,
    production: f64,
    emissions_kg: f64,
) -> Metric {
    if emissions_kg == 0.0 {
        return Metric::undefined("CO2 배출량이 0");
    }
    Metric::Defined((lcop - reference_fuel_price) * production / (emissions_kg / KILOGRAMS_PER_TONNE))
}

pub fn compute(
    input: &NormalizedInput,
    core: &CoreParameters,
    costs: &UnitCosts,
    agg: &Aggregates,
) -> EngineResult<FinalKpis> {
    let econ = &input.economics;
    let total_opex = agg.total_direct_opex + costs.indirect_opex;
    let total_co2_emissions = total_co2_emissions(
        agg.weighted_carbon_intensity,
        core.fuel_energy_content,
        core.total_production,
    );
    let crf = capital_recovery_factor(econ.discount_rate, econ.lifetime_years)?;
    let annualized_capital = core.tci * crf;
    let terms = LcopTerms {
        feedstock_cost: costs.feedstock_cost,
        hydrogen_cost: costs.hydrogen_cost,
        electricity_cost: costs.electricity_cost,
        indirect_opex: costs.indirect_opex,
        annualized_capital,
    };
    let lcop = levelized_cost_of_production(&terms, core.total_production)?;
    let lcca = levelized_cost_of_carbon_abatement(
        lcop,
        econ.reference_fuel_price,
        core.total_production,
        total_co2_emissions,
    );
    log::debug!(
        "4단계 완료: LCOP={lcop:.3} USD/t, CO2={total_co2_emissions:.3e} kg/yr (CI {:.3} g/MJ 기준)",
        agg.weighted_carbon_intensity * GRAMS_PER_KILOGRAM
    );
    Ok(FinalKpis {
        total_opex,
        total_co2_emissions,
        capital_recovery_factor: crf,
        annualized_capital,
        lcop,
        lcca,
    })
}
