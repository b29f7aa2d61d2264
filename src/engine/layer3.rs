//! 3단계: 집계.

use super::layer1::CoreParameters;
use super::layer2::UnitCosts;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregates {
    /// 원료+수소+전력 [USD/yr]
    pub total_direct_opex: f64,
    /// 생산량 가중 평균 탄소집약도 [kgCO2e/MJ]
    pub weighted_carbon_intensity: f64,
}

pub fn compute(core: &CoreParameters, costs: &UnitCosts) -> Aggregates {
    let total_direct_opex = costs.feedstock_cost + costs.hydrogen_cost + costs.electricity_cost;
    let weighted_carbon_intensity = costs
        .revenues
        .iter()
        .zip(&core.products)
        .map(|(r, p)| r.carbon_intensity * p.mass_fraction)
        .sum();
    log::debug!("3단계 완료: 직접 운영비={total_direct_opex:.3e} USD/yr");
    Aggregates {
        total_direct_opex,
        weighted_carbon_intensity,
    }
}
