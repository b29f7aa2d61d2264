//! 2단계: 단위 비용과 매출.

use super::layer1::CoreParameters;
use crate::normalize::{Feedstock, NormalizedInput};

/// g → kg 단위 배율
pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;
/// 1 MWh = 3600 MJ
const MJ_PER_MWH: f64 = 3600.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FeedstockCost {
    pub name: String,
    /// [USD/yr]
    pub annual_cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRevenue {
    pub name: String,
    /// 탄소집약도 민감도를 반영한 판매가 [USD/t]
    pub effective_price: f64,
    /// [USD/yr]
    pub revenue: f64,
    /// 제품에 배분된 탄소집약도 [kgCO2e/MJ]
    pub carbon_intensity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitCosts {
    /// [USD/yr]
    pub indirect_opex: f64,
    pub feedstock_costs: Vec<FeedstockCost>,
    /// [USD/yr]
    pub feedstock_cost: f64,
    /// [USD/yr]
    pub hydrogen_cost: f64,
    /// [USD/yr]
    pub electricity_cost: f64,
    /// [kgCO2e/MJ]
    pub total_carbon_intensity: f64,
    pub revenues: Vec<ProductRevenue>,
    /// [USD/yr]
    pub total_revenue: f64,
    /// 유틸리티 간접 배출 [tCO2e/yr]. 총 배출량 계산에는 포함하지 않는다.
    pub utility_emissions: f64,
}

/// 원료·공정 탄소집약도 합 [kgCO2e/MJ].
///
/// `(Σ CI_feed * yield_feed + CI_process) / 1000`
pub fn total_carbon_intensity(feedstocks: &[Feedstock], process_ci: f64) -> f64 {
    let feed: f64 = feedstocks
        .iter()
        .map(|f| f.carbon_intensity * f.mass_yield)
        .sum();
    (feed + process_ci) / GRAMS_PER_KILOGRAM
}

pub fn compute(input: &NormalizedInput, core: &CoreParameters) -> UnitCosts {
    let indirect_opex = input.economics.indirect_opex_ratio * core.tci;

    let feedstock_costs: Vec<FeedstockCost> = input
        .feedstocks
        .iter()
        .zip(&core.feedstocks)
        .map(|(f, out)| FeedstockCost {
            name: f.name.clone(),
            annual_cost: out.consumption * f.price,
        })
        .collect();
    let feedstock_cost = feedstock_costs.iter().map(|c| c.annual_cost).sum();
    let hydrogen_cost = core.hydrogen_consumption * input.hydrogen.price;
    let electricity_cost = core.electricity_consumption * input.electricity.price;

    let ci = total_carbon_intensity(&input.feedstocks, input.plant.process_carbon_intensity);
    let revenues: Vec<ProductRevenue> = input
        .products
        .iter()
        .zip(&core.products)
        .map(|(p, out)| {
            let effective_price = p.price - p.price_ci_sensitivity * ci * GRAMS_PER_KILOGRAM;
            ProductRevenue {
                name: p.name.clone(),
                effective_price,
                revenue: out.production * effective_price,
                carbon_intensity: ci,
            }
        })
        .collect();
    let total_revenue = revenues.iter().map(|r| r.revenue).sum();

    // 수소: t × kgCO2e/kg = tCO2e, 전력: MWh × gCO2e/MJ × 3600 / 1e6 = tCO2e
    let utility_emissions = core.hydrogen_consumption * input.hydrogen.carbon_intensity
        + core.electricity_consumption * input.electricity.carbon_intensity * MJ_PER_MWH / 1.0e6;

    let costs = UnitCosts {
        indirect_opex,
        feedstock_costs,
        feedstock_cost,
        hydrogen_cost,
        electricity_cost,
        total_carbon_intensity: ci,
        revenues,
        total_revenue,
        utility_emissions,
    };
    log::debug!(
        "2단계 완료: 원료비={:.3e}, 매출={:.3e} USD/yr",
        costs.feedstock_cost,
        costs.total_revenue
    );
    costs
}
