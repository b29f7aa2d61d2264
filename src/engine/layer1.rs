//! 1단계: 핵심 파라미터.
//!
//! 규모 보정 총투자비, 제품별 생산량과 질량분율, 원료·유틸리티 소비량,
//! 가중 평균 발열량, 탄소 전환 효율.

use crate::error::{EngineError, EngineResult};
use crate::normalize::NormalizedInput;
use crate::quantity::Metric;

/// 제품별 1단계 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductOutput {
    pub name: String,
    /// 수율을 합계로 정규화한 질량분율 (0~1)
    pub mass_fraction: f64,
    /// [t/yr]
    pub production: f64,
    /// [m3/yr], 밀도가 주어진 경우만
    pub volumetric_production: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedstockOutput {
    pub name: String,
    /// [t/yr]
    pub consumption: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreParameters {
    /// [USD]
    pub tci: f64,
    pub products: Vec<ProductOutput>,
    /// [t/yr]
    pub total_production: f64,
    pub feedstocks: Vec<FeedstockOutput>,
    /// [t/yr]
    pub total_feedstock_consumption: f64,
    /// [MJ/kg]
    pub fuel_energy_content: f64,
    /// 질량분율 가중 제품 탄소 함량 (0~1)
    pub product_carbon_content: f64,
    /// 투입량 가중 원료 탄소 함량 (0~1)
    pub feedstock_carbon_content: f64,
    /// [%]
    pub carbon_conversion_efficiency: Metric,
    /// [t/yr]
    pub hydrogen_consumption: f64,
    /// [MWh/yr]
    pub electricity_consumption: f64,
}

/// 규모의 경제(0.6 승 법칙)로 총투자비를 보정한다.
///
/// `TCI = TCI_ref * (capacity / capacity_ref) ^ exponent`
pub fn total_capital_investment(
    reference_tci: f64,
    capacity: f64,
    reference_capacity: f64,
    exponent: f64,
) -> EngineResult<f64> {
    if reference_capacity <= 0.0 {
        return Err(EngineError::validation(
            "economics.reference_capacity",
            "기준 용량이 0 이하",
        ));
    }
    Ok(reference_tci * (capacity / reference_capacity).powf(exponent))
}

/// 수율을 합계로 나누어 질량분율(0~1)을 만든다. 합계가 1이 된다.
pub fn mass_fractions(yields: &[f64]) -> EngineResult<Vec<f64>> {
    let total: f64 = yields.iter().sum();
    if total <= 0.0 {
        return Err(EngineError::undefined("mass_fraction", "제품 수율 합계가 0"));
    }
    Ok(yields.iter().map(|y| y / total).collect())
}

/// 가중치 합으로 나눈 가중 평균. 가중치 합이 0이면 `None`.
pub fn weighted_average(values: impl IntoIterator<Item = (f64, f64)>) -> Option<f64> {
    let (sum, weight) = values
        .into_iter()
        .fold((0.0, 0.0), |(s, w), (v, wt)| (s + v * wt, w + wt));
    (weight > 0.0).then(|| sum / weight)
}

/// 탄소 전환 효율 [%]. 원료 탄소 함량이 0이면 정의되지 않는다.
pub fn carbon_conversion_efficiency(product_cc: f64, feedstock_cc: f64) -> Metric {
    if feedstock_cc > 0.0 {
        Metric::Defined(product_cc / feedstock_cc * 100.0)
    } else {
        Metric::undefined("원료 탄소 함량이 0")
    }
}

pub fn compute(input: &NormalizedInput) -> EngineResult<CoreParameters> {
    let capacity = input.plant.capacity;
    let econ = &input.economics;
    let tci = total_capital_investment(
        econ.reference_tci,
        capacity,
        econ.reference_capacity,
        econ.scaling_exponent,
    )?;

    let yields: Vec<f64> = input.products.iter().map(|p| p.mass_yield).collect();
    let fractions = mass_fractions(&yields)?;
    let products: Vec<ProductOutput> = input
        .products
        .iter()
        .zip(&fractions)
        .map(|(p, &mf)| {
            let production = capacity * p.mass_yield;
            ProductOutput {
                name: p.name.clone(),
                mass_fraction: mf,
                production,
                volumetric_production: p.density.map(|d| production * 1000.0 / d),
            }
        })
        .collect();
    let total_production = products.iter().map(|p| p.production).sum();

    let feedstocks: Vec<FeedstockOutput> = input
        .feedstocks
        .iter()
        .map(|f| FeedstockOutput {
            name: f.name.clone(),
            consumption: capacity * f.mass_yield,
        })
        .collect();
    let total_feedstock_consumption = feedstocks.iter().map(|f| f.consumption).sum();

    let fuel_energy_content = input
        .products
        .iter()
        .zip(&fractions)
        .map(|(p, mf)| p.energy_content * mf)
        .sum();
    let product_carbon_content = input
        .products
        .iter()
        .zip(&fractions)
        .map(|(p, mf)| p.carbon_content * mf)
        .sum();
    let feedstock_carbon_content = weighted_average(
        input
            .feedstocks
            .iter()
            .map(|f| (f.carbon_content, f.mass_yield)),
    )
    .unwrap_or(0.0);

    let core = CoreParameters {
        tci,
        products,
        total_production,
        feedstocks,
        total_feedstock_consumption,
        fuel_energy_content,
        product_carbon_content,
        feedstock_carbon_content,
        carbon_conversion_efficiency: carbon_conversion_efficiency(
            product_carbon_content,
            feedstock_carbon_content,
        ),
        hydrogen_consumption: capacity * input.hydrogen.consumption_yield,
        electricity_consumption: capacity * input.electricity.consumption_yield,
    };
    log::debug!(
        "1단계 완료: TCI={:.3e} USD, 생산량={:.3e} t/yr",
        core.tci,
        core.total_production
    );
    Ok(core)
}
