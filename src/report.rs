//! 엔진 출력 레코드.
//!
//! `technoEconomics`와 `financials` 두 구획으로 나뉘며, 각 지표 `x` 옆에
//! 추적 정보 `x_traceable`이 선택적으로 붙는다.

use serde::Serialize;
use std::sync::Arc;

use crate::engine::annotate::Traces;
use crate::engine::Layers;
use crate::finance::{CapitalStructure, CashFlowRow};
use crate::quantity::Metric;
use crate::trace::TraceableValue;

type Trace = Option<Arc<TraceableValue>>;

/// 제품별 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductReport {
    pub name: String,
    /// [%]
    pub mass_fraction_pct: f64,
    /// [t/yr]
    pub production: f64,
    /// [m3/yr]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumetric_production: Option<f64>,
    /// [USD/t]
    pub effective_price: f64,
    /// [USD/yr]
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedstockReport {
    pub name: String,
    /// [t/yr]
    pub consumption: f64,
    /// [USD/yr]
    pub annual_cost: f64,
}

/// 기술·경제 지표. 단위는 필드 주석을 따른다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnoEconomics {
    /// [USD]
    pub total_capital_investment: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_capital_investment_traceable: Trace,
    /// [t/yr]
    pub production: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_traceable: Trace,
    pub products: Vec<ProductReport>,
    /// [t/yr]
    pub feedstock_consumption: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedstock_consumption_traceable: Trace,
    pub feedstocks: Vec<FeedstockReport>,
    /// [t/yr]
    pub hydrogen_consumption: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hydrogen_consumption_traceable: Trace,
    /// [MWh/yr]
    pub electricity_consumption: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electricity_consumption_traceable: Trace,
    /// [MJ/kg]
    pub fuel_energy_content: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_energy_content_traceable: Trace,
    /// 생산량 가중 탄소집약도 [kgCO2e/MJ]
    pub carbon_intensity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon_intensity_traceable: Trace,
    /// [%]
    pub carbon_conversion_efficiency: Metric,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon_conversion_efficiency_traceable: Trace,
    /// [USD/yr]
    pub feedstock_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedstock_cost_traceable: Trace,
    /// [USD/yr]
    pub hydrogen_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hydrogen_cost_traceable: Trace,
    /// [USD/yr]
    pub electricity_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electricity_cost_traceable: Trace,
    /// [USD/yr]
    pub direct_opex: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_opex_traceable: Trace,
    /// [USD/yr]
    pub indirect_opex: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indirect_opex_traceable: Trace,
    /// [USD/yr]
    pub total_opex: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_opex_traceable: Trace,
    /// [USD/yr]
    pub total_revenue: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_revenue_traceable: Trace,
    /// [kgCO2e/yr]
    pub total_co2_emissions: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_co2_emissions_traceable: Trace,
    /// 수소·전력 간접 배출 [tCO2e/yr]
    pub utility_emissions: f64,
    pub capital_recovery_factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital_recovery_factor_traceable: Trace,
    /// [USD/yr]
    pub annualized_capital: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annualized_capital_traceable: Trace,
    /// [USD/t]
    pub lcop: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lcop_traceable: Trace,
    /// [USD/tCO2e]
    pub lcca: Metric,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lcca_traceable: Trace,
}

/// 재무 지표와 현금흐름표.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Financials {
    pub capital: CapitalStructure,
    pub cash_flows: Vec<CashFlowRow>,
    /// [USD]
    pub npv: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npv_traceable: Trace,
    pub irr: Metric,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irr_traceable: Trace,
    /// 손익분기 연도 [yr]
    pub payback_period: Metric,
    /// 선형 보간 추정값 [yr]
    pub payback_period_interpolated: Metric,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_period_traceable: Trace,
}

/// 엔진 전체 결과. 반환 후에는 변경되지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    #[serde(rename = "technoEconomics")]
    pub techno_economics: TechnoEconomics,
    pub financials: Financials,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// 추적 정보 없이 최종 수치만 담은 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BareResult {
    pub total_capital_investment: f64,
    pub production: f64,
    pub total_opex: f64,
    pub total_revenue: f64,
    pub carbon_intensity: f64,
    pub carbon_conversion_efficiency: Option<f64>,
    pub total_co2_emissions: f64,
    pub lcop: f64,
    pub lcca: Option<f64>,
    pub npv: f64,
    pub irr: Option<f64>,
    /// IRR을 구하지 못한 이유. `irr`이 `None`일 때만 채워진다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irr_undefined_reason: Option<String>,
    pub payback_period: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

fn irr_metric(layers: &Layers) -> Metric {
    match &layers.finance.irr {
        Ok(v) => Metric::Defined(*v),
        Err(e) => Metric::undefined(e.to_string()),
    }
}

impl CalculationResult {
    /// 단계 결과와 (있다면) 추적 값을 하나의 출력 레코드로 모은다.
    pub fn assemble(layers: &Layers, traces: Option<Traces>, warnings: Vec<String>) -> Self {
        let core = &layers.core;
        let costs = &layers.unit_costs;
        let kpi = &layers.kpis;
        let fin = &layers.finance;
        let t = traces;
        let pick = |f: fn(&Traces) -> Trace| t.as_ref().and_then(f);

        let products = core
            .products
            .iter()
            .zip(&costs.revenues)
            .map(|(p, r)| ProductReport {
                name: p.name.clone(),
                mass_fraction_pct: p.mass_fraction * 100.0,
                production: p.production,
                volumetric_production: p.volumetric_production,
                effective_price: r.effective_price,
                revenue: r.revenue,
            })
            .collect();
        let feedstocks = core
            .feedstocks
            .iter()
            .zip(&costs.feedstock_costs)
            .map(|(f, c)| FeedstockReport {
                name: f.name.clone(),
                consumption: f.consumption,
                annual_cost: c.annual_cost,
            })
            .collect();

        let techno_economics = TechnoEconomics {
            total_capital_investment: core.tci,
            total_capital_investment_traceable: pick(|t| Some(t.total_capital_investment.clone())),
            production: core.total_production,
            production_traceable: pick(|t| Some(t.production.clone())),
            products,
            feedstock_consumption: core.total_feedstock_consumption,
            feedstock_consumption_traceable: pick(|t| Some(t.feedstock_consumption.clone())),
            feedstocks,
            hydrogen_consumption: core.hydrogen_consumption,
            hydrogen_consumption_traceable: pick(|t| Some(t.hydrogen_consumption.clone())),
            electricity_consumption: core.electricity_consumption,
            electricity_consumption_traceable: pick(|t| Some(t.electricity_consumption.clone())),
            fuel_energy_content: core.fuel_energy_content,
            fuel_energy_content_traceable: pick(|t| Some(t.fuel_energy_content.clone())),
            carbon_intensity: layers.aggregates.weighted_carbon_intensity,
            carbon_intensity_traceable: pick(|t| Some(t.carbon_intensity.clone())),
            carbon_conversion_efficiency: core.carbon_conversion_efficiency.clone(),
            carbon_conversion_efficiency_traceable: pick(|t| t.carbon_conversion_efficiency.clone()),
            feedstock_cost: costs.feedstock_cost,
            feedstock_cost_traceable: pick(|t| Some(t.feedstock_cost.clone())),
            hydrogen_cost: costs.hydrogen_cost,
            hydrogen_cost_traceable: pick(|t| Some(t.hydrogen_cost.clone())),
            electricity_cost: costs.electricity_cost,
            electricity_cost_traceable: pick(|t| Some(t.electricity_cost.clone())),
            direct_opex: layers.aggregates.total_direct_opex,
            direct_opex_traceable: pick(|t| Some(t.direct_opex.clone())),
            indirect_opex: costs.indirect_opex,
            indirect_opex_traceable: pick(|t| Some(t.indirect_opex.clone())),
            total_opex: kpi.total_opex,
            total_opex_traceable: pick(|t| Some(t.total_opex.clone())),
            total_revenue: costs.total_revenue,
            total_revenue_traceable: pick(|t| Some(t.total_revenue.clone())),
            total_co2_emissions: kpi.total_co2_emissions,
            total_co2_emissions_traceable: pick(|t| Some(t.total_co2_emissions.clone())),
            utility_emissions: costs.utility_emissions,
            capital_recovery_factor: kpi.capital_recovery_factor,
            capital_recovery_factor_traceable: pick(|t| Some(t.capital_recovery_factor.clone())),
            annualized_capital: kpi.annualized_capital,
            annualized_capital_traceable: pick(|t| Some(t.annualized_capital.clone())),
            lcop: kpi.lcop,
            lcop_traceable: pick(|t| Some(t.lcop.clone())),
            lcca: kpi.lcca.clone(),
            lcca_traceable: pick(|t| t.lcca.clone()),
        };

        let (payback_period, payback_period_interpolated) = match fin.payback {
            Some(pb) => (
                Metric::Defined(pb.year as f64),
                Metric::Defined(pb.interpolated),
            ),
            None => {
                let reason = "수명 기간 내 누적 할인 현금흐름이 음수에서 0 이상으로 바뀌지 않음";
                (Metric::undefined(reason), Metric::undefined(reason))
            }
        };
        let financials = Financials {
            capital: fin.capital,
            cash_flows: fin.rows.clone(),
            npv: fin.npv,
            npv_traceable: pick(|t| Some(t.npv.clone())),
            irr: irr_metric(layers),
            irr_traceable: pick(|t| t.irr.clone()),
            payback_period,
            payback_period_interpolated,
            payback_period_traceable: pick(|t| t.payback_period.clone()),
        };

        CalculationResult {
            techno_economics,
            financials,
            warnings,
        }
    }

    /// 모든 `_traceable` 항목을 제거한 사본.
    pub fn without_traces(&self) -> Self {
        let mut out = self.clone();
        let te = &mut out.techno_economics;
        for slot in [
            &mut te.total_capital_investment_traceable,
            &mut te.production_traceable,
            &mut te.feedstock_consumption_traceable,
            &mut te.hydrogen_consumption_traceable,
            &mut te.electricity_consumption_traceable,
            &mut te.fuel_energy_content_traceable,
            &mut te.carbon_intensity_traceable,
            &mut te.carbon_conversion_efficiency_traceable,
            &mut te.feedstock_cost_traceable,
            &mut te.hydrogen_cost_traceable,
            &mut te.electricity_cost_traceable,
            &mut te.direct_opex_traceable,
            &mut te.indirect_opex_traceable,
            &mut te.total_opex_traceable,
            &mut te.total_revenue_traceable,
            &mut te.total_co2_emissions_traceable,
            &mut te.capital_recovery_factor_traceable,
            &mut te.annualized_capital_traceable,
            &mut te.lcop_traceable,
            &mut te.lcca_traceable,
        ] {
            *slot = None;
        }
        let fin = &mut out.financials;
        fin.npv_traceable = None;
        fin.irr_traceable = None;
        fin.payback_period_traceable = None;
        out
    }
}

impl BareResult {
    pub fn from_layers(layers: &Layers, warnings: Vec<String>) -> Self {
        BareResult {
            total_capital_investment: layers.core.tci,
            production: layers.core.total_production,
            total_opex: layers.kpis.total_opex,
            total_revenue: layers.unit_costs.total_revenue,
            carbon_intensity: layers.aggregates.weighted_carbon_intensity,
            carbon_conversion_efficiency: layers.core.carbon_conversion_efficiency.value(),
            total_co2_emissions: layers.kpis.total_co2_emissions,
            lcop: layers.kpis.lcop,
            lcca: layers.kpis.lcca.value(),
            npv: layers.finance.npv,
            irr: layers.finance.irr.as_ref().ok().copied(),
            irr_undefined_reason: layers.finance.irr.as_ref().err().map(|e| e.to_string()),
            payback_period: layers.finance.payback.map(|p| p.year),
            warnings,
        }
    }
}
