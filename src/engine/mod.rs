//! 4단계 계산 파이프라인과 두 가지 진입점.
//!
//! 정규화된 입력 → 1단계 → 2단계 → 3단계 → 4단계 → 재무 분석 순으로만 흐르며,
//! 각 단계는 이전 단계 결과를 읽기만 한다. 호출마다 독립적인 순수 계산이다.

pub mod annotate;
pub mod layer1;
pub mod layer2;
pub mod layer3;
pub mod layer4;

use crate::config::{EngineSettings, SolverSettings};
use crate::error::EngineResult;
use crate::finance::{self, FinancialAnalysis, ScheduleInput};
use crate::input::CalculationInput;
use crate::normalize::{normalize_input, NormalizedInput};
use crate::report::{BareResult, CalculationResult};

/// 모든 단계의 수치 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct Layers {
    pub core: layer1::CoreParameters,
    pub unit_costs: layer2::UnitCosts,
    pub aggregates: layer3::Aggregates,
    pub kpis: layer4::FinalKpis,
    pub finance: FinancialAnalysis,
}

/// 정규화된 입력으로 모든 단계를 실행한다.
///
/// `strict_irr`가 켜져 있으면 IRR 수렴 실패를 그대로 반환한다.
pub fn run_layers(input: &NormalizedInput, solver: &SolverSettings) -> EngineResult<Layers> {
    let core = layer1::compute(input)?;
    let unit_costs = layer2::compute(input, &core);
    let aggregates = layer3::compute(&core, &unit_costs);
    let kpis = layer4::compute(input, &core, &unit_costs, &aggregates)?;

    let schedule = ScheduleInput {
        tci: core.tci,
        annual_revenue: unit_costs.total_revenue,
        annual_operating_cost: kpis.total_opex,
        lifetime_years: input.economics.lifetime_years,
        discount_rate: input.economics.discount_rate,
        working_capital_ratio: input.economics.working_capital_ratio,
        financing: input.financing.clone(),
    };
    let finance = finance::analyze(&schedule, solver);
    if solver.strict_irr {
        if let Err(e) = &finance.irr {
            return Err(e.clone());
        }
    }
    log::debug!(
        "재무 분석 완료: NPV={:.3e} USD, IRR={:?}",
        finance.npv,
        finance.irr.as_ref().ok()
    );

    Ok(Layers {
        core,
        unit_costs,
        aggregates,
        kpis,
        finance,
    })
}

/// 모든 지표에 추적 정보를 붙여 계산한다.
pub fn calculate(input: &CalculationInput, settings: &EngineSettings) -> EngineResult<CalculationResult> {
    let (normalized, warnings) = normalize_input(input, &settings.validation)?;
    let layers = run_layers(&normalized, &settings.solver)?;
    let traces = annotate::annotate(&normalized, &layers);
    Ok(CalculationResult::assemble(&layers, Some(traces), warnings))
}

/// 추적 정보 없이 최종 수치만 계산한다. 대량 계산용.
pub fn calculate_bare(input: &CalculationInput, settings: &EngineSettings) -> EngineResult<BareResult> {
    let (normalized, warnings) = normalize_input(input, &settings.validation)?;
    let layers = run_layers(&normalized, &settings.solver)?;
    Ok(BareResult::from_layers(&layers, warnings))
}
