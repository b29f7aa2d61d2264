//! 진입점 단위의 통합 테스트.
mod common;

use std::path::Path;
use std::sync::Arc;

use common::{assert_close, sample_input};
use fuel_pathway_tea::app::load_scenario;
use fuel_pathway_tea::config::{EngineSettings, MassFractionPolicy, SolverSettings};
use fuel_pathway_tea::error::EngineError;
use fuel_pathway_tea::input::Measured;
use fuel_pathway_tea::quantity::Metric;
use fuel_pathway_tea::trace::TraceInput;
use fuel_pathway_tea::{calculate, calculate_bare};

#[test]
fn repeated_calls_are_identical() {
    let input = sample_input();
    let settings = EngineSettings::default();
    let a = calculate(&input, &settings).unwrap();
    let b = calculate(&input, &settings).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn bare_and_full_results_agree() {
    let input = sample_input();
    let settings = EngineSettings::default();
    let full = calculate(&input, &settings).unwrap();
    let bare = calculate_bare(&input, &settings).unwrap();
    let te = &full.techno_economics;
    assert_eq!(bare.total_capital_investment, te.total_capital_investment);
    assert_eq!(bare.lcop, te.lcop);
    assert_eq!(bare.total_co2_emissions, te.total_co2_emissions);
    assert_eq!(bare.npv, full.financials.npv);
    assert_eq!(bare.irr, full.financials.irr.value());
    assert_eq!(bare.irr_undefined_reason, None);
    assert_eq!(bare.payback_period.map(f64::from), full.financials.payback_period.value());
}

#[test]
fn traced_values_equal_reported_values() {
    let r = calculate(&sample_input(), &EngineSettings::default()).unwrap();
    let te = &r.techno_economics;
    let lcop = te.lcop_traceable.as_ref().unwrap();
    assert_eq!(lcop.value(), te.lcop);
    assert_eq!(lcop.unit(), "USD/t");
    assert!(!lcop.steps().is_empty());
    assert_eq!(lcop.steps().last().unwrap().result, te.lcop);
    assert_eq!(te.total_capital_investment_traceable.as_ref().unwrap().value(), te.total_capital_investment);
    assert_eq!(r.financials.npv_traceable.as_ref().unwrap().value(), r.financials.npv);
}

#[test]
fn lcop_trace_shares_component_traces() {
    let r = calculate(&sample_input(), &EngineSettings::default()).unwrap();
    let te = &r.techno_economics;
    let lcop = te.lcop_traceable.as_ref().unwrap();
    for (key, component) in [
        ("feedstock_cost", &te.feedstock_cost_traceable),
        ("hydrogen_cost", &te.hydrogen_cost_traceable),
        ("electricity_cost", &te.electricity_cost_traceable),
        ("indirect_opex", &te.indirect_opex_traceable),
        ("annualized_capital", &te.annualized_capital_traceable),
        ("production", &te.production_traceable),
    ] {
        let Some(TraceInput::Traced(dep)) = lcop.input(key) else {
            panic!("LCOP 입력에 {key} 추적 값이 없음");
        };
        assert!(Arc::ptr_eq(dep, component.as_ref().unwrap()), "{key}");
    }
    // 하위 추적 값이 그대로 보존된다.
    let Some(TraceInput::Traced(annual)) = lcop.input("annualized_capital") else {
        panic!("annualized_capital");
    };
    assert!(annual.input("TCI").is_some());
    assert!(annual.input("CRF").is_some());
}

#[test]
fn json_output_layout() {
    let r = calculate(&sample_input(), &EngineSettings::default()).unwrap();
    let v = serde_json::to_value(&r).unwrap();
    let te = &v["technoEconomics"];
    assert!(te["lcop"].is_f64());
    assert!(te["lcop_traceable"]["calculation_steps"].is_array());
    assert_eq!(te["lcop_traceable"]["name"], "lcop");
    assert!(te["carbon_conversion_efficiency"]["value"].is_f64());
    assert!(v["financials"]["cash_flows"].is_array());
    assert!(v.get("warnings").is_none());

    let bare = serde_json::to_value(r.without_traces()).unwrap();
    assert!(bare["technoEconomics"].get("lcop_traceable").is_none());
    assert!(bare["financials"].get("npv_traceable").is_none());
}

#[test]
fn undefined_metric_serializes_with_reason() {
    let mut input = sample_input();
    input.feedstocks[0].carbon_content = Measured::new(0.0, "%");
    let r = calculate(&input, &EngineSettings::default()).unwrap();
    assert!(matches!(
        r.techno_economics.carbon_conversion_efficiency,
        Metric::Undefined { .. }
    ));
    assert!(r.techno_economics.carbon_conversion_efficiency_traceable.is_none());
    let v = serde_json::to_value(&r).unwrap();
    let cce = &v["technoEconomics"]["carbon_conversion_efficiency"];
    assert!(cce["value"].is_null());
    assert!(cce["undefined_reason"].is_string());
}

#[test]
fn validation_failure_returns_no_result() {
    let mut input = sample_input();
    input.plant.capacity = Measured::new(0.0, "t/yr");
    let err = calculate(&input, &EngineSettings::default()).unwrap_err();
    assert!(matches!(err, EngineError::Validation { ref field, .. } if field == "plant.capacity"), "{err}");

    let mut input = sample_input();
    input.economics.discount_rate = 1.5;
    assert!(matches!(
        calculate_bare(&input, &EngineSettings::default()),
        Err(EngineError::Validation { .. })
    ));

    let mut input = sample_input();
    input.products.clear();
    assert!(calculate(&input, &EngineSettings::default()).is_err());
}

#[test]
fn unknown_unit_is_conversion_error() {
    let mut input = sample_input();
    input.hydrogen.price = Measured::new(4.0, "EUR/kg");
    assert!(matches!(
        calculate(&input, &EngineSettings::default()),
        Err(EngineError::UnsupportedUnitConversion(_))
    ));

    // 전력 수율에 질량 기준 단위를 쓰면 기준 불일치
    let mut input = sample_input();
    input.electricity.consumption_yield = Measured::new(1.5, "t/t");
    assert!(matches!(
        calculate(&input, &EngineSettings::default()),
        Err(EngineError::UnsupportedUnitConversion(_))
    ));
}

#[test]
fn mass_fraction_band_policy() {
    let mut input = sample_input();
    input.products[1].mass_yield = Measured::new(0.2, "t/t");

    let r = calculate(&input, &EngineSettings::default()).unwrap();
    assert_eq!(r.warnings.len(), 1);
    // 질량분율은 수율 합계로 정규화된다.
    let pct: f64 = r.techno_economics.products.iter().map(|p| p.mass_fraction_pct).sum();
    assert_close("mass fraction", pct, 100.0, 1e-12);

    let mut settings = EngineSettings::default();
    settings.validation.mass_fraction_policy = MassFractionPolicy::Reject;
    assert!(matches!(
        calculate(&input, &settings),
        Err(EngineError::Validation { .. })
    ));
}

#[test]
fn equity_below_working_capital_is_rejected() {
    let mut input = sample_input();
    input.financing.equity_fraction = 0.01;
    assert!(matches!(
        calculate(&input, &EngineSettings::default()),
        Err(EngineError::Validation { .. })
    ));
}

#[test]
fn unprofitable_project_reports_undefined_irr() {
    let mut input = sample_input();
    for p in &mut input.products {
        p.price = Measured::new(100.0, "USD/t");
    }
    let r = calculate(&input, &EngineSettings::default()).unwrap();
    assert!(r.financials.npv < 0.0);
    assert!(!r.financials.irr.is_defined());
    assert!(!r.financials.payback_period.is_defined());
    assert!(r.financials.irr_traceable.is_none());

    let bare = calculate_bare(&input, &EngineSettings::default()).unwrap();
    assert_eq!(bare.irr, None);
    let reason = bare.irr_undefined_reason.expect("IRR 실패 사유");
    let Metric::Undefined { reason: full_reason } = &r.financials.irr else {
        panic!("IRR이 정의됨");
    };
    assert_eq!(&reason, full_reason);

    let strict = EngineSettings {
        solver: SolverSettings {
            strict_irr: true,
            ..SolverSettings::default()
        },
        ..EngineSettings::default()
    };
    assert!(matches!(
        calculate(&input, &strict),
        Err(EngineError::IrrNotConvergent { .. })
    ));
}

#[test]
fn profitable_sample_has_irr_and_payback() {
    let r = calculate(&sample_input(), &EngineSettings::default()).unwrap();
    let irr = r.financials.irr.value().unwrap();
    assert!(irr > 0.1, "IRR {irr}");
    let year = r.financials.payback_period.value().unwrap();
    let interp = r.financials.payback_period_interpolated.value().unwrap();
    assert!(year > 0.0);
    assert!(interp <= year && interp > year - 1.0);
    assert!(r.financials.npv > 0.0);
}

#[test]
fn lcca_uses_reference_fuel_price() {
    let mut input = sample_input();
    input.economics.reference_fuel_price = Some(Measured::new(0.8, "USD/kg"));
    let r = calculate(&input, &EngineSettings::default()).unwrap();
    let te = &r.techno_economics;
    let expected = (te.lcop - 800.0) * te.production / (te.total_co2_emissions / 1000.0);
    assert_close("LCCA", te.lcca.value().unwrap(), expected, 1e-9);
}

#[test]
fn demo_scenario_matches_programmatic_one() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/hefa_saf.toml");
    let demo = load_scenario(&path).unwrap();
    let settings = EngineSettings::default();
    let a = calculate_bare(&demo, &settings).unwrap();
    let b = calculate_bare(&sample_input(), &settings).unwrap();
    assert_close("TCI", a.total_capital_investment, b.total_capital_investment, 1e-9);
    assert_close("LCOP", a.lcop, b.lcop, 1e-9);
    assert_close("CO2", a.total_co2_emissions, b.total_co2_emissions, 1e-9);
    assert!(a.lcca.is_some());
}

#[test]
fn loan_longer_than_lifetime_is_flagged() {
    let mut input = sample_input();
    input.financing.loan_term_years = 30;
    let r = calculate(&input, &EngineSettings::default()).unwrap();
    assert_eq!(r.warnings.len(), 1, "{:?}", r.warnings);
    let repaid: f64 = r.financials.cash_flows.iter().map(|row| row.loan_principal).sum();
    assert_close("repaid", repaid, r.financials.capital.loan_principal, 1e-9);
}
