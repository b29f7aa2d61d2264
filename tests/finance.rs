//! 현금흐름표와 NPV·IRR·회수기간.
mod common;

use common::assert_close;
use fuel_pathway_tea::config::SolverSettings;
use fuel_pathway_tea::error::EngineError;
use fuel_pathway_tea::finance::*;
use fuel_pathway_tea::normalize::Financing;

fn equity_only() -> Financing {
    Financing {
        equity_fraction: 1.0,
        bank_interest_rate: 0.0,
        loan_term_years: 0,
        depreciation_rate: 0.0,
        tax_rate: 0.0,
        land_cost: 0.0,
    }
}

fn simple_project() -> ScheduleInput {
    ScheduleInput {
        tci: 100.0,
        annual_revenue: 30.0,
        annual_operating_cost: 0.0,
        lifetime_years: 5,
        discount_rate: 0.0,
        working_capital_ratio: 0.0,
        financing: equity_only(),
    }
}

fn levered_project() -> ScheduleInput {
    ScheduleInput {
        tci: 1000.0e6,
        annual_revenue: 600.0e6,
        annual_operating_cost: 400.0e6,
        lifetime_years: 20,
        discount_rate: 0.08,
        working_capital_ratio: 0.05,
        financing: Financing {
            equity_fraction: 0.4,
            bank_interest_rate: 0.06,
            loan_term_years: 10,
            depreciation_rate: 0.1,
            tax_rate: 0.25,
            land_cost: 5.0e6,
        },
    }
}

#[test]
fn schedule_has_construction_and_operating_years() {
    let rows = build_schedule(&simple_project());
    let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![-2, -1, 0, 1, 2, 3, 4, 5]);
    assert_eq!(rows[0].phase, Phase::Construction);
    assert_eq!(rows[3].phase, Phase::Operation);
    assert_eq!(rows.last().unwrap().phase, Phase::Terminal);
}

#[test]
fn npv_is_last_cumulative_value() {
    let input = levered_project();
    let rows = build_schedule(&input);
    let sum: f64 = rows.iter().map(|r| r.discounted_cash_flow).sum();
    assert_close("NPV", npv(&rows), sum, 1e-12);
    assert_close(
        "NPV at r",
        npv(&rows),
        npv_at(input.discount_rate, &after_tax_flows(&rows)),
        1e-9,
    );
}

#[test]
fn simple_project_irr_and_payback() {
    let rows = build_schedule(&simple_project());
    let rate = irr(&after_tax_flows(&rows), &SolverSettings::default()).unwrap();
    // 100 투자, 5년간 30 회수
    assert_close("IRR", rate, 0.15238, 1e-4);

    let pb = payback(&rows).unwrap();
    assert_eq!(pb.year, 4);
    assert_close("interpolated", pb.interpolated, 3.0 + 10.0 / 30.0, 1e-12);
}

#[test]
fn irr_root_zeroes_npv() {
    let rows = build_schedule(&levered_project());
    let flows = after_tax_flows(&rows);
    let solver = SolverSettings::default();
    let rate = irr(&flows, &solver).unwrap();
    assert!(rate > levered_project().discount_rate);
    // 근 주변에서 NPV 부호가 바뀐다.
    assert!(npv_at(rate - 1e-4, &flows) > 0.0);
    assert!(npv_at(rate + 1e-4, &flows) < 0.0);
    assert!(payback(&rows).is_some());
}

#[test]
fn irr_without_sign_change_is_not_convergent() {
    let flows = [(-1, 10.0), (0, 5.0), (1, 5.0)];
    let err = irr(&flows, &SolverSettings::default()).unwrap_err();
    assert!(matches!(err, EngineError::IrrNotConvergent { .. }), "{err}");
}

#[test]
fn irr_with_tight_iteration_cap_is_not_convergent() {
    let rows = build_schedule(&levered_project());
    let solver = SolverSettings {
        irr_max_iterations: 3,
        ..SolverSettings::default()
    };
    assert!(matches!(
        irr(&after_tax_flows(&rows), &solver),
        Err(EngineError::IrrNotConvergent { .. })
    ));
}

#[test]
fn payback_is_none_when_project_never_recovers() {
    let mut input = simple_project();
    input.annual_revenue = 10.0;
    let rows = build_schedule(&input);
    assert!(npv(&rows) < 0.0);
    assert_eq!(payback(&rows), None);
}

#[test]
fn depreciation_stops_at_book_value() {
    let input = levered_project();
    let rows = build_schedule(&input);
    let total: f64 = rows.iter().map(|r| r.depreciation).sum();
    assert_close("depreciation", total, input.tci, 1e-12);
    for r in rows.iter().filter(|r| r.year > 10) {
        assert_eq!(r.depreciation, 0.0, "year {}", r.year);
    }
}

#[test]
fn tax_is_never_negative() {
    let mut input = levered_project();
    input.annual_revenue = 300.0e6;
    let rows = build_schedule(&input);
    assert!(rows.iter().any(|r| r.taxable_income < 0.0));
    assert!(rows.iter().all(|r| r.tax >= 0.0));
}

#[test]
fn loan_is_repaid_within_term() {
    let input = levered_project();
    let rows = build_schedule(&input);
    let cap = CapitalStructure::from_input(&input);
    assert_close("loan", cap.loan_principal, 600.0e6, 1e-12);
    assert_close("equity", cap.equity_investment, 350.0e6, 1e-12);
    let repaid: f64 = rows.iter().map(|r| r.loan_principal).sum();
    assert_close("repaid", repaid, cap.loan_principal, 1e-9);
    for r in rows.iter().filter(|r| r.year > 10) {
        assert_eq!(r.loan_payment, 0.0, "year {}", r.year);
    }
    assert_close("payment", rows[3].loan_payment, cap.annual_loan_payment, 1e-12);
}

#[test]
fn construction_outlays_are_negative_flows() {
    let input = levered_project();
    let rows = build_schedule(&input);
    assert_eq!(rows[0].after_tax_cash_flow, -5.0e6);
    assert_close("equity", rows[1].after_tax_cash_flow, -350.0e6, 1e-12);
    assert_close("wc", rows[2].after_tax_cash_flow, -50.0e6, 1e-12);
    // 건설 연도는 (1+r)^2 로 복리 환산된다.
    assert_close("df", rows[0].discount_factor, 1.08 * 1.08, 1e-12);
}

#[test]
fn analyze_bundles_all_metrics() {
    let a = analyze(&levered_project(), &SolverSettings::default());
    assert_eq!(a.rows.len(), 23);
    assert_eq!(a.npv, npv(&a.rows));
    assert!(a.irr.is_ok());
}

#[test]
fn loan_outliving_project_is_settled_in_final_year() {
    let input = ScheduleInput {
        tci: 1000.0,
        annual_revenue: 600.0,
        annual_operating_cost: 200.0,
        lifetime_years: 5,
        discount_rate: 0.08,
        working_capital_ratio: 0.05,
        financing: Financing {
            equity_fraction: 0.2,
            bank_interest_rate: 0.06,
            loan_term_years: 20,
            depreciation_rate: 0.1,
            tax_rate: 0.25,
            land_cost: 0.0,
        },
    };
    let rows = build_schedule(&input);
    let cap = CapitalStructure::from_input(&input);
    let repaid: f64 = rows.iter().map(|r| r.loan_principal).sum();
    assert_close("repaid", repaid, cap.loan_principal, 1e-12);

    // 마지막 해 상환액은 정규 상환액보다 크다.
    let last = rows.last().unwrap();
    assert!(last.loan_payment > cap.annual_loan_payment);
    assert_close(
        "final ATCF",
        last.after_tax_cash_flow,
        last.taxable_income - last.tax + last.depreciation - last.loan_principal,
        1e-12,
    );

    // 1~4년차는 정규 상환액을 그대로 낸다.
    for r in rows.iter().filter(|r| (1..5).contains(&r.year)) {
        assert_close("regular payment", r.loan_payment, cap.annual_loan_payment, 1e-12);
    }
}
