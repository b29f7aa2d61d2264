//! 연도별 현금흐름표.
//!
//! 건설기(-2: 토지, -1: 지분 투자, 0: 운전자본) → 운영기(1..수명) → 종료(수명 연도).
//! 종료 연도에는 남은 대출 잔액을 모두 상환한다.

use serde::Serialize;

use super::crf::amortizing_payment;
use crate::normalize::Financing;

/// 현금흐름표의 연도 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Construction,
    Operation,
    Terminal,
}

/// 현금흐름표 한 행. 금액 단위는 USD.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowRow {
    /// 연도. 음수는 운전 개시 전 건설 연도다.
    pub year: i32,
    pub phase: Phase,
    pub capital_outlay: f64,
    pub depreciation: f64,
    pub revenue: f64,
    pub loan_payment: f64,
    pub loan_interest: f64,
    pub loan_principal: f64,
    pub operating_cost: f64,
    pub taxable_income: f64,
    pub tax: f64,
    pub after_tax_cash_flow: f64,
    pub discount_factor: f64,
    pub discounted_cash_flow: f64,
    pub cumulative_discounted_cash_flow: f64,
}

/// 현금흐름표 작성 입력 (내부 단위).
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleInput {
    /// 총투자비 [USD]
    pub tci: f64,
    /// 연간 매출 [USD/yr]
    pub annual_revenue: f64,
    /// 연간 총 운영비 [USD/yr]
    pub annual_operating_cost: f64,
    pub lifetime_years: u32,
    pub discount_rate: f64,
    pub working_capital_ratio: f64,
    pub financing: Financing,
}

/// 건설기 투자 구성.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapitalStructure {
    pub land_cost: f64,
    pub working_capital: f64,
    pub equity_investment: f64,
    pub loan_principal: f64,
    pub annual_loan_payment: f64,
}

impl CapitalStructure {
    pub fn from_input(input: &ScheduleInput) -> Self {
        let f = &input.financing;
        let working_capital = input.working_capital_ratio * input.tci;
        let loan_principal = (1.0 - f.equity_fraction) * input.tci;
        Self {
            land_cost: f.land_cost,
            working_capital,
            equity_investment: f.equity_fraction * input.tci - working_capital,
            loan_principal,
            annual_loan_payment: amortizing_payment(
                loan_principal,
                f.bank_interest_rate,
                f.loan_term_years,
            ),
        }
    }
}

fn discount_factor(rate: f64, year: i32) -> f64 {
    (1.0 + rate).powi(-year)
}

/// 현금흐름표를 작성한다. 결과는 이후 수정되지 않는다.
pub fn build_schedule(input: &ScheduleInput) -> Vec<CashFlowRow> {
    let f = &input.financing;
    let cap = CapitalStructure::from_input(input);
    let r = input.discount_rate;
    let n = input.lifetime_years as i32;

    let mut rows = Vec::with_capacity(input.lifetime_years as usize + 3);
    let mut cumulative = 0.0;

    for (year, outlay) in [
        (-2, cap.land_cost),
        (-1, cap.equity_investment),
        (0, cap.working_capital),
    ] {
        let df = discount_factor(r, year);
        let atcf = -outlay;
        let dcf = atcf * df;
        cumulative += dcf;
        rows.push(CashFlowRow {
            year,
            phase: Phase::Construction,
            capital_outlay: outlay,
            depreciation: 0.0,
            revenue: 0.0,
            loan_payment: 0.0,
            loan_interest: 0.0,
            loan_principal: 0.0,
            operating_cost: 0.0,
            taxable_income: 0.0,
            tax: 0.0,
            after_tax_cash_flow: atcf,
            discount_factor: df,
            discounted_cash_flow: dcf,
            cumulative_discounted_cash_flow: cumulative,
        });
    }

    let annual_depreciation = f.depreciation_rate * input.tci;
    let mut book_value = input.tci;
    let mut balance = cap.loan_principal;

    for year in 1..=n {
        let depreciation = annual_depreciation.min(book_value).max(0.0);
        book_value -= depreciation;

        let (interest, mut principal) = if year as u32 <= f.loan_term_years && balance > 0.0 {
            let interest = balance * f.bank_interest_rate;
            let principal = (cap.annual_loan_payment - interest).min(balance);
            balance -= principal;
            (interest, principal)
        } else {
            (0.0, 0.0)
        };
        // 대출 기간이 수명보다 길면 잔액은 마지막 해에 일시 상환한다.
        if year == n && f.loan_term_years > input.lifetime_years && balance > 0.0 {
            principal += balance;
            balance = 0.0;
        }

        let taxable_income =
            input.annual_revenue - input.annual_operating_cost - depreciation - interest;
        let tax = (f.tax_rate * taxable_income).max(0.0);
        let atcf = taxable_income - tax + depreciation - principal;
        let df = discount_factor(r, year);
        let dcf = atcf * df;
        cumulative += dcf;

        rows.push(CashFlowRow {
            year,
            phase: if year == n {
                Phase::Terminal
            } else {
                Phase::Operation
            },
            capital_outlay: 0.0,
            depreciation,
            revenue: input.annual_revenue,
            loan_payment: interest + principal,
            loan_interest: interest,
            loan_principal: principal,
            operating_cost: input.annual_operating_cost,
            taxable_income,
            tax,
            after_tax_cash_flow: atcf,
            discount_factor: df,
            discounted_cash_flow: dcf,
            cumulative_discounted_cash_flow: cumulative,
        });
    }
    rows
}

/// IRR 탐색에 쓰는 (연도, 세후 현금흐름) 목록.
pub fn after_tax_flows(rows: &[CashFlowRow]) -> Vec<(i32, f64)> {
    rows.iter().map(|r| (r.year, r.after_tax_cash_flow)).collect()
}
