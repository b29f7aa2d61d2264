//! 재무 분석: 현금흐름표와 NPV·IRR·회수기간.

pub mod cash_flow;
pub mod crf;
pub mod metrics;

pub use cash_flow::{after_tax_flows, build_schedule, CapitalStructure, CashFlowRow, Phase, ScheduleInput};
pub use crf::{amortizing_payment, capital_recovery_factor};
pub use metrics::{irr, npv, npv_at, payback, Payback};

use crate::config::SolverSettings;
use crate::error::EngineResult;

/// 재무 분석 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialAnalysis {
    pub capital: CapitalStructure,
    pub rows: Vec<CashFlowRow>,
    pub npv: f64,
    /// 수렴 실패는 오류 그대로 보관한다. 처리 방식은 호출자가 정한다.
    pub irr: EngineResult<f64>,
    pub payback: Option<Payback>,
}

/// 현금흐름표를 만들고 NPV·IRR·회수기간을 구한다.
pub fn analyze(input: &ScheduleInput, solver: &SolverSettings) -> FinancialAnalysis {
    let rows = build_schedule(input);
    let npv = npv(&rows);
    let irr = irr(&after_tax_flows(&rows), solver);
    let payback = payback(&rows);
    FinancialAnalysis {
        capital: CapitalStructure::from_input(input),
        rows,
        npv,
        irr,
        payback,
    }
}
