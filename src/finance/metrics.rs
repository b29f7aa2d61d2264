//! NPV, IRR, 회수기간.

use serde::Serialize;

use super::cash_flow::CashFlowRow;
use crate::config::SolverSettings;
use crate::error::{EngineError, EngineResult};

/// 현금흐름표의 마지막 누적 할인 현금흐름. 행이 없으면 0이다.
pub fn npv(rows: &[CashFlowRow]) -> f64 {
    rows.last()
        .map(|r| r.cumulative_discounted_cash_flow)
        .unwrap_or(0.0)
}

/// 임의 할인율에서의 NPV. `flows`는 (연도, 금액) 목록이다.
pub fn npv_at(rate: f64, flows: &[(i32, f64)]) -> f64 {
    flows
        .iter()
        .filter(|(_, cf)| *cf != 0.0)
        .map(|(t, cf)| cf * (1.0 + rate).powi(-t))
        .sum()
}

fn sign_changes(flows: &[(i32, f64)]) -> usize {
    let signs: Vec<bool> = flows
        .iter()
        .filter(|(_, cf)| *cf != 0.0)
        .map(|(_, cf)| *cf > 0.0)
        .collect();
    signs.windows(2).filter(|w| w[0] != w[1]).count()
}

/// 이분법으로 NPV = 0 이 되는 할인율을 찾는다.
///
/// 현금흐름에 부호 변화가 없거나, 탐색 구간 양 끝의 NPV 부호가 같거나,
/// 최대 반복 횟수를 넘으면 `IrrNotConvergent`를 반환한다.
pub fn irr(flows: &[(i32, f64)], solver: &SolverSettings) -> EngineResult<f64> {
    if sign_changes(flows) == 0 {
        return Err(EngineError::IrrNotConvergent {
            reason: "현금흐름에 부호 변화가 없음".to_string(),
        });
    }
    let mut lo = solver.irr_lower_bound;
    let mut hi = solver.irr_upper_bound;
    let mut f_lo = npv_at(lo, flows);
    let f_hi = npv_at(hi, flows);
    if !f_lo.is_finite() || !f_hi.is_finite() || f_lo.signum() == f_hi.signum() {
        return Err(EngineError::IrrNotConvergent {
            reason: format!("[{lo}, {hi}] 구간에서 NPV 부호가 바뀌지 않음"),
        });
    }

    for _ in 0..solver.irr_max_iterations {
        let mid = 0.5 * (lo + hi);
        let f_mid = npv_at(mid, flows);
        if f_mid.is_nan() {
            break;
        }
        if f_mid == 0.0 || 0.5 * (hi - lo) < solver.irr_tolerance {
            return Ok(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Err(EngineError::IrrNotConvergent {
        reason: format!("{}회 반복 내에 수렴하지 않음", solver.irr_max_iterations),
    })
}

/// 할인 회수기간.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Payback {
    /// 누적 할인 현금흐름이 처음으로 0 이상이 되는 연도
    pub year: i32,
    /// 직전 연도와 해당 연도 사이 선형 보간으로 구한 소수 회수기간
    pub interpolated: f64,
}

/// 누적 할인 현금흐름이 음수에서 0 이상으로 처음 바뀌는 연도를 찾는다.
///
/// 그런 연도가 없으면(수명 내 손익분기 미도달, 또는 투자 없음) `None`.
pub fn payback(rows: &[CashFlowRow]) -> Option<Payback> {
    rows.windows(2).find_map(|w| {
        let prev = w[0].cumulative_discounted_cash_flow;
        let cur = w[1].cumulative_discounted_cash_flow;
        if prev < 0.0 && cur >= 0.0 {
            let fraction = -prev / (cur - prev);
            Some(Payback {
                year: w[1].year,
                interpolated: w[0].year as f64 + fraction,
            })
        } else {
            None
        }
    })
}
