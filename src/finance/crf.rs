use crate::error::{EngineError, EngineResult};

/// 자본회수계수(CRF).
///
/// `CRF = r(1+r)^n / ((1+r)^n - 1)`, `r == 0` 이면 `1/n`.
pub fn capital_recovery_factor(rate: f64, years: u32) -> EngineResult<f64> {
    if years == 0 {
        return Err(EngineError::undefined("crf", "기간이 0년"));
    }
    let n = years as f64;
    if rate == 0.0 {
        return Ok(1.0 / n);
    }
    let growth = (1.0 + rate).powf(n);
    Ok(rate * growth / (growth - 1.0))
}

/// 원리금 균등상환 연간 상환액. 금리가 0이면 원금을 기간으로 나눈다.
pub fn amortizing_payment(principal: f64, rate: f64, years: u32) -> f64 {
    if principal <= 0.0 || years == 0 {
        return 0.0;
    }
    if rate == 0.0 {
        return principal / years as f64;
    }
    let growth = (1.0 + rate).powi(years as i32);
    principal * rate * growth / (growth - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_repays_principal_exactly() {
        let p = 1000.0;
        let r = 0.05;
        let pay = amortizing_payment(p, r, 10);
        let mut balance = p;
        for _ in 0..10 {
            balance -= pay - balance * r;
        }
        assert!(balance.abs() < 1e-9, "balance={balance}");
    }

    #[test]
    fn zero_years_is_undefined() {
        assert!(matches!(
            capital_recovery_factor(0.1, 0),
            Err(EngineError::UndefinedMetric { .. })
        ));
    }
}
