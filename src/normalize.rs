//! 입력 검증과 내부 기준 단위로의 정규화.
//!
//! 여기서 실패하면 어떤 계산 단계도 실행되지 않는다.

use crate::config::{MassFractionPolicy, ValidationSettings};
use crate::conversion::{registry, ConversionError};
use crate::error::{EngineError, EngineResult};
use crate::input::{CalculationInput, Measured, UtilityInput};
use crate::quantity::{Basis, QuantityClass};

/// 플랜트 조건 (내부 단위)
#[derive(Debug, Clone, PartialEq)]
pub struct Plant {
    /// [t/yr]
    pub capacity: f64,
    /// [h/yr]
    pub annual_load_hours: f64,
    /// [gCO2e/MJ]
    pub process_carbon_intensity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feedstock {
    pub name: String,
    /// [USD/t]
    pub price: f64,
    /// 질량분율 (0~1)
    pub carbon_content: f64,
    /// [gCO2e/MJ]
    pub carbon_intensity: f64,
    /// [MJ/kg]
    pub energy_content: f64,
    /// [t/t]
    pub mass_yield: f64,
}

/// 유틸리티 조건. 단위는 종류별로 다르다.
/// 수소: 단가 USD/t, 탄소집약도 kgCO2e/kg, 수율 t/t.
/// 전력: 단가 USD/MWh, 탄소집약도 gCO2e/MJ, 수율 MWh/t.
#[derive(Debug, Clone, PartialEq)]
pub struct Utility {
    pub price: f64,
    pub carbon_intensity: f64,
    pub consumption_yield: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    /// [USD/t]
    pub price: f64,
    /// [USD/t per gCO2e/MJ]
    pub price_ci_sensitivity: f64,
    pub carbon_content: f64,
    /// [MJ/kg]
    pub energy_content: f64,
    /// [kg/m3]
    pub density: Option<f64>,
    /// [t/t]
    pub mass_yield: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Economics {
    pub lifetime_years: u32,
    pub discount_rate: f64,
    /// [USD]
    pub reference_tci: f64,
    /// [t/yr]
    pub reference_capacity: f64,
    pub scaling_exponent: f64,
    pub working_capital_ratio: f64,
    pub indirect_opex_ratio: f64,
    /// [USD/t]
    pub reference_fuel_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Financing {
    pub equity_fraction: f64,
    pub bank_interest_rate: f64,
    pub loan_term_years: u32,
    pub depreciation_rate: f64,
    pub tax_rate: f64,
    /// [USD]
    pub land_cost: f64,
}

/// 검증과 단위 정규화를 마친 입력.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInput {
    pub plant: Plant,
    pub feedstocks: Vec<Feedstock>,
    pub hydrogen: Utility,
    pub electricity: Utility,
    pub products: Vec<Product>,
    pub economics: Economics,
    pub financing: Financing,
}

fn require(ok: bool, field: &str, message: &str) -> EngineResult<()> {
    if ok {
        Ok(())
    } else {
        Err(EngineError::validation(field, message))
    }
}

fn finite(value: f64, field: &str) -> EngineResult<f64> {
    require(value.is_finite(), field, "유한한 수치가 아님")?;
    Ok(value)
}

fn in_unit_range(value: f64, field: &str) -> EngineResult<f64> {
    require((0.0..=1.0).contains(&value), field, "0~1 범위를 벗어남")?;
    Ok(value)
}

/// 값을 지정한 물리량·기준의 내부 단위로 환산한다.
fn canonical(m: &Measured, class: QuantityClass, want: Basis, field: &str) -> EngineResult<f64> {
    finite(m.value, field)?;
    let reg = registry();
    let (value, basis) = reg.to_canonical(m.value, &m.unit, class)?;
    if basis != want {
        return Err(ConversionError::IncompatibleBasis {
            class,
            from: m.unit.clone(),
            to: reg.canonical_unit(class, want).unwrap_or("?").to_string(),
        }
        .into());
    }
    Ok(value)
}

fn single(m: &Measured, class: QuantityClass, field: &str) -> EngineResult<f64> {
    canonical(m, class, Basis::Single, field)
}

fn non_negative(value: f64, field: &str) -> EngineResult<f64> {
    require(value >= 0.0, field, "음수일 수 없음")?;
    Ok(value)
}

fn utility(
    u: &UtilityInput,
    field: &str,
    price_class: QuantityClass,
    basis: Basis,
) -> EngineResult<Utility> {
    let price = single(&u.price, price_class, &format!("{field}.price"))?;
    let carbon_intensity = canonical(
        &u.carbon_intensity,
        QuantityClass::CarbonIntensity,
        basis,
        &format!("{field}.carbon_intensity"),
    )?;
    let consumption_yield = canonical(
        &u.consumption_yield,
        QuantityClass::Yield,
        basis,
        &format!("{field}.yield"),
    )?;
    Ok(Utility {
        price: non_negative(price, &format!("{field}.price"))?,
        carbon_intensity: non_negative(carbon_intensity, &format!("{field}.carbon_intensity"))?,
        consumption_yield: non_negative(consumption_yield, &format!("{field}.yield"))?,
    })
}

/// 입력을 검증하고 내부 기준 단위로 환산한다.
///
/// 정책 경고(제품 수율 합계 범위 등)는 두 번째 반환값으로 돌려준다.
pub fn normalize_input(
    input: &CalculationInput,
    settings: &ValidationSettings,
) -> EngineResult<(NormalizedInput, Vec<String>)> {
    let mut warnings = Vec::new();

    let p = &input.plant;
    let capacity = single(&p.capacity, QuantityClass::Capacity, "plant.capacity")?;
    require(capacity > 0.0, "plant.capacity", "0보다 커야 함")?;
    let hours = finite(p.annual_load_hours, "plant.annual_load_hours")?;
    require(
        hours > 0.0 && hours <= 8760.0,
        "plant.annual_load_hours",
        "0 초과 8760 이하여야 함",
    )?;
    let process_ci = canonical(
        &p.process_carbon_intensity,
        QuantityClass::CarbonIntensity,
        Basis::Energy,
        "plant.process_carbon_intensity",
    )?;
    let plant = Plant {
        capacity,
        annual_load_hours: hours,
        process_carbon_intensity: non_negative(process_ci, "plant.process_carbon_intensity")?,
    };

    require(!input.feedstocks.is_empty(), "feedstocks", "원료가 하나 이상 필요함")?;
    let mut feedstocks = Vec::with_capacity(input.feedstocks.len());
    for (i, f) in input.feedstocks.iter().enumerate() {
        let field = |name: &str| format!("feedstocks[{i}].{name}");
        let carbon_content = single(&f.carbon_content, QuantityClass::Fraction, &field("carbon_content"))?;
        let carbon_intensity = canonical(
            &f.carbon_intensity,
            QuantityClass::CarbonIntensity,
            Basis::Energy,
            &field("carbon_intensity"),
        )?;
        let energy_content = single(&f.energy_content, QuantityClass::EnergyContent, &field("energy_content"))?;
        let mass_yield = canonical(&f.mass_yield, QuantityClass::Yield, Basis::Mass, &field("yield"))?;
        feedstocks.push(Feedstock {
            name: f.name.clone(),
            // 처리비를 받는 폐원료는 음수 단가가 가능하다.
            price: single(&f.price, QuantityClass::Price, &field("price"))?,
            carbon_content: in_unit_range(carbon_content, &field("carbon_content"))?,
            carbon_intensity: non_negative(carbon_intensity, &field("carbon_intensity"))?,
            energy_content: non_negative(energy_content, &field("energy_content"))?,
            mass_yield: non_negative(mass_yield, &field("yield"))?,
        });
    }

    let hydrogen = utility(&input.hydrogen, "hydrogen", QuantityClass::Price, Basis::Mass)?;
    let electricity = utility(
        &input.electricity,
        "electricity",
        QuantityClass::EnergyPrice,
        Basis::Energy,
    )?;

    require(!input.products.is_empty(), "products", "제품이 하나 이상 필요함")?;
    let mut products = Vec::with_capacity(input.products.len());
    for (i, pr) in input.products.iter().enumerate() {
        let field = |name: &str| format!("products[{i}].{name}");
        let carbon_content = single(&pr.carbon_content, QuantityClass::Fraction, &field("carbon_content"))?;
        let energy_content = single(&pr.energy_content, QuantityClass::EnergyContent, &field("energy_content"))?;
        let density = match &pr.density {
            Some(d) => {
                let v = single(d, QuantityClass::Density, &field("density"))?;
                require(v > 0.0, &field("density"), "0보다 커야 함")?;
                Some(v)
            }
            None => None,
        };
        let mass_yield = canonical(&pr.mass_yield, QuantityClass::Yield, Basis::Mass, &field("yield"))?;
        products.push(Product {
            name: pr.name.clone(),
            price: single(&pr.price, QuantityClass::Price, &field("price"))?,
            price_ci_sensitivity: finite(pr.price_ci_sensitivity, &field("price_ci_sensitivity"))?,
            carbon_content: in_unit_range(carbon_content, &field("carbon_content"))?,
            energy_content: non_negative(energy_content, &field("energy_content"))?,
            density,
            mass_yield: non_negative(mass_yield, &field("yield"))?,
        });
    }

    let total_yield_pct: f64 = products.iter().map(|p| p.mass_yield).sum::<f64>() * 100.0;
    let [low, high] = settings.mass_fraction_band_pct;
    if !(low..=high).contains(&total_yield_pct) {
        let message = format!(
            "제품 수율 합계 {total_yield_pct:.3}% 가 허용 범위 [{low}, {high}]% 를 벗어남"
        );
        match settings.mass_fraction_policy {
            MassFractionPolicy::Reject => {
                return Err(EngineError::validation("products.yield", message))
            }
            MassFractionPolicy::Warn => {
                log::warn!("{message}");
                warnings.push(message);
            }
        }
    }

    let e = &input.economics;
    require(e.project_lifetime_years > 0, "economics.project_lifetime_years", "0보다 커야 함")?;
    let discount_rate = in_unit_range(finite(e.discount_rate, "economics.discount_rate")?, "economics.discount_rate")?;
    let reference_tci = single(&e.reference_tci, QuantityClass::Currency, "economics.reference_tci")?;
    require(reference_tci > 0.0, "economics.reference_tci", "0보다 커야 함")?;
    let reference_capacity = single(&e.reference_capacity, QuantityClass::Capacity, "economics.reference_capacity")?;
    require(
        reference_capacity > 0.0,
        "economics.reference_capacity",
        "0보다 커야 함 (기준 용량 0은 설정 오류)",
    )?;
    let exponent = finite(e.tci_scaling_exponent, "economics.tci_scaling_exponent")?;
    require(
        exponent > 0.0 && exponent <= 1.0,
        "economics.tci_scaling_exponent",
        "0 초과 1 이하여야 함",
    )?;
    let reference_fuel_price = match &e.reference_fuel_price {
        Some(m) => single(m, QuantityClass::Price, "economics.reference_fuel_price")?,
        None => 0.0,
    };
    let economics = Economics {
        lifetime_years: e.project_lifetime_years,
        discount_rate,
        reference_tci,
        reference_capacity,
        scaling_exponent: exponent,
        working_capital_ratio: non_negative(
            finite(e.working_capital_ratio, "economics.working_capital_ratio")?,
            "economics.working_capital_ratio",
        )?,
        indirect_opex_ratio: non_negative(
            finite(e.indirect_opex_ratio, "economics.indirect_opex_ratio")?,
            "economics.indirect_opex_ratio",
        )?,
        reference_fuel_price,
    };

    let f = &input.financing;
    let equity_fraction = in_unit_range(finite(f.equity_fraction, "financing.equity_fraction")?, "financing.equity_fraction")?;
    require(
        equity_fraction >= economics.working_capital_ratio,
        "financing.equity_fraction",
        "자기자본 비율이 운전자본 비율보다 작으면 지분 투자액이 음수가 됨",
    )?;
    let bank_interest_rate = non_negative(
        finite(f.bank_interest_rate, "financing.bank_interest_rate")?,
        "financing.bank_interest_rate",
    )?;
    require(
        equity_fraction >= 1.0 || f.loan_term_years > 0,
        "financing.loan_term_years",
        "차입금이 있으면 대출 기간은 1년 이상이어야 함",
    )?;
    if equity_fraction < 1.0 && f.loan_term_years > economics.lifetime_years {
        let message = format!(
            "대출 기간 {}년이 사업 수명 {}년보다 길어 잔액을 마지막 해에 일시 상환함",
            f.loan_term_years, economics.lifetime_years
        );
        log::warn!("{message}");
        warnings.push(message);
    }
    let land_cost = match &f.land_cost {
        Some(m) => non_negative(
            single(m, QuantityClass::Currency, "financing.land_cost")?,
            "financing.land_cost",
        )?,
        None => 0.0,
    };
    let financing = Financing {
        equity_fraction,
        bank_interest_rate,
        loan_term_years: f.loan_term_years,
        depreciation_rate: in_unit_range(
            finite(f.depreciation_rate, "financing.depreciation_rate")?,
            "financing.depreciation_rate",
        )?,
        tax_rate: in_unit_range(finite(f.tax_rate, "financing.tax_rate")?, "financing.tax_rate")?,
        land_cost,
    };

    Ok((
        NormalizedInput {
            plant,
            feedstocks,
            hydrogen,
            electricity,
            products,
            economics,
            financing,
        },
        warnings,
    ))
}
