#![allow(dead_code)]

use fuel_pathway_tea::input::*;

pub fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn m(value: f64, unit: &str) -> Measured {
    Measured::new(value, unit)
}

/// HEFA 계열 SAF 플랜트 기준 시나리오.
pub fn sample_input() -> CalculationInput {
    CalculationInput {
        plant: ConversionPlant {
            capacity: m(500_000.0, "t/yr"),
            annual_load_hours: 8000.0,
            process_carbon_intensity: m(10.0, "gCO2e/MJ"),
        },
        feedstocks: vec![FeedstockInput {
            name: "used cooking oil".into(),
            price: m(300.0, "USD/t"),
            carbon_content: m(0.45, "fraction"),
            carbon_intensity: m(20.0, "gCO2e/MJ"),
            energy_content: m(18.0, "MJ/kg"),
            mass_yield: m(2.5, "t/t"),
        }],
        hydrogen: UtilityInput {
            price: m(4.0, "USD/kg"),
            carbon_intensity: m(1.0, "kgCO2e/kg"),
            consumption_yield: m(0.03, "t/t"),
        },
        electricity: UtilityInput {
            price: m(60.0, "USD/MWh"),
            carbon_intensity: m(100.0, "gCO2e/kWh"),
            consumption_yield: m(1.5, "MWh/t"),
        },
        products: vec![
            ProductSpec {
                name: "SAF".into(),
                price: m(2500.0, "USD/t"),
                price_ci_sensitivity: 0.0,
                carbon_content: m(0.85, "fraction"),
                energy_content: m(43.5, "MJ/kg"),
                density: Some(m(800.0, "kg/m3")),
                mass_yield: m(0.7, "t/t"),
            },
            ProductSpec {
                name: "renewable diesel".into(),
                price: m(1800.0, "USD/t"),
                price_ci_sensitivity: 0.0,
                carbon_content: m(0.86, "fraction"),
                energy_content: m(43.0, "MJ/kg"),
                density: None,
                mass_yield: m(0.3, "t/t"),
            },
        ],
        economics: EconomicParameters {
            project_lifetime_years: 20,
            discount_rate: 0.1,
            reference_tci: m(250.0, "MUSD"),
            reference_capacity: m(50_000.0, "t/yr"),
            tci_scaling_exponent: 0.6,
            working_capital_ratio: 0.05,
            indirect_opex_ratio: 0.04,
            reference_fuel_price: None,
        },
        financing: FinancingParameters {
            equity_fraction: 0.4,
            bank_interest_rate: 0.06,
            loan_term_years: 10,
            depreciation_rate: 0.05,
            tax_rate: 0.25,
            land_cost: Some(m(5.0, "MUSD")),
        },
    }
}
