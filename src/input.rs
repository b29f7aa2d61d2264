//! 엔진 입력 자료 구조. 모든 수치는 선언된 단위 문자열과 함께 들어온다.

use serde::{Deserialize, Serialize};

/// 값과 선언 단위의 쌍.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measured {
    pub value: f64,
    pub unit: String,
}

impl Measured {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// 전환 플랜트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionPlant {
    /// 제품 기준 생산능력 (질량/시간)
    pub capacity: Measured,
    /// 연간 가동시간 [h]
    pub annual_load_hours: f64,
    /// 공정 기본 탄소집약도 (에너지 기준)
    pub process_carbon_intensity: Measured,
}

/// 원료 투입 조건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedstockInput {
    pub name: String,
    pub price: Measured,
    /// 탄소 함량 (질량분율)
    pub carbon_content: Measured,
    /// 탄소집약도 (에너지 기준)
    pub carbon_intensity: Measured,
    pub energy_content: Measured,
    /// 제품 1톤당 원료 투입량
    #[serde(rename = "yield")]
    pub mass_yield: Measured,
}

/// 수소·전력 같은 유틸리티 투입 조건. 0 값도 유효한 입력이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityInput {
    /// 수소는 질량 기준 단가, 전력은 에너지 기준 단가
    pub price: Measured,
    /// 수소는 질량 기준, 전력은 에너지 기준 탄소집약도
    pub carbon_intensity: Measured,
    /// 제품 1톤당 유틸리티 소비량
    #[serde(rename = "yield")]
    pub consumption_yield: Measured,
}

/// 제품 사양.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSpec {
    pub name: String,
    pub price: Measured,
    /// 탄소집약도에 대한 가격 민감도 [USD/t per gCO2e/MJ]
    #[serde(default)]
    pub price_ci_sensitivity: f64,
    pub carbon_content: Measured,
    pub energy_content: Measured,
    #[serde(default)]
    pub density: Option<Measured>,
    /// 생산능력 중 이 제품에 해당하는 질량 비율
    #[serde(rename = "yield")]
    pub mass_yield: Measured,
}

fn default_scaling_exponent() -> f64 {
    0.6
}

/// 경제성 기본 파라미터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicParameters {
    pub project_lifetime_years: u32,
    /// 할인율 (0~1)
    pub discount_rate: f64,
    /// 기준 총투자비(TCI)
    pub reference_tci: Measured,
    /// 기준 TCI에 대응하는 생산능력
    pub reference_capacity: Measured,
    #[serde(default = "default_scaling_exponent")]
    pub tci_scaling_exponent: f64,
    pub working_capital_ratio: f64,
    pub indirect_opex_ratio: f64,
    /// LCCA 비교 기준 화석연료 가격. 없으면 0으로 본다.
    #[serde(default)]
    pub reference_fuel_price: Option<Measured>,
}

/// 자금 조달·세무 조건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingParameters {
    /// 자기자본 비율 (0~1)
    pub equity_fraction: f64,
    pub bank_interest_rate: f64,
    pub loan_term_years: u32,
    /// 정액 감가상각률 (TCI 대비, 0~1)
    pub depreciation_rate: f64,
    pub tax_rate: f64,
    #[serde(default)]
    pub land_cost: Option<Measured>,
}

/// 엔진 한 번 호출에 필요한 전체 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub plant: ConversionPlant,
    pub feedstocks: Vec<FeedstockInput>,
    pub hydrogen: UtilityInput,
    pub electricity: UtilityInput,
    pub products: Vec<ProductSpec>,
    pub economics: EconomicParameters,
    pub financing: FinancingParameters,
}
