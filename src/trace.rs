//! 계산 추적 값.
//!
//! 계산된 수치마다 공식, 사용한 하위 값, 단계별 대입 내역을 붙여서
//! 다시 유도하지 않고도 결과를 설명할 수 있게 한다. 추적 값은 생성 후
//! 변경되지 않으며, 후속 값은 `Arc`로 공유해 의존 값의 추적을 그대로 보존한다.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// 계산 단계 하나.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationStep {
    pub description: String,
    /// 기호 공식
    pub formula: String,
    /// 수치를 대입한 식
    pub substitution: String,
    pub result: f64,
}

/// 추적 값이 참조하는 입력. 다른 추적 값이거나 단순 스칼라다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TraceInput {
    Traced(Arc<TraceableValue>),
    Scalar { value: f64, unit: String },
}

impl TraceInput {
    pub fn value(&self) -> f64 {
        match self {
            TraceInput::Traced(t) => t.value(),
            TraceInput::Scalar { value, .. } => *value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceableValue {
    name: String,
    value: f64,
    unit: String,
    formula: String,
    inputs: BTreeMap<String, TraceInput>,
    #[serde(rename = "calculation_steps")]
    steps: Vec<CalculationStep>,
}

impl TraceableValue {
    /// 이미 계산된 값에 추적 정보를 붙인다. `value`는 그대로 보존된다.
    pub fn wrap(
        name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        formula: impl Into<String>,
        inputs: BTreeMap<String, TraceInput>,
        steps: Vec<CalculationStep>,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
            formula: formula.into(),
            inputs,
            steps,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn inputs(&self) -> &BTreeMap<String, TraceInput> {
        &self.inputs
    }

    pub fn steps(&self) -> &[CalculationStep] {
        &self.steps
    }

    /// 이름으로 직접 의존 값을 찾는다.
    pub fn input(&self, name: &str) -> Option<&TraceInput> {
        self.inputs.get(name)
    }
}

/// `TraceableValue`를 단계적으로 조립한다.
#[derive(Debug, Clone)]
pub struct TraceBuilder {
    name: String,
    unit: String,
    formula: String,
    inputs: BTreeMap<String, TraceInput>,
    steps: Vec<CalculationStep>,
}

impl TraceBuilder {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, formula: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            formula: formula.into(),
            inputs: BTreeMap::new(),
            steps: Vec::new(),
        }
    }

    pub fn traced(mut self, key: impl Into<String>, value: &Arc<TraceableValue>) -> Self {
        self.inputs
            .insert(key.into(), TraceInput::Traced(Arc::clone(value)));
        self
    }

    pub fn scalar(mut self, key: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        self.inputs.insert(
            key.into(),
            TraceInput::Scalar {
                value,
                unit: unit.into(),
            },
        );
        self
    }

    pub fn step(
        mut self,
        description: impl Into<String>,
        formula: impl Into<String>,
        substitution: impl Into<String>,
        result: f64,
    ) -> Self {
        self.steps.push(CalculationStep {
            description: description.into(),
            formula: formula.into(),
            substitution: substitution.into(),
            result,
        });
        self
    }

    pub fn build(self, value: f64) -> Arc<TraceableValue> {
        Arc::new(TraceableValue::wrap(
            self.name,
            value,
            self.unit,
            self.formula,
            self.inputs,
            self.steps,
        ))
    }
}

/// 대입식에 넣을 수치 표기. 매우 크거나 작은 값은 지수 표기를 쓴다.
pub fn num(x: f64) -> String {
    let a = x.abs();
    if a != 0.0 && !(1e-4..1e9).contains(&a) {
        return format!("{x:.6e}");
    }
    let s = format!("{x:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
