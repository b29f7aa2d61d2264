//! 단위 정규화기.
//!
//! 모든 물리량은 계산 전에 물리량별 내부 기준 단위로 환산된다.
//! 단위 표기는 시작 시 한 번 만들어지는 레지스트리 `(물리량, 표기) → 단위`
//! 에서 찾으며, 등록되지 않은 표기는 즉시 실패한다. 실제 환산은 물리량별
//! 단위 모듈의 변환 함수가 맡는다.

use std::collections::HashMap;
use std::sync::OnceLock;

use thiserror::Error;

use crate::quantity::{Basis, QuantityClass};
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// 해당 물리량에 등록되지 않은 단위 문자열
    #[error("{class}에 등록되지 않은 단위: {unit}")]
    UnknownUnit { class: QuantityClass, unit: String },
    /// 같은 물리량이지만 기준(질량/에너지)이 달라 환산할 수 없음
    #[error("{class}: {from} → {to} 는 기준이 달라 환산할 수 없음")]
    IncompatibleBasis {
        class: QuantityClass,
        from: String,
        to: String,
    },
}

/// 물리량별 단위 열거형을 하나로 묶은 값.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Capacity(CapacityUnit),
    Price(PriceUnit),
    EnergyPrice(EnergyPriceUnit),
    EnergyContent(EnergyContentUnit),
    CarbonIntensity(CarbonIntensityUnit),
    Yield(YieldUnit),
    Fraction(FractionUnit),
    Currency(CurrencyUnit),
    Density(DensityUnit),
}

impl Unit {
    pub fn class(self) -> QuantityClass {
        match self {
            Unit::Capacity(_) => QuantityClass::Capacity,
            Unit::Price(_) => QuantityClass::Price,
            Unit::EnergyPrice(_) => QuantityClass::EnergyPrice,
            Unit::EnergyContent(_) => QuantityClass::EnergyContent,
            Unit::CarbonIntensity(_) => QuantityClass::CarbonIntensity,
            Unit::Yield(_) => QuantityClass::Yield,
            Unit::Fraction(_) => QuantityClass::Fraction,
            Unit::Currency(_) => QuantityClass::Currency,
            Unit::Density(_) => QuantityClass::Density,
        }
    }

    pub fn basis(self) -> Basis {
        match self {
            Unit::CarbonIntensity(u) => u.basis(),
            Unit::Yield(u) => u.basis(),
            _ => Basis::Single,
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Unit::Capacity(u) => u.aliases(),
            Unit::Price(u) => u.aliases(),
            Unit::EnergyPrice(u) => u.aliases(),
            Unit::EnergyContent(u) => u.aliases(),
            Unit::CarbonIntensity(u) => u.aliases(),
            Unit::Yield(u) => u.aliases(),
            Unit::Fraction(u) => u.aliases(),
            Unit::Currency(u) => u.aliases(),
            Unit::Density(u) => u.aliases(),
        }
    }

    /// 물리량·기준별 내부 기준 단위.
    pub fn canonical(class: QuantityClass, basis: Basis) -> Option<Unit> {
        use QuantityClass as Q;
        let unit = match (class, basis) {
            (Q::Capacity, Basis::Single) => Unit::Capacity(CapacityUnit::TonnePerYear),
            (Q::Price, Basis::Single) => Unit::Price(PriceUnit::UsdPerTonne),
            (Q::EnergyPrice, Basis::Single) => Unit::EnergyPrice(EnergyPriceUnit::UsdPerMegawattHour),
            (Q::EnergyContent, Basis::Single) => {
                Unit::EnergyContent(EnergyContentUnit::MegajoulePerKilogram)
            }
            (Q::CarbonIntensity, Basis::Energy) => {
                Unit::CarbonIntensity(CarbonIntensityUnit::GramPerMegajoule)
            }
            (Q::CarbonIntensity, Basis::Mass) => {
                Unit::CarbonIntensity(CarbonIntensityUnit::KilogramPerKilogram)
            }
            (Q::Yield, Basis::Mass) => Unit::Yield(YieldUnit::TonnePerTonne),
            (Q::Yield, Basis::Energy) => Unit::Yield(YieldUnit::MegawattHourPerTonne),
            (Q::Fraction, Basis::Single) => Unit::Fraction(FractionUnit::Fraction),
            (Q::Currency, Basis::Single) => Unit::Currency(CurrencyUnit::Usd),
            (Q::Density, Basis::Single) => Unit::Density(DensityUnit::KilogramPerCubicMeter),
            _ => return None,
        };
        Some(unit)
    }
}

/// 물리량별 변환 함수로 환산한다. 물리량이나 기준이 다르면 `None`.
pub fn convert(value: f64, from: Unit, to: Unit) -> Option<f64> {
    match (from, to) {
        (Unit::Capacity(f), Unit::Capacity(t)) => Some(convert_capacity(value, f, t)),
        (Unit::Price(f), Unit::Price(t)) => Some(convert_price(value, f, t)),
        (Unit::EnergyPrice(f), Unit::EnergyPrice(t)) => Some(convert_energy_price(value, f, t)),
        (Unit::EnergyContent(f), Unit::EnergyContent(t)) => {
            Some(convert_energy_content(value, f, t))
        }
        (Unit::CarbonIntensity(f), Unit::CarbonIntensity(t)) => convert_carbon_intensity(value, f, t),
        (Unit::Yield(f), Unit::Yield(t)) => convert_yield(value, f, t),
        (Unit::Fraction(f), Unit::Fraction(t)) => Some(convert_fraction(value, f, t)),
        (Unit::Currency(f), Unit::Currency(t)) => Some(convert_currency(value, f, t)),
        (Unit::Density(f), Unit::Density(t)) => Some(convert_density(value, f, t)),
        _ => None,
    }
}

/// 레지스트리 항목 하나.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitEntry {
    pub class: QuantityClass,
    /// 대표 표기
    pub symbol: &'static str,
    pub basis: Basis,
    pub unit: Unit,
}

/// 열거형 단위 정의로부터 만든 단위 표기 레지스트리.
///
/// 표기는 대소문자까지 정확히 일치해야 한다 (`Mt` 와 `mt` 는 다른 단위).
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    entries: HashMap<(QuantityClass, String), UnitEntry>,
    order: Vec<UnitEntry>,
}

impl UnitRegistry {
    /// 기본 단위 정의로 레지스트리를 만든다.
    pub fn standard() -> Self {
        let mut reg = UnitRegistry {
            entries: HashMap::new(),
            order: Vec::new(),
        };
        let units = CapacityUnit::ALL
            .into_iter()
            .map(Unit::Capacity)
            .chain(PriceUnit::ALL.into_iter().map(Unit::Price))
            .chain(EnergyPriceUnit::ALL.into_iter().map(Unit::EnergyPrice))
            .chain(EnergyContentUnit::ALL.into_iter().map(Unit::EnergyContent))
            .chain(CarbonIntensityUnit::ALL.into_iter().map(Unit::CarbonIntensity))
            .chain(YieldUnit::ALL.into_iter().map(Unit::Yield))
            .chain(FractionUnit::ALL.into_iter().map(Unit::Fraction))
            .chain(CurrencyUnit::ALL.into_iter().map(Unit::Currency))
            .chain(DensityUnit::ALL.into_iter().map(Unit::Density));
        for unit in units {
            reg.register(unit);
        }
        reg
    }

    fn register(&mut self, unit: Unit) {
        let aliases = unit.aliases();
        let Some(symbol) = aliases.first().copied() else {
            return;
        };
        let entry = UnitEntry {
            class: unit.class(),
            symbol,
            basis: unit.basis(),
            unit,
        };
        for alias in aliases {
            self.entries.insert((entry.class, alias.to_string()), entry);
        }
        self.order.push(entry);
    }

    /// 단위 문자열을 레지스트리 항목으로 해석한다. 앞뒤 공백만 무시한다.
    pub fn resolve(&self, class: QuantityClass, unit: &str) -> Result<&UnitEntry, ConversionError> {
        self.entries
            .get(&(class, unit.trim().to_string()))
            .ok_or_else(|| ConversionError::UnknownUnit {
                class,
                unit: unit.to_string(),
            })
    }

    /// `value`를 `from` 단위에서 `to` 단위로 환산한다.
    ///
    /// 같은 단위 표기는 레지스트리를 보지 않고 그대로 반환한다.
    pub fn normalize(
        &self,
        value: f64,
        from: &str,
        to: &str,
        class: QuantityClass,
    ) -> Result<f64, ConversionError> {
        if from.trim() == to.trim() {
            return Ok(value);
        }
        let f = self.resolve(class, from)?;
        let t = self.resolve(class, to)?;
        convert(value, f.unit, t.unit).ok_or_else(|| ConversionError::IncompatibleBasis {
            class,
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// 물리량·기준별 내부 기준 단위 표기.
    pub fn canonical_unit(&self, class: QuantityClass, basis: Basis) -> Option<&'static str> {
        Unit::canonical(class, basis).and_then(|u| u.aliases().first().copied())
    }

    /// 값을 해당 단위가 속한 기준의 내부 단위로 환산하고 그 기준을 함께 돌려준다.
    pub fn to_canonical(
        &self,
        value: f64,
        unit: &str,
        class: QuantityClass,
    ) -> Result<(f64, Basis), ConversionError> {
        let entry = self.resolve(class, unit)?;
        let canonical = Unit::canonical(class, entry.basis)
            .and_then(|c| convert(value, entry.unit, c))
            .ok_or_else(|| ConversionError::UnknownUnit {
                class,
                unit: unit.to_string(),
            })?;
        Ok((canonical, entry.basis))
    }

    /// 해당 물리량에 등록된 대표 단위 표기 목록.
    pub fn supported_units(&self, class: QuantityClass) -> Vec<&'static str> {
        self.order
            .iter()
            .filter(|e| e.class == class)
            .map(|e| e.symbol)
            .collect()
    }
}

/// 공용 레지스트리. 생성 후에는 읽기 전용이다.
pub fn registry() -> &'static UnitRegistry {
    static REGISTRY: OnceLock<UnitRegistry> = OnceLock::new();
    REGISTRY.get_or_init(UnitRegistry::standard)
}

/// 공용 레지스트리로 단위를 환산한다.
///
/// 단위 문자열 예시: `t/yr`, `USD/kg`, `USD/MWh`, `gCO2e/MJ`, `MWh/t`, `%`.
pub fn normalize(
    value: f64,
    from: &str,
    to: &str,
    class: QuantityClass,
) -> Result<f64, ConversionError> {
    registry().normalize(value, from, to, class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_do_not_collide_within_a_class() {
        let mut seen = std::collections::HashSet::new();
        for entry in &UnitRegistry::standard().order {
            for alias in entry.unit.aliases() {
                assert!(seen.insert((entry.class, *alias)), "{}: {alias}", entry.class);
            }
        }
    }

    #[test]
    fn every_class_has_canonical_unit() {
        let reg = UnitRegistry::standard();
        for class in QuantityClass::ALL {
            let has_any = [Basis::Single, Basis::Mass, Basis::Energy]
                .into_iter()
                .any(|b| reg.canonical_unit(class, b).is_some());
            assert!(has_any, "{class}");
        }
        assert_eq!(reg.canonical_unit(QuantityClass::CarbonIntensity, Basis::Energy), Some("gCO2e/MJ"));
        assert_eq!(reg.canonical_unit(QuantityClass::CarbonIntensity, Basis::Mass), Some("kgCO2e/kg"));
        assert_eq!(reg.canonical_unit(QuantityClass::Yield, Basis::Energy), Some("MWh/t"));
    }

    #[test]
    fn canonical_units_are_registered_with_matching_basis() {
        let reg = UnitRegistry::standard();
        for entry in &reg.order {
            let symbol = reg.canonical_unit(entry.class, entry.basis).unwrap();
            assert_eq!(reg.resolve(entry.class, symbol).unwrap().basis, entry.basis);
        }
    }
}
