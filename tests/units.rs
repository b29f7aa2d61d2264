//! 단위 정규화 회귀 테스트.
mod common;

use common::assert_close;
use fuel_pathway_tea::conversion::{normalize, registry, ConversionError};
use fuel_pathway_tea::quantity::QuantityClass;
use fuel_pathway_tea::units::*;

#[test]
fn same_unit_is_identity_even_when_unregistered() {
    // 같은 표기는 레지스트리 조회 전에 그대로 반환된다.
    let v = normalize(42.5, "furlong/fortnight", "furlong/fortnight", QuantityClass::Capacity)
        .expect("identity");
    assert_eq!(v, 42.5);
}

#[test]
fn capacity_conversions() {
    assert_close("kt", normalize(500.0, "kt/yr", "t/yr", QuantityClass::Capacity).unwrap(), 500_000.0, 1e-12);
    assert_close("t/d", normalize(100.0, "t/d", "t/yr", QuantityClass::Capacity).unwrap(), 36_500.0, 1e-12);
    assert_close("t/h", normalize(1.0, "t/h", "kt/yr", QuantityClass::Capacity).unwrap(), 8.76, 1e-12);
}

#[test]
fn price_and_energy_price_conversions() {
    assert_close("USD/kg", normalize(4.0, "USD/kg", "USD/t", QuantityClass::Price).unwrap(), 4000.0, 1e-12);
    assert_close(
        "USD/kWh",
        normalize(0.06, "USD/kWh", "USD/MWh", QuantityClass::EnergyPrice).unwrap(),
        60.0,
        1e-12,
    );
    assert_close(
        "USD/GJ",
        normalize(10.0, "USD/GJ", "USD/MWh", QuantityClass::EnergyPrice).unwrap(),
        36.0,
        1e-12,
    );
}

#[test]
fn carbon_intensity_energy_basis() {
    // 100 gCO2e/kWh = 27.78 gCO2e/MJ
    let v = normalize(100.0, "gCO2e/kWh", "gCO2e/MJ", QuantityClass::CarbonIntensity).unwrap();
    assert_close("g/kWh", v, 100.0 / 3.6, 1e-12);
    let v = normalize(0.089, "kgCO2e/MJ", "gCO2e/MJ", QuantityClass::CarbonIntensity).unwrap();
    assert_close("kg/MJ", v, 89.0, 1e-12);
}

#[test]
fn cross_basis_conversion_is_rejected() {
    let err = normalize(1.0, "gCO2e/MJ", "kgCO2e/kg", QuantityClass::CarbonIntensity).unwrap_err();
    assert!(matches!(err, ConversionError::IncompatibleBasis { .. }), "{err}");
    let err = normalize(1.0, "MWh/t", "t/t", QuantityClass::Yield).unwrap_err();
    assert!(matches!(err, ConversionError::IncompatibleBasis { .. }), "{err}");
    assert_eq!(
        convert_carbon_intensity(1.0, CarbonIntensityUnit::GramPerMegajoule, CarbonIntensityUnit::TonnePerTonne),
        None
    );
}

#[test]
fn unknown_unit_in_known_class() {
    let err = normalize(1.0, "USD/bbl", "USD/t", QuantityClass::Price).unwrap_err();
    assert_eq!(
        err,
        ConversionError::UnknownUnit {
            class: QuantityClass::Price,
            unit: "USD/bbl".into()
        }
    );
    // 다른 물리량의 단위는 인정하지 않는다.
    assert!(normalize(1.0, "MJ/kg", "GJ/t", QuantityClass::Price).is_err());
}

#[test]
fn prefixes_differing_only_by_case_are_not_merged() {
    // mt(밀리톤)·MT 는 등록되지 않았으므로 Mt 로 해석하면 안 된다.
    for unit in ["mt/yr", "MT/yr"] {
        assert_eq!(
            normalize(1.0, unit, "t/yr", QuantityClass::Capacity),
            Err(ConversionError::UnknownUnit {
                class: QuantityClass::Capacity,
                unit: unit.into()
            })
        );
    }
    assert!(matches!(
        normalize(1.0, "mJ/kg", "MJ/kg", QuantityClass::EnergyContent),
        Err(ConversionError::UnknownUnit { .. })
    ));
    assert!(normalize(1.0, "MWH/T", "kWh/t", QuantityClass::Yield).is_err());
    assert_close("Mt", normalize(1.0, "Mt/yr", "t/yr", QuantityClass::Capacity).unwrap(), 1.0e6, 1e-12);
    // 앞뒤 공백은 무시한다.
    assert_close("trim", normalize(1.0, " MWh/t ", "kWh/t", QuantityClass::Yield).unwrap(), 1000.0, 1e-12);
}

#[test]
fn every_registered_unit_round_trips_through_canonical() {
    let reg = registry();
    for class in QuantityClass::ALL {
        for unit in reg.supported_units(class) {
            let entry = reg.resolve(class, unit).unwrap();
            let canonical = reg.canonical_unit(class, entry.basis).unwrap();
            let there = reg.normalize(123.456, unit, canonical, class).unwrap();
            let back = reg.normalize(there, canonical, unit, class).unwrap();
            assert_close(&format!("{class} {unit}"), back, 123.456, 1e-12);
        }
    }
}

#[test]
fn typed_unit_functions_agree_with_registry() {
    let reg = registry();
    for from in CapacityUnit::ALL {
        for to in CapacityUnit::ALL {
            let typed = convert_capacity(7.5, from, to);
            let by_name = reg
                .normalize(7.5, from.aliases()[0], to.aliases()[0], QuantityClass::Capacity)
                .unwrap();
            assert_close("capacity", typed, by_name, 1e-12);
        }
    }
    assert_close(
        "price",
        convert_price(1.0, PriceUnit::UsdPerPound, PriceUnit::UsdPerTonne),
        reg.normalize(1.0, "USD/lb", "USD/t", QuantityClass::Price).unwrap(),
        1e-12,
    );
    assert_close(
        "energy price",
        convert_energy_price(3.0, EnergyPriceUnit::UsdPerMmbtu, EnergyPriceUnit::UsdPerMegawattHour),
        reg.normalize(3.0, "USD/MMBtu", "USD/MWh", QuantityClass::EnergyPrice).unwrap(),
        1e-12,
    );
    assert_close(
        "energy content",
        convert_energy_content(12.0, EnergyContentUnit::KilowattHourPerKilogram, EnergyContentUnit::MegajoulePerKilogram),
        43.2,
        1e-12,
    );
    assert_close(
        "density",
        convert_density(0.8, DensityUnit::KilogramPerLiter, DensityUnit::KilogramPerCubicMeter),
        800.0,
        1e-12,
    );
    assert_close("currency", convert_currency(2.5, CurrencyUnit::MegaUsd, CurrencyUnit::KiloUsd), 2500.0, 1e-12);
    assert_close("fraction", convert_fraction(0.45, FractionUnit::Fraction, FractionUnit::Percent), 45.0, 1e-12);
    assert_eq!(convert_yield(25.0, YieldUnit::Percent, YieldUnit::TonnePerTonne), Some(0.25));
    assert_eq!(convert_yield(1.0, YieldUnit::Percent, YieldUnit::MegawattHourPerTonne), None);
    assert_eq!(
        convert_carbon_intensity(1.0, CarbonIntensityUnit::KilogramPerKilogram, CarbonIntensityUnit::GramPerKilogram),
        Some(1000.0)
    );
}
