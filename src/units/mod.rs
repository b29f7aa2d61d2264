//! 단위 정의 및 변환 모듈 모음.

pub mod capacity;
pub mod carbon_intensity;
pub mod energy_content;
pub mod energy_price;
pub mod misc;
pub mod price;
pub mod yield_ratio;

pub use capacity::{convert_capacity, CapacityUnit};
pub use carbon_intensity::{convert_carbon_intensity, CarbonIntensityUnit};
pub use energy_content::{convert_energy_content, EnergyContentUnit};
pub use energy_price::{convert_energy_price, EnergyPriceUnit};
pub use misc::{convert_currency, convert_density, convert_fraction, CurrencyUnit, DensityUnit, FractionUnit};
pub use price::{convert_price, PriceUnit};
pub use yield_ratio::{convert_yield, YieldUnit};
