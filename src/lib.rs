//! 연료 생산 경로의 기술·경제성 계산 엔진.
//!
//! 플랜트·원료·제품·경제 조건을 받아 총투자비, 운영비, 탄소 배출,
//! 균등화 원가와 NPV·IRR·회수기간을 계산하고, 모든 중간값에 공식과
//! 대입 내역을 붙인다. CLI 는 이 라이브러리 위의 얇은 층이다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod engine;
pub mod error;
pub mod finance;
pub mod input;
pub mod normalize;
pub mod quantity;
pub mod report;
pub mod trace;
pub mod units;

pub use engine::{calculate, calculate_bare};
pub use error::{EngineError, EngineResult};
