use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// IRR 탐색 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// NPV 절대값 및 구간 폭 허용오차
    pub irr_tolerance: f64,
    /// 이분법 최대 반복 횟수
    pub irr_max_iterations: u32,
    pub irr_lower_bound: f64,
    pub irr_upper_bound: f64,
    /// true면 IRR 수렴 실패가 전체 계산 실패가 된다.
    pub strict_irr: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            irr_tolerance: 1e-6,
            irr_max_iterations: 100,
            irr_lower_bound: -0.99,
            irr_upper_bound: 10.0,
            strict_irr: false,
        }
    }
}

/// 제품 수율 합계가 허용 범위를 벗어날 때의 처리 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassFractionPolicy {
    /// 경고만 남기고 계속 계산한다.
    Warn,
    /// 검증 오류로 처리한다.
    Reject,
}

/// 입력 검증 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub mass_fraction_policy: MassFractionPolicy,
    /// 제품 수율 합계 허용 범위 [%]
    pub mass_fraction_band_pct: [f64; 2],
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            mass_fraction_policy: MassFractionPolicy::Warn,
            mass_fraction_band_pct: [99.0, 101.0],
        }
    }
}

/// 결과 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Json,
    Toml,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub include_traces: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            include_traces: true,
        }
    }
}

/// 엔진이 호출 인자로 받는 설정. 파일을 직접 읽지 않는다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineSettings {
    pub solver: SolverSettings,
    pub validation: ValidationSettings,
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub solver: SolverSettings,
    pub validation: ValidationSettings,
    pub output: OutputSettings,
}

impl Config {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            solver: self.solver.clone(),
            validation: self.validation.clone(),
        }
    }

    /// 설정을 지정한 경로에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        Ok(cfg)
    }
}
