//! 명령행 인터페이스. 시나리오 파일을 읽어 엔진을 실행하고 결과를 출력한다.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use thiserror::Error;

use crate::config::{self, Config, ConfigError, OutputFormat};
use crate::conversion::{self, ConversionError};
use crate::engine;
use crate::error::EngineError;
use crate::input::CalculationInput;
use crate::quantity::QuantityClass;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("계산 오류: {0}")]
    Engine(#[from] EngineError),
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
    #[error("시나리오 TOML 파싱 오류: {0}")]
    ScenarioToml(#[from] toml::de::Error),
    #[error("JSON 오류: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML 출력 오류: {0}")]
    RenderToml(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Toml,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Toml => OutputFormat::Toml,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "fuel_pathway_tea", version, about = "연료 생산 경로 기술·경제성 계산기")]
pub struct Cli {
    /// 설정 파일 경로. 없으면 기본값으로 생성한다.
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 시나리오 파일(.toml / .json)로 전체 계산을 수행한다.
    Calc {
        scenario: PathBuf,
        /// 최종 수치만 출력한다.
        #[arg(long)]
        bare: bool,
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        /// `_traceable` 항목을 생략한다.
        #[arg(long)]
        no_traces: bool,
    },
    /// 단위를 변환한다. 예: `convert capacity 500 kt/yr t/yr`
    Convert {
        class: QuantityClass,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: String,
        to: String,
    },
    /// 물리량별 등록 단위를 나열한다.
    Units { class: Option<QuantityClass> },
}

/// 시나리오 파일을 읽는다. 확장자가 `.json`이면 JSON, 그 외는 TOML로 해석한다.
pub fn load_scenario(path: &Path) -> Result<CalculationInput, AppError> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(toml::from_str(&content)?)
    }
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Toml => Ok(toml::to_string_pretty(value)?),
    }
}

/// 하위 명령을 실행하고 출력할 문자열을 돌려준다.
pub fn execute(command: &Command, cfg: &Config) -> Result<String, AppError> {
    match command {
        Command::Calc {
            scenario,
            bare,
            format,
            no_traces,
        } => {
            let input = load_scenario(scenario)?;
            let settings = cfg.engine_settings();
            let format = format.map(OutputFormat::from).unwrap_or(cfg.output.format);
            if *bare {
                let result = engine::calculate_bare(&input, &settings)?;
                return render(&result, format);
            }
            let result = engine::calculate(&input, &settings)?;
            if *no_traces || !cfg.output.include_traces {
                render(&result.without_traces(), format)
            } else {
                render(&result, format)
            }
        }
        Command::Convert {
            class,
            value,
            from,
            to,
        } => {
            let result = conversion::normalize(*value, from, to, *class)?;
            Ok(format!("{value} {from} = {result} {to}"))
        }
        Command::Units { class } => {
            let reg = conversion::registry();
            let classes: Vec<QuantityClass> = match class {
                Some(c) => vec![*c],
                None => QuantityClass::ALL.to_vec(),
            };
            let lines: Vec<String> = classes
                .into_iter()
                .map(|c| format!("{c}: {}", reg.supported_units(c).join(", ")))
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

/// 설정을 로드한 뒤 명령을 실행해 결과를 표준출력에 쓴다.
pub fn run(cli: &Cli) -> Result<(), AppError> {
    let cfg = config::load_or_default(&cli.config)?;
    let output = execute(&cli.command, &cfg)?;
    println!("{output}");
    Ok(())
}
