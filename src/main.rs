use clap::Parser;
use fuel_pathway_tea::app::{self, Cli};

/// 프로그램의 엔트리 포인트. 로거를 설치하고 CLI 명령을 실행한다.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    if let Err(err) = app::run(&cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}
