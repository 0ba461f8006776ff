//! 진입 셋업 검증 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 셋업 파일 종합 분석
//! entry-audit analyze -i setup.toml
//!
//! # 점수/모순점을 JSON으로 출력
//! entry-audit analyze -i setup.toml --json
//!
//! # 일봉 캔들에서 지지/저항 계산
//! entry-audit levels -i candles.toml -t daily
//!
//! # 포지션 리스크/강제청산가 계산
//! entry-audit margin -c BTC -d long --capital 1000 --leverage 10 --ratio 10 --entry 50000
//! ```

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::error;

use audit_cli::{
    run_analyze, run_levels, run_margin, AnalyzeConfig, LevelsConfig, MarginConfig,
};
use audit_core::logging::init_logging_from_env;

#[derive(Parser)]
#[command(name = "entry-audit")]
#[command(about = "진입 셋업 검증 CLI - 레버리지 진입 논리 일관성 분석 도구", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 셋업 파일을 평가하여 종합 일관성 점수와 모순점 보고서 출력
    Analyze {
        /// 셋업 입력 파일 경로 (TOML)
        #[arg(short, long)]
        input: PathBuf,

        /// 보고서 대신 JSON 결과 출력
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// 캔들 파일에서 지지/저항 수준 계산
    Levels {
        /// 캔들 입력 파일 경로 (TOML)
        #[arg(short, long)]
        input: PathBuf,

        /// 타임프레임 (daily: 일봉, 4h: 4시간봉)
        #[arg(short, long, default_value = "daily")]
        timeframe: String,
    },

    /// 포지션 리스크 계수/증거금/강제청산가 계산
    Margin {
        /// 거래 통화 (예: BTC, ETH, SOL)
        #[arg(short, long)]
        currency: String,

        /// 진입 방향 (long 또는 short)
        #[arg(short, long)]
        direction: String,

        /// 총 자본 (USDT)
        #[arg(long)]
        capital: Decimal,

        /// 레버리지 배수 (최소 1x)
        #[arg(long)]
        leverage: Decimal,

        /// 포지션 비율 (0~100, %)
        #[arg(long)]
        ratio: Decimal,

        /// 진입 가격 (USDT)
        #[arg(long)]
        entry: Decimal,
    },
}

fn main() {
    if let Err(e) = init_logging_from_env() {
        eprintln!("로깅 초기화 실패: {}", e);
    }

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Analyze { input, json } => run_analyze(AnalyzeConfig { input, json }),
        Commands::Levels { input, timeframe } => run_levels(LevelsConfig { input, timeframe }),
        Commands::Margin {
            currency,
            direction,
            capital,
            leverage,
            ratio,
            entry,
        } => run_margin(MarginConfig {
            currency,
            direction,
            capital,
            leverage,
            ratio,
            entry,
        }),
    };

    if let Err(e) = result {
        error!("명령 실행 실패: {:#}", e);
        std::process::exit(1);
    }
}
