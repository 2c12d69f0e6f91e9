//! Standalone per-symbol dump CLI.

use clap::{ArgAction, Parser, Subcommand};
use qsource_data::{Database, DatabaseConfig, EodPriceRepository};
use qsource_dumper::{modules, DumperConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "qsource-dumper")]
#[command(about = "Qsource per-symbol CSV dumper for qlib", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 심볼별 CSV 순차 덤프
    Dump {
        /// 기존 출력 파일이 있으면 건너뛰기
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        skip_exists: bool,

        /// 특정 심볼만 덤프 (쉼표로 구분, 예: "SH600000,SZ000001")
        #[arg(long)]
        symbols: Option<String>,
    },

    /// 심볼별 CSV 병렬 덤프 (워커 풀)
    DumpParallel {
        /// 기존 출력 파일이 있으면 건너뛰기
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        skip_exists: bool,

        /// 동시 워커 수
        #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u32).range(1..))]
        max_workers: u32,

        /// 특정 심볼만 덤프 (쉼표로 구분)
        #[arg(long)]
        symbols: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("qsource_dumper={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Qsource dumper 시작");

    // 설정 로드
    let config = DumperConfig::from_env()?;
    tracing::debug!(
        out_dir = %config.out_dir.display(),
        table = %config.table,
        "설정 로드 완료"
    );

    // 워커마다 커넥션을 확보할 수 있도록 풀 크기 결정
    let workers = match &cli.command {
        Commands::DumpParallel { max_workers, .. } => *max_workers,
        Commands::Dump { .. } => 1,
    };
    let db_config = DatabaseConfig::sized_for_workers(
        config.database_url.clone(),
        workers,
        config.pool_headroom,
    );

    // DB 연결
    let db = Database::connect(&db_config).await?;
    tracing::info!("데이터베이스 연결 성공");

    let repo = EodPriceRepository::new(db.clone(), config.table.clone());

    // 명령 실행
    let run_result = match cli.command {
        Commands::Dump {
            skip_exists,
            symbols,
        } => modules::dump(&repo, &config, skip_exists, symbols)
            .await
            .map(|stats| (stats, "순차 덤프")),
        Commands::DumpParallel {
            skip_exists,
            max_workers,
            symbols,
        } => modules::dump_parallel(&repo, &config, skip_exists, max_workers as usize, symbols)
            .await
            .map(|stats| (stats, "병렬 덤프")),
    };

    // 실행이 실패해도 풀이 들고 있는 커넥션은 해제
    db.close().await;

    let (stats, operation) = run_result?;
    stats.log_summary(operation);

    tracing::info!("Qsource dumper 종료");

    Ok(())
}
