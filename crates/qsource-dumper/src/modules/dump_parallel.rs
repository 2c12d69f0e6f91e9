//! 병렬 덤프 모듈.

use crate::export::{self, ExportOutcome};
use crate::{DumpStats, DumperConfig, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use qsource_data::EodPriceRepository;
use std::time::Instant;

/// 심볼별 CSV 병렬 덤프.
///
/// 최대 `max_workers`개의 내보내기 작업이 동시에 실행되며, 완료는 도착
/// 순서로 수거됩니다. 심볼 조회는 fan-out 전에 끝나고, 한 심볼의 실패는
/// 남은 작업을 취소하지 않습니다.
pub async fn dump_parallel(
    repo: &EodPriceRepository,
    config: &DumperConfig,
    skip_exists: bool,
    max_workers: usize,
    symbols: Option<String>,
) -> Result<DumpStats> {
    let start = Instant::now();
    let mut stats = DumpStats::new();

    tracing::info!(table = repo.table(), max_workers, "병렬 덤프 시작");

    let target_symbols = super::dump::resolve_symbols(repo, symbols).await?;

    if target_symbols.is_empty() {
        tracing::warn!("덤프할 심볼이 없습니다");
        stats.elapsed = start.elapsed();
        return Ok(stats);
    }

    // 출력 디렉터리는 첫 쓰기 전에 준비되어야 함
    std::fs::create_dir_all(&config.out_dir)?;

    let pb = ProgressBar::new(target_symbols.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )
            .unwrap()
            .progress_chars("#>-"),
    );

    // 병렬 실행 (max_workers 제한: buffer_unordered 사용)
    let mut completions = stream::iter(
        target_symbols
            .into_iter()
            .map(|symbol| export::export_symbol(repo, symbol, &config.out_dir, skip_exists)),
    )
    .buffer_unordered(max_workers);

    while let Some(result) = completions.next().await {
        match &result.outcome {
            ExportOutcome::Success { rows } => {
                tracing::debug!(symbol = %result.symbol, rows = rows, "덤프 완료");
            }
            ExportOutcome::Skipped => {
                tracing::debug!(symbol = %result.symbol, "건너뜀");
            }
            ExportOutcome::Failed(msg) => {
                tracing::error!(symbol = %result.symbol, error = %msg, "덤프 실패");
            }
        }

        stats.record(&result);
        pb.inc(1);
    }

    pb.finish_with_message("Dump completed");

    stats.elapsed = start.elapsed();
    Ok(stats)
}
