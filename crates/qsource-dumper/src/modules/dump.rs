//! 순차 덤프 모듈.

use crate::export::{self, ExportOutcome};
use crate::{DumpStats, DumperConfig, Result};
use qsource_data::EodPriceRepository;
use std::time::Instant;

/// 심볼별 CSV 순차 덤프
pub async fn dump(
    repo: &EodPriceRepository,
    config: &DumperConfig,
    skip_exists: bool,
    symbols: Option<String>,
) -> Result<DumpStats> {
    let start = Instant::now();
    let mut stats = DumpStats::new();

    tracing::info!(table = repo.table(), "순차 덤프 시작");

    let target_symbols = resolve_symbols(repo, symbols).await?;

    if target_symbols.is_empty() {
        tracing::warn!("덤프할 심볼이 없습니다");
        stats.elapsed = start.elapsed();
        return Ok(stats);
    }

    // 출력 디렉터리는 첫 쓰기 전에 준비되어야 함
    std::fs::create_dir_all(&config.out_dir)?;

    let total = target_symbols.len();

    for (idx, symbol) in target_symbols.into_iter().enumerate() {
        tracing::debug!(
            symbol = %symbol,
            progress = format!("{}/{}", idx + 1, total),
            "덤프 시작"
        );

        let result = export::export_symbol(repo, symbol, &config.out_dir, skip_exists).await;

        match &result.outcome {
            ExportOutcome::Success { rows } => {
                tracing::info!(symbol = %result.symbol, rows = rows, "덤프 완료");
            }
            ExportOutcome::Skipped => {
                tracing::debug!(symbol = %result.symbol, "건너뜀");
            }
            ExportOutcome::Failed(msg) => {
                tracing::error!(symbol = %result.symbol, error = %msg, "덤프 실패");
            }
        }

        stats.record(&result);
    }

    stats.elapsed = start.elapsed();
    Ok(stats)
}

/// 덤프할 심볼 목록 결정 (옵션 지정 시 파싱, 아니면 DB에서 조회)
pub(crate) async fn resolve_symbols(
    repo: &EodPriceRepository,
    symbols: Option<String>,
) -> Result<Vec<String>> {
    match symbols {
        Some(ref s) => {
            let syms = parse_symbol_list(s);
            tracing::info!(count = syms.len(), "특정 심볼 덤프");
            Ok(syms)
        }
        None => {
            let syms = repo.list_symbols().await?;
            tracing::info!(count = syms.len(), "심볼 조회 완료");
            Ok(syms)
        }
    }
}

/// 쉼표로 구분된 심볼 목록 파싱
fn parse_symbol_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbol_list() {
        assert_eq!(
            parse_symbol_list("SH600000, SZ000001,SH600036"),
            vec!["SH600000", "SZ000001", "SH600036"]
        );
    }

    #[test]
    fn test_parse_symbol_list_ignores_empty_entries() {
        assert_eq!(parse_symbol_list("SH600000,,SZ000001,"), vec!["SH600000", "SZ000001"]);
        assert!(parse_symbol_list("").is_empty());
    }
}
