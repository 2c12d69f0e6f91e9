//! 심볼 단위 CSV 내보내기.

use qsource_data::EodPriceRepository;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 심볼 하나의 내보내기 결과 상태.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// 파일 기록 완료
    Success { rows: usize },
    /// 출력 파일이 이미 존재하여 건너뜀
    Skipped,
    /// 조회 또는 기록 실패 (메시지 포함)
    Failed(String),
}

/// 심볼과 결과 상태 쌍. 집계(summary)에서만 소비됩니다.
#[derive(Debug, Clone)]
pub struct TaskResult {
    pub symbol: String,
    pub outcome: ExportOutcome,
}

/// 심볼의 출력 파일 경로 계산.
pub fn output_path(out_dir: &Path, symbol: &str) -> PathBuf {
    out_dir.join(format!("{symbol}.csv"))
}

/// 한 심볼의 전체 행을 CSV 파일로 내보냅니다.
///
/// 실패는 `Failed`로 반환되며 절대 전파되지 않습니다. 병렬 실행에서
/// 한 심볼의 실패가 다른 심볼 작업을 중단시켜서는 안 됩니다.
pub async fn export_symbol(
    repo: &EodPriceRepository,
    symbol: String,
    out_dir: &Path,
    skip_exists: bool,
) -> TaskResult {
    let path = output_path(out_dir, &symbol);

    // 기존 파일이 있으면 DB를 건드리지 않고 건너뜀
    if skip_exists && path.is_file() {
        debug!(symbol = %symbol, path = %path.display(), "출력 파일 존재, 건너뜀");
        return TaskResult {
            symbol,
            outcome: ExportOutcome::Skipped,
        };
    }

    let outcome = match write_symbol_csv(repo, &symbol, &path).await {
        Ok(rows) => ExportOutcome::Success { rows },
        Err(e) => ExportOutcome::Failed(e.to_string()),
    };

    TaskResult { symbol, outcome }
}

/// 조회 후 CSV 기록. 실패는 호출자가 상태로 변환합니다.
async fn write_symbol_csv(
    repo: &EodPriceRepository,
    symbol: &str,
    path: &Path,
) -> qsource_data::Result<usize> {
    let rowset = repo.fetch_symbol_rows(symbol).await?;

    let file = File::create(path)?;
    rowset.write_csv(BufWriter::new(file))?;

    Ok(rowset.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsource_data::Database;
    use sqlx::postgres::PgPoolOptions;

    /// 네트워크 연결 없이 만들어지는 풀 (사용 시점에만 연결 시도).
    fn lazy_repo(url: &str) -> EodPriceRepository {
        let pool = PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy(url)
            .unwrap();
        EodPriceRepository::new(Database::from_pool(pool), "final_a_stock_eod_price")
    }

    #[test]
    fn test_output_path() {
        let path = output_path(Path::new("qlib_source"), "SH600000");
        assert_eq!(path, PathBuf::from("qlib_source/SH600000.csv"));
    }

    #[tokio::test]
    async fn test_existing_file_skipped_without_db_access() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("SH600000.csv"), "symbol\nSH600000\n").unwrap();

        // 풀은 lazy이므로 skip 경로가 DB에 닿으면 여기서 실패했을 것
        let repo = lazy_repo("postgresql://127.0.0.1:1/unreachable");
        let result =
            export_symbol(&repo, "SH600000".to_string(), dir.path(), true).await;

        assert_eq!(result.outcome, ExportOutcome::Skipped);
        assert_eq!(result.symbol, "SH600000");
    }

    #[tokio::test]
    async fn test_query_failure_returns_failed_outcome() {
        let dir = tempfile::tempdir().unwrap();

        let repo = lazy_repo("postgresql://127.0.0.1:1/unreachable");
        let result = export_symbol(&repo, "SH600000".to_string(), dir.path(), true).await;

        match result.outcome {
            ExportOutcome::Failed(msg) => assert!(!msg.is_empty()),
            other => panic!("expected Failed, got {:?}", other),
        }
        // 실패한 심볼은 출력 파일을 남기지 않음
        assert!(!dir.path().join("SH600000.csv").exists());
    }
}
