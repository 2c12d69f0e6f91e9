//! EOD 가격 테이블 repository.

use crate::error::Result;
use crate::rowset::RowSet;
use crate::storage::database::Database;
use tracing::debug;

/// 심볼별 EOD 가격 데이터 repository.
pub struct EodPriceRepository {
    db: Database,
    table: String,
}

impl EodPriceRepository {
    /// 테이블 이름은 설정에서 옵니다 (사용자 입력 아님).
    pub fn new(db: Database, table: impl Into<String>) -> Self {
        Self {
            db,
            table: table.into(),
        }
    }

    /// 소스 테이블 이름.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// 테이블의 고유 심볼 목록을 조회합니다. 순서는 보장되지 않습니다.
    pub async fn list_symbols(&self) -> Result<Vec<String>> {
        let sql = format!("SELECT DISTINCT symbol FROM {}", self.table);
        let rows: Vec<(String,)> = sqlx::query_as(&sql).fetch_all(self.db.pool()).await?;

        let symbols: Vec<String> = rows.into_iter().map(|(s,)| s).collect();
        debug!(count = symbols.len(), "Distinct symbols fetched");
        Ok(symbols)
    }

    /// 한 심볼의 전체 행을 vwap 파생 컬럼과 함께 조회합니다.
    ///
    /// 심볼은 바인드 파라미터로 전달됩니다. volume이 0인 행의 vwap은
    /// NULLIF에 의해 SQL NULL이 됩니다.
    pub async fn fetch_symbol_rows(&self, symbol: &str) -> Result<RowSet> {
        let sql = format!(
            "SELECT *, amount / NULLIF(volume, 0) * 10 AS vwap FROM {} WHERE symbol = $1",
            self.table
        );
        let rows = sqlx::query(&sql)
            .bind(symbol)
            .fetch_all(self.db.pool())
            .await?;

        RowSet::from_pg_rows(&rows)
    }
}
