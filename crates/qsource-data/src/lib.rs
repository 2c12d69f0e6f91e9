//! qlib source dump를 위한 데이터 접근 crate.
//!
//! PostgreSQL의 EOD 가격 테이블 조회와 CSV 직렬화를 제공합니다:
//! - 연결 풀 래퍼 (`Database`)
//! - 심볼 목록 조회 / 심볼별 필터 쿼리 (`EodPriceRepository`)
//! - 쿼리 시점 스키마 기반 행 집합 (`RowSet`)

pub mod error;
pub mod rowset;
pub mod storage;

pub use error::{DataError, Result};
pub use rowset::RowSet;
pub use storage::database::{Database, DatabaseConfig};
pub use storage::eod::EodPriceRepository;
