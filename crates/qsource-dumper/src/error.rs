//! 에러 타입 정의.

use std::fmt;

/// Dumper 에러 타입
#[derive(Debug)]
pub enum DumperError {
    /// 데이터베이스 에러
    Database(sqlx::Error),
    /// 데이터 계층 에러
    Data(qsource_data::DataError),
    /// 설정 에러
    Config(String),
    /// 파일 입출력 에러
    Io(std::io::Error),
}

impl fmt::Display for DumperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database(e) => write!(f, "Database error: {}", e),
            Self::Data(e) => write!(f, "Data error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Io(e) => write!(f, "Io error: {}", e),
        }
    }
}

impl std::error::Error for DumperError {}

impl From<sqlx::Error> for DumperError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

impl From<qsource_data::DataError> for DumperError {
    fn from(err: qsource_data::DataError) -> Self {
        Self::Data(err)
    }
}

impl From<std::env::VarError> for DumperError {
    fn from(err: std::env::VarError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for DumperError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, DumperError>;
