//! 환경변수 기반 설정 모듈.

use crate::Result;
use std::path::PathBuf;

/// Dumper 전체 설정
#[derive(Debug, Clone)]
pub struct DumperConfig {
    /// 데이터베이스 URL
    pub database_url: String,
    /// 출력 디렉터리
    pub out_dir: PathBuf,
    /// 소스 테이블 이름
    pub table: String,
    /// 풀 여유 커넥션 수 (워커 수에 더해짐)
    pub pool_headroom: u32,
}

impl DumperConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL").map_err(|_| {
            crate::error::DumperError::Config(
                "DATABASE_URL 환경변수가 설정되지 않았습니다".to_string(),
            )
        })?;

        Ok(Self {
            database_url,
            out_dir: PathBuf::from(env_var_or("QSOURCE_OUT_DIR", "qlib_source")),
            table: env_var_or("QSOURCE_TABLE", "final_a_stock_eod_price"),
            pool_headroom: env_var_parse("QSOURCE_POOL_HEADROOM", 2),
        })
    }
}

/// 환경변수 값 반환 (없으면 기본값)
fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_parse_default_when_unset() {
        assert_eq!(env_var_parse("QSOURCE_TEST_UNSET_KEY_7731", 42u32), 42);
    }

    #[test]
    fn test_env_var_or_default_when_unset() {
        assert_eq!(
            env_var_or("QSOURCE_TEST_UNSET_KEY_7732", "qlib_source"),
            "qlib_source"
        );
    }
}
