//! 덤프 실행 모듈.

pub mod dump;
pub mod dump_parallel;

pub use dump::dump;
pub use dump_parallel::dump_parallel;
