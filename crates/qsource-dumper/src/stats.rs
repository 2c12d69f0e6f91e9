//! 덤프 통계 구조체.

use crate::export::{ExportOutcome, TaskResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 덤프 작업 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpStats {
    /// 총 시도 횟수
    pub total: usize,
    /// 성공 횟수
    pub success: usize,
    /// 에러 횟수
    pub errors: usize,
    /// 건너뛴 횟수 (출력 파일이 이미 존재)
    pub skipped: usize,
    /// 기록된 총 행 수
    pub total_rows: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl DumpStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 작업 결과 하나를 집계에 반영. 유일한 집계 경로이므로
    /// total == success + skipped + errors가 항상 성립합니다.
    pub fn record(&mut self, result: &TaskResult) {
        self.total += 1;
        match &result.outcome {
            ExportOutcome::Success { rows } => {
                self.success += 1;
                self.total_rows += rows;
            }
            ExportOutcome::Skipped => self.skipped += 1,
            ExportOutcome::Failed(_) => self.errors += 1,
        }
    }

    /// 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            total = self.total,
            success = self.success,
            errors = self.errors,
            skipped = self.skipped,
            total_rows = self.total_rows,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "덤프 완료"
        );
    }
}
