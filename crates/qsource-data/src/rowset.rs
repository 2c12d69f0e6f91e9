//! 쿼리 시점에 스키마가 결정되는 행 집합.
//!
//! 헤더는 쿼리가 반환한 컬럼 집합 그대로이며, 값은 DB 타입별로 문자열로
//! 렌더링됩니다. SQL `NULL`은 빈 필드로 기록됩니다.

use crate::error::{DataError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};
use std::io::Write;

/// 컬럼 이름 목록과 렌더링된 레코드들로 이루어진 테이블 형태 결과.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    columns: Vec<String>,
    records: Vec<Vec<Option<String>>>,
}

impl RowSet {
    /// 컬럼 이름만 가진 빈 RowSet 생성.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    /// 쿼리 결과 행들에서 RowSet 생성.
    ///
    /// 스키마는 첫 행의 컬럼 메타데이터에서 가져옵니다. 결과가 비어 있으면
    /// 컬럼 정보가 없으므로 빈 RowSet을 반환합니다.
    pub fn from_pg_rows(rows: &[PgRow]) -> Result<Self> {
        let first = match rows.first() {
            Some(first) => first,
            None => return Ok(Self::default()),
        };

        let columns: Vec<String> = first
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let mut record = Vec::with_capacity(columns.len());
            for idx in 0..columns.len() {
                record.push(render_value(row, idx)?);
            }
            records.push(record);
        }

        Ok(Self { columns, records })
    }

    /// 레코드 하나 추가. 컬럼 수가 맞지 않으면 에러.
    pub fn push_record(&mut self, record: Vec<Option<String>>) -> Result<()> {
        if record.len() != self.columns.len() {
            return Err(DataError::InvalidData(format!(
                "record has {} fields, expected {}",
                record.len(),
                self.columns.len()
            )));
        }
        self.records.push(record);
        Ok(())
    }

    /// 컬럼 이름 목록.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 레코드 수.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 레코드가 없으면 true.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 헤더 한 줄 + 레코드당 한 줄로 CSV 기록. 인덱스 컬럼은 없습니다.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        if !self.columns.is_empty() {
            wtr.write_record(&self.columns)?;
        }

        for record in &self.records {
            wtr.write_record(record.iter().map(|v| v.as_deref().unwrap_or("")))?;
        }

        wtr.flush()?;
        Ok(())
    }
}

/// 한 컬럼 값을 DB 타입에 따라 문자열로 렌더링. NULL은 None.
fn render_value(row: &PgRow, idx: usize) -> Result<Option<String>> {
    let column = &row.columns()[idx];
    let type_name = column.type_info().name();

    let raw = row
        .try_get_raw(idx)
        .map_err(|e| DataError::DecodeError(format!("column {}: {}", column.name(), e)))?;
    if raw.is_null() {
        return Ok(None);
    }

    let rendered = match type_name {
        "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" => decode::<String>(row, idx)?,
        "BOOL" => decode::<bool>(row, idx)?.to_string(),
        "INT2" => decode::<i16>(row, idx)?.to_string(),
        "INT4" => decode::<i32>(row, idx)?.to_string(),
        "INT8" => decode::<i64>(row, idx)?.to_string(),
        "FLOAT4" => decode::<f32>(row, idx)?.to_string(),
        "FLOAT8" => decode::<f64>(row, idx)?.to_string(),
        "NUMERIC" => decode::<Decimal>(row, idx)?.to_string(),
        "DATE" => decode::<NaiveDate>(row, idx)?.to_string(),
        "TIMESTAMP" => decode::<NaiveDateTime>(row, idx)?.to_string(),
        "TIMESTAMPTZ" => decode::<DateTime<Utc>>(row, idx)?.to_rfc3339(),
        other => {
            return Err(DataError::DecodeError(format!(
                "unsupported column type {} for column {}",
                other,
                column.name()
            )))
        }
    };

    Ok(Some(rendered))
}

fn decode<'r, T>(row: &'r PgRow, idx: usize) -> Result<T>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get::<T, _>(idx)
        .map_err(|e| DataError::DecodeError(format!("column {}: {}", row.columns()[idx].name(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RowSet {
        let mut rs = RowSet::new(vec![
            "symbol".to_string(),
            "amount".to_string(),
            "volume".to_string(),
            "vwap".to_string(),
        ]);
        rs.push_record(vec![
            Some("SH600000".to_string()),
            Some("100".to_string()),
            Some("10".to_string()),
            Some("100".to_string()),
        ])
        .unwrap();
        rs.push_record(vec![
            Some("SH600000".to_string()),
            Some("50".to_string()),
            Some("0".to_string()),
            None,
        ])
        .unwrap();
        rs
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let rs = sample();
        let mut buf = Vec::new();
        rs.write_csv(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "symbol,amount,volume,vwap");
        assert_eq!(lines[1], "SH600000,100,10,100");
    }

    #[test]
    fn test_null_renders_empty_field() {
        let rs = sample();
        let mut buf = Vec::new();
        rs.write_csv(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().nth(2).unwrap(), "SH600000,50,0,");
    }

    #[test]
    fn test_field_with_delimiter_is_quoted() {
        let mut rs = RowSet::new(vec!["symbol".to_string(), "name".to_string()]);
        rs.push_record(vec![
            Some("SH600000".to_string()),
            Some("Pudong, Development Bank".to_string()),
        ])
        .unwrap();

        let mut buf = Vec::new();
        rs.write_csv(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text.lines().nth(1).unwrap(),
            "SH600000,\"Pudong, Development Bank\""
        );
    }

    #[test]
    fn test_push_record_field_count_mismatch() {
        let mut rs = RowSet::new(vec!["symbol".to_string(), "amount".to_string()]);
        let result = rs.push_record(vec![Some("SH600000".to_string())]);
        assert!(matches!(result, Err(DataError::InvalidData(_))));
    }

    #[test]
    fn test_empty_rowset_writes_nothing() {
        let rs = RowSet::default();
        let mut buf = Vec::new();
        rs.write_csv(&mut buf).unwrap();
        assert!(buf.is_empty());
    }
}
