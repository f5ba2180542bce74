use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::database::models::AttendanceRecord;
use crate::ports::AttendanceRepository;

/// sqlx/SQLite adapter for the attendance port.
pub struct SqliteAttendanceRepository {
    pool: SqlitePool,
}

impl SqliteAttendanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &SqliteRow) -> AttendanceRecord {
    AttendanceRecord {
        id: Some(row.get("id")),
        employee_id: row.get("employee_id"),
        work_date: row.get("work_date"),
        clock_in: row.get("clock_in"),
        clock_out: row.get("clock_out"),
        memo: row.get("memo"),
    }
}

#[async_trait]
impl AttendanceRepository for SqliteAttendanceRepository {
    async fn save(&self, record: AttendanceRecord) -> Result<AttendanceRecord> {
        match record.id {
            None => {
                let result = sqlx::query(
                    "INSERT INTO attendance (employee_id, work_date, clock_in, clock_out, memo, updated_at)
                     VALUES (?, ?, ?, ?, ?, datetime('now'))",
                )
                .bind(record.employee_id)
                .bind(record.work_date)
                .bind(record.clock_in)
                .bind(record.clock_out)
                .bind(&record.memo)
                .execute(&self.pool)
                .await?;

                Ok(AttendanceRecord {
                    id: Some(result.last_insert_rowid()),
                    ..record
                })
            }
            Some(id) => {
                sqlx::query(
                    "UPDATE attendance
                     SET employee_id = ?, work_date = ?, clock_in = ?, clock_out = ?, memo = ?,
                         updated_at = datetime('now')
                     WHERE id = ?",
                )
                .bind(record.employee_id)
                .bind(record.work_date)
                .bind(record.clock_in)
                .bind(record.clock_out)
                .bind(&record.memo)
                .bind(id)
                .execute(&self.pool)
                .await?;

                Ok(record)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AttendanceRecord>> {
        let row = sqlx::query("SELECT * FROM attendance WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(map_row))
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        let rows = sqlx::query("SELECT * FROM attendance WHERE work_date = ? ORDER BY employee_id")
            .bind(date)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(map_row).collect())
    }

    async fn find_by_month(&self, year: i32, month: u32) -> Result<Vec<AttendanceRecord>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| anyhow::anyhow!("invalid month: {}-{}", year, month))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .expect("first of month is always valid");

        let rows = sqlx::query(
            "SELECT * FROM attendance WHERE work_date >= ? AND work_date < ?
             ORDER BY work_date, employee_id",
        )
        .bind(first)
        .bind(next)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row).collect())
    }

    async fn find_by_employee_and_range(
        &self,
        employee_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        let rows = sqlx::query(
            "SELECT * FROM attendance WHERE employee_id = ? AND work_date BETWEEN ? AND ?
             ORDER BY work_date",
        )
        .bind(employee_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row).collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
