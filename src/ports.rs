use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::database::models::{AttendanceRecord, Employee};

/// Persistence capability for attendance records. The service layer depends
/// only on this contract; production wires it to SQLite, tests to in-memory
/// fakes.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Inserts when `id` is None (assigning a fresh id), updates otherwise.
    /// Returns the persisted record.
    async fn save(&self, record: AttendanceRecord) -> Result<AttendanceRecord>;

    async fn find_by_id(&self, id: i64) -> Result<Option<AttendanceRecord>>;

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>>;

    async fn find_by_month(&self, year: i32, month: u32) -> Result<Vec<AttendanceRecord>>;

    /// Inclusive date-range query per employee; the overlap scan uses this
    /// with `[work_date - 1, work_date + 1]`.
    async fn find_by_employee_and_range(
        &self,
        employee_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>>;

    async fn delete_by_id(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn save(&self, employee: Employee) -> Result<Employee>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>>;

    async fn find_all(&self) -> Result<Vec<Employee>>;

    async fn search_by_name(&self, name_like: &str) -> Result<Vec<Employee>>;

    async fn delete_by_id(&self, id: i64) -> Result<bool>;
}
