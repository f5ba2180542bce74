use std::sync::Arc;

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::database::models::AttendanceRecord;
use crate::error::AttendanceError;
use crate::ports::{AttendanceRepository, EmployeeRepository};
use crate::utils::interval::shifts_overlap;

/// Single entry point for creating or updating an attendance record.
///
/// Each `upsert` runs one synchronous pipeline: shape check, employee
/// existence, zero-duration check, overlap scan, memo normalization, then
/// persistence. The existence check, overlap scan, and save are separate
/// repository round trips with no transactional envelope; this tool assumes
/// a single active writer.
pub struct AttendanceService {
    repo: Arc<dyn AttendanceRepository>,
    employees: Arc<dyn EmployeeRepository>,
    /// When false the overlap scan is skipped entirely and the caller owns
    /// conflict warnings (advisory mode). Pinned at construction.
    enforce_no_overlap: bool,
}

impl AttendanceService {
    pub fn new(
        repo: Arc<dyn AttendanceRepository>,
        employees: Arc<dyn EmployeeRepository>,
        enforce_no_overlap: bool,
    ) -> Self {
        Self {
            repo,
            employees,
            enforce_no_overlap,
        }
    }

    pub async fn upsert(
        &self,
        record: AttendanceRecord,
    ) -> Result<AttendanceRecord, AttendanceError> {
        if record.employee_id == 0 {
            return Err(AttendanceError::MissingField("employee_id"));
        }

        if self.employees.find_by_id(record.employee_id).await?.is_none() {
            return Err(AttendanceError::UnknownEmployee(record.employee_id));
        }

        if let (Some(clock_in), Some(clock_out)) = (record.clock_in, record.clock_out) {
            if clock_in == clock_out {
                return Err(AttendanceError::ZeroDurationShift);
            }

            if self.enforce_no_overlap {
                self.check_no_overlap(&record).await?;
            }
        }

        let record = AttendanceRecord {
            memo: normalize_memo(record.memo),
            ..record
        };

        debug!(
            employee_id = record.employee_id,
            work_date = %record.work_date,
            updating = record.id.is_some(),
            "saving attendance record"
        );
        Ok(self.repo.save(record).await?)
    }

    /// Rejects the candidate when any neighbor's shift overlaps it. Only
    /// records within one day of the candidate's work date can conflict; a
    /// shift never spans more than 24 hours.
    async fn check_no_overlap(&self, record: &AttendanceRecord) -> Result<(), AttendanceError> {
        let (clock_in, clock_out) = match (record.clock_in, record.clock_out) {
            (Some(i), Some(o)) => (i, o),
            _ => return Ok(()),
        };

        let from = record.work_date - Days::new(1);
        let to = record.work_date + Days::new(1);
        let around = self
            .repo
            .find_by_employee_and_range(record.employee_id, from, to)
            .await?;

        for existing in around {
            // A record never conflicts with its own stored version.
            if record.id.is_some() && record.id == existing.id {
                continue;
            }
            let (ex_in, ex_out) = match (existing.clock_in, existing.clock_out) {
                (Some(i), Some(o)) => (i, o),
                _ => continue,
            };

            if shifts_overlap(
                record.work_date,
                clock_in,
                clock_out,
                existing.work_date,
                ex_in,
                ex_out,
            ) {
                return Err(AttendanceError::OverlappingShift {
                    work_date: existing.work_date,
                    clock_in: ex_in,
                    clock_out: ex_out,
                });
            }
        }

        Ok(())
    }

    // Read-through accessors for the views; no validation re-run.

    pub async fn find(&self, id: i64) -> Result<Option<AttendanceRecord>, AttendanceError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    pub async fn by_date(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        Ok(self.repo.find_by_date(date).await?)
    }

    pub async fn by_month(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        Ok(self.repo.find_by_month(year, month).await?)
    }

    pub async fn by_employee_range(
        &self,
        employee_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        Ok(self
            .repo
            .find_by_employee_and_range(employee_id, from, to)
            .await?)
    }

    /// Single-day convenience used by the entry-form saver.
    pub async fn by_employee_date(
        &self,
        employee_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        Ok(self
            .repo
            .find_by_employee_and_range(employee_id, date, date)
            .await?)
    }

    pub async fn remove(&self, id: i64) -> Result<bool, AttendanceError> {
        Ok(self.repo.delete_by_id(id).await?)
    }
}

fn normalize_memo(memo: Option<String>) -> Option<String> {
    memo.and_then(|m| {
        let trimmed = m.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
