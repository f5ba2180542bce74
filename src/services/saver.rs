use chrono::{Days, NaiveDate, NaiveTime};
use tracing::debug;

use crate::database::models::AttendanceRecord;
use crate::error::AttendanceError;
use crate::services::attendance::AttendanceService;
use crate::utils::interval::shifts_overlap;
use crate::utils::time::pretty_duration;

/// How the entry form asks the operator a yes/no question. Headless callers
/// can use [`AlwaysConfirm`].
pub trait ConfirmPrompt {
    fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Answers yes to every prompt.
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&self, _title: &str, _message: &str) -> bool {
        true
    }
}

/// Entry-form save flow for a service running in advisory mode: the overlap
/// scan happens here, and the operator decides whether to save anyway. The
/// overnight interpretation (clock-out at or before clock-in means next-day
/// clock-out) is also confirmed here before anything is persisted.
pub struct AttendanceSaver<'a> {
    service: &'a AttendanceService,
    prompt: &'a dyn ConfirmPrompt,
}

impl<'a> AttendanceSaver<'a> {
    pub fn new(service: &'a AttendanceService, prompt: &'a dyn ConfirmPrompt) -> Self {
        Self { service, prompt }
    }

    pub async fn save(
        &self,
        employee_id: i64,
        work_date: NaiveDate,
        clock_in: NaiveTime,
        clock_out: NaiveTime,
        memo: Option<String>,
    ) -> Result<AttendanceRecord, AttendanceError> {
        if employee_id == 0 {
            return Err(AttendanceError::MissingField("employee_id"));
        }
        if clock_in == clock_out {
            return Err(AttendanceError::ZeroDurationShift);
        }

        if clock_out < clock_in {
            let message = format!(
                "Clock-out is earlier than clock-in.\n\
                 Treat it as a next-day clock-out?\n\
                 ({} -> {}, total {})",
                clock_in.format("%H:%M"),
                clock_out.format("%H:%M"),
                pretty_duration(clock_in, clock_out),
            );
            if !self.prompt.confirm("Next-day clock-out", &message) {
                return Err(AttendanceError::Cancelled(
                    "next-day clock-out declined".into(),
                ));
            }
        }

        let conflicts = self
            .scan_conflicts(employee_id, work_date, clock_in, clock_out)
            .await?;

        if !conflicts.is_empty() {
            let mut message =
                String::from("The following records overlap this shift. Save anyway?\n\n");
            for c in &conflicts {
                message.push_str(&format!(
                    "- [{}] {} ~ {}",
                    c.work_date,
                    c.clock_in.map(|t| t.format("%H:%M").to_string()).unwrap_or_default(),
                    c.clock_out.map(|t| t.format("%H:%M").to_string()).unwrap_or_default(),
                ));
                if let Some(memo) = c.memo.as_deref() {
                    message.push_str(&format!(" ({})", memo));
                }
                message.push('\n');
            }
            message.push_str("\nAnswering yes saves the shift alongside the overlapping ones.");

            if !self.prompt.confirm("Overlapping records", &message) {
                return Err(AttendanceError::Cancelled(
                    "overlapping records declined".into(),
                ));
            }
            debug!(employee_id, %work_date, conflicts = conflicts.len(), "overlap overridden by operator");
        }

        self.service
            .upsert(AttendanceRecord {
                id: None,
                employee_id,
                work_date,
                clock_in: Some(clock_in),
                clock_out: Some(clock_out),
                memo,
            })
            .await
    }

    /// Existing complete shifts that would overlap the proposed one. Looks at
    /// the work date itself and the previous day, so an overnight record that
    /// spills into today is caught.
    pub async fn scan_conflicts(
        &self,
        employee_id: i64,
        work_date: NaiveDate,
        clock_in: NaiveTime,
        clock_out: NaiveTime,
    ) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        let prev = work_date - Days::new(1);
        let neighbors = self
            .service
            .by_employee_range(employee_id, prev, work_date)
            .await?;

        let conflicts = neighbors
            .into_iter()
            .filter(|existing| match (existing.clock_in, existing.clock_out) {
                (Some(ex_in), Some(ex_out)) => shifts_overlap(
                    work_date,
                    clock_in,
                    clock_out,
                    existing.work_date,
                    ex_in,
                    ex_out,
                ),
                _ => false,
            })
            .collect();

        Ok(conflicts)
    }
}
