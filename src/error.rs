use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Per-call validation failures raised by the save pipeline. Each rejects
/// the whole save before anything is persisted; none is fatal to the
/// process.
#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("required field is missing: {0}")]
    MissingField(&'static str),

    #[error("no employee exists with id {0}")]
    UnknownEmployee(i64),

    #[error("clock-in and clock-out must differ")]
    ZeroDurationShift,

    #[error("shift overlaps an existing record ({work_date} {clock_in}~{clock_out})")]
    OverlappingShift {
        work_date: NaiveDate,
        clock_in: NaiveTime,
        clock_out: NaiveTime,
    },

    #[error("save cancelled: {0}")]
    Cancelled(String),

    #[error(transparent)]
    Repo(#[from] anyhow::Error),
}
