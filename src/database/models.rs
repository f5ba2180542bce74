use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One recorded shift. `id` is None until the record is persisted; a Some id
/// marks an update target. A record may carry zero, one, or both clock
/// times; only complete shifts take part in overlap detection.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: Option<i64>,
    pub employee_id: i64,
    pub work_date: NaiveDate,
    pub clock_in: Option<NaiveTime>,
    pub clock_out: Option<NaiveTime>,
    pub memo: Option<String>,
}

impl AttendanceRecord {
    pub fn is_complete(&self) -> bool {
        self.clock_in.is_some() && self.clock_out.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Option<i64>,
    pub name: String,
    pub rank: Option<Rank>,
    pub rrn: Option<String>,
    pub phone: Option<String>,
    pub hourly_wage: Option<i64>,
    pub bank: Option<String>,
    pub account: Option<String>,
    pub address: Option<String>,
    pub contract_date: Option<NaiveDate>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Owner,
    FullTime,
    PartTime,
    Trainee,
    Other,
}

impl Rank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Owner => "owner",
            Rank::FullTime => "full_time",
            Rank::PartTime => "part_time",
            Rank::Trainee => "trainee",
            Rank::Other => "other",
        }
    }

    /// Tolerant of unknown labels from older database rows.
    pub fn from_db(s: &str) -> Option<Rank> {
        match s.trim() {
            "" => None,
            "owner" => Some(Rank::Owner),
            "full_time" => Some(Rank::FullTime),
            "part_time" => Some(Rank::PartTime),
            "trainee" => Some(Rank::Trainee),
            _ => Some(Rank::Other),
        }
    }
}
