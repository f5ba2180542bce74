use anyhow::Result;
use chrono::{NaiveTime, Timelike};

pub fn parse_time_string(time_str: &str) -> Result<NaiveTime> {
    let time_str = time_str.trim();

    if let Ok(time) = NaiveTime::parse_from_str(time_str, "%H:%M") {
        return Ok(time);
    }

    if let Ok(time) = NaiveTime::parse_from_str(time_str, "%H:%M:%S") {
        return Ok(time);
    }

    Err(anyhow::anyhow!("Invalid time format. Use HH:MM or HH:MM:SS"))
}

/// Shift length in minutes, counting past midnight when the clock-out is
/// numerically before the clock-in.
pub fn duration_minutes(clock_in: NaiveTime, clock_out: NaiveTime) -> i32 {
    let a = (clock_in.hour() * 60 + clock_in.minute()) as i32;
    let b = (clock_out.hour() * 60 + clock_out.minute()) as i32;
    let mut diff = b - a;
    if diff < 0 {
        diff += 24 * 60;
    }
    diff
}

/// "HH:MM" rendering of a shift's length, for confirmation prompts.
pub fn pretty_duration(clock_in: NaiveTime, clock_out: NaiveTime) -> String {
    let minutes = duration_minutes(clock_in, clock_out);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

pub fn format_duration_minutes(minutes: i32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}
