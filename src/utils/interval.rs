use chrono::{NaiveDate, NaiveTime, Timelike};

/// Half-open minute interval `[start, end)` relative to midnight of a work
/// date. An overnight shift ends past 1440.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: i32,
    pub end: i32,
}

fn minutes_of(t: NaiveTime) -> i32 {
    (t.hour() * 60 + t.minute()) as i32
}

/// Normalizes a clock-in/clock-out pair into minutes since midnight.
///
/// When the clock-out is numerically at or before the clock-in, the shift is
/// treated as ending the following day and the end is pushed out by 24 hours.
/// Equal endpoints never reach this function; the validator rejects them as
/// zero-duration before building an interval.
pub fn shift_interval(clock_in: NaiveTime, clock_out: NaiveTime) -> Interval {
    let start = minutes_of(clock_in);
    let mut end = minutes_of(clock_out);
    if end <= start {
        end += 24 * 60;
    }
    Interval { start, end }
}

/// Whether two complete shifts occupy overlapping wall-clock time.
///
/// Each interval is anchored at its own work date; the second is shifted onto
/// the first one's timeline by whole days before the intersection test, so a
/// shift running past midnight on day D is compared correctly against a shift
/// starting early on D+1. Callers only pass neighbors within one day of each
/// other; a single shift never spans more than 24 hours.
pub fn shifts_overlap(
    a_date: NaiveDate,
    a_in: NaiveTime,
    a_out: NaiveTime,
    b_date: NaiveDate,
    b_in: NaiveTime,
    b_out: NaiveTime,
) -> bool {
    let a = shift_interval(a_in, a_out);
    let b = shift_interval(b_in, b_out);

    let day_offset = (b_date - a_date).num_days() as i32 * 24 * 60;
    let b_start = b.start + day_offset;
    let b_end = b.end + day_offset;

    a.start < b_end && b_start < a.end
}
