use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::{DayCell, MonthCursor};

use super::resolver::is_past_day;

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Month navigation is a pure offset; next/prev are always valid.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.next().first_day().map(|d| d - Duration::days(1))
    }
}

/// Build the month grid: full weeks (Monday-first) covering the cursor month,
/// with leading/trailing days of the adjacent months flagged `in_month: false`.
pub fn build_month_grid(
    cursor: MonthCursor,
    today: NaiveDate,
    active_days: &HashSet<NaiveDate>,
) -> Vec<DayCell> {
    let Some(first) = cursor.first_day() else {
        return Vec::new();
    };
    let Some(last) = cursor.last_day() else {
        return Vec::new();
    };

    let mut start = first;
    while start.weekday() != Weekday::Mon {
        start -= Duration::days(1);
    }

    let mut end = last;
    while end.weekday() != Weekday::Sun {
        end += Duration::days(1);
    }

    let mut cells = Vec::new();
    let mut day = start;
    while day <= end {
        cells.push(DayCell {
            date: day,
            in_month: day.month() == cursor.month && day.year() == cursor.year,
            is_past: is_past_day(day, today),
            has_activity: active_days.contains(&day),
        });
        day += Duration::days(1);
    }

    cells
}
