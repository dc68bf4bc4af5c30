//! Week windowing for the rotation forecast.

use chrono::{Datelike, Duration, Local, NaiveDate};
use shared::domain::MonthlyRotationEntry;

pub const WEEK_START_FORMAT: &str = "%Y/%m/%d";

/// A forecast entry enriched with the Monday its week starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastWeek {
    pub week: i64,
    pub user: String,
    pub start_date: NaiveDate,
}

impl ForecastWeek {
    pub fn start_date_label(&self) -> String {
        self.start_date.format(WEEK_START_FORMAT).to_string()
    }

    pub fn week_label(&self) -> String {
        format!("Week of {}", self.start_date_label())
    }
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Floors `day` to the Monday of its week.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

/// Entry `i` gets the Monday of `today`'s week plus `i` weeks. The backend's
/// `week` field is carried through untouched and plays no part in the date.
pub fn forecast_weeks(entries: Vec<MonthlyRotationEntry>, today: NaiveDate) -> Vec<ForecastWeek> {
    let monday = week_start(today);
    entries
        .into_iter()
        .enumerate()
        .map(|(offset, entry)| ForecastWeek {
            week: entry.week,
            user: entry.user,
            start_date: monday + Duration::weeks(offset as i64),
        })
        .collect()
}
