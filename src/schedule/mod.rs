//! Relative time labels for upcoming episodes.
//!
//! Labels are computed from calendar days, not elapsed hours, so an episode
//! airing later today is always "In 0 days". The reference time is always a
//! parameter; nothing in here reads the system clock.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::formatting::maybe_pluralize;


const DAYS_PER_WEEK: i64 = 7;
const WEEK_THRESHOLD_DAYS: i64 = 7;
const MONTH_THRESHOLD_DAYS: i64 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Day,
    Week,
    Month,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeTimeLabel {
    pub unit: TimeUnit,
    pub count: i64,
}

impl fmt::Display for RelativeTimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "In {} {}",
            self.count,
            maybe_pluralize(self.count, self.unit.as_str())
        )
    }
}

/// Buckets `air_date` into days, weeks or months from the start of `now`'s day.
///
/// Only same-day or future air dates are meaningful. A past date yields a
/// negative day count; callers are expected to filter with [`is_upcoming`].
pub fn label_for(air_date: NaiveDate, now: NaiveDateTime) -> RelativeTimeLabel {
    let today = now.date();
    let days_diff = calendar_days_between(today, air_date);

    if days_diff < WEEK_THRESHOLD_DAYS {
        RelativeTimeLabel {
            unit: TimeUnit::Day,
            count: days_diff,
        }
    } else if days_diff < MONTH_THRESHOLD_DAYS {
        RelativeTimeLabel {
            unit: TimeUnit::Week,
            count: days_diff / DAYS_PER_WEEK,
        }
    } else {
        RelativeTimeLabel {
            unit: TimeUnit::Month,
            count: whole_months_between(today, air_date),
        }
    }
}

/// True when `air_date` is today or later relative to `now`.
pub fn is_upcoming(air_date: NaiveDate, now: NaiveDateTime) -> bool {
    air_date >= now.date()
}

pub fn calendar_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Largest number of calendar months that can be added to `from` without
/// passing `to`. Month ends clamp, so Jan 31 plus one month is Feb 28/29.
pub fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    if to <= from {
        return 0;
    }

    let mut months = (to.year() - from.year()) as i64 * 12
        + (to.month() as i64 - from.month() as i64);

    while months > 0 {
        match from.checked_add_months(Months::new(months as u32)) {
            Some(date) if date <= to => break,
            _ => months -= 1,
        }
    }

    months
}
