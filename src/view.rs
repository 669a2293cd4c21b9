//! Calendar projections over the log collection.
//!
//! Every grouping here is keyed by the observer's local calendar date, so the
//! caller supplies the time zone. The server passes `chrono::Local`.

use crate::models::{DayView, EntryView, LogEntry, MonthView};
use chrono::{Datelike, NaiveDate, TimeZone};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("{year:04}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("cannot parse date '{0}', expected YYYY-MM-DD")]
    UnparseableDate(String),

    #[error("year {0} is out of range")]
    YearOutOfRange(i32),
}

pub fn local_date<Tz: TimeZone>(entry: &LogEntry, tz: &Tz) -> NaiveDate {
    entry.timestamp.with_timezone(tz).date_naive()
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, ViewError> {
    if !(1..=12).contains(&month) {
        return Err(ViewError::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(ViewError::YearOutOfRange(year))
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, ViewError> {
    let first = first_of_month(year, month)?;
    let (next_year, next_month) = shift_month(year, month, 1)?;
    let next = first_of_month(next_year, next_month)?;
    Ok((next - first).num_days() as u32)
}

/// Weekday of the 1st of the month, 0 = Sunday .. 6 = Saturday.
pub fn first_weekday(year: i32, month: u32) -> Result<u32, ViewError> {
    Ok(first_of_month(year, month)?.weekday().num_days_from_sunday())
}

pub fn month_label(year: i32, month: u32) -> Result<String, ViewError> {
    Ok(first_of_month(year, month)?.format("%B %Y").to_string())
}

/// Moves `offset` months forward (or back when negative), rolling the year.
pub fn shift_month(year: i32, month: u32, offset: i32) -> Result<(i32, u32), ViewError> {
    if !(1..=12).contains(&month) {
        return Err(ViewError::InvalidMonth(month));
    }

    let total = i64::from(year) * 12 + i64::from(month - 1) + i64::from(offset);
    let shifted_year = i32::try_from(total.div_euclid(12)).map_err(|_| ViewError::YearOutOfRange(year))?;
    let shifted_month = total.rem_euclid(12) as u32 + 1;
    first_of_month(shifted_year, shifted_month)?;
    Ok((shifted_year, shifted_month))
}

pub fn parse_day(year: i32, month: u32, day: u32) -> Result<NaiveDate, ViewError> {
    if !(1..=12).contains(&month) {
        return Err(ViewError::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ViewError::InvalidDate { year, month, day })
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ViewError> {
    let unparseable = || ViewError::UnparseableDate(raw.to_string());

    let parts: Vec<&str> = raw.trim().split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(unparseable());
    };

    let year = year.parse::<i32>().map_err(|_| unparseable())?;
    let month = month.parse::<u32>().map_err(|_| unparseable())?;
    let day = day.parse::<u32>().map_err(|_| unparseable())?;
    parse_day(year, month, day)
}

/// Per-day counts for one month. Days without entries are absent from
/// `counts`.
pub fn counts_for_month<Tz: TimeZone>(
    entries: &[LogEntry],
    year: i32,
    month: u32,
    tz: &Tz,
) -> Result<MonthView, ViewError> {
    let days_in_month = days_in_month(year, month)?;
    let first_weekday = first_weekday(year, month)?;
    let label = month_label(year, month)?;

    let mut counts = BTreeMap::new();
    for entry in entries {
        let date = local_date(entry, tz);
        if date.year() == year && date.month() == month {
            *counts.entry(date.day()).or_insert(0usize) += 1;
        }
    }

    Ok(MonthView {
        year,
        month,
        label,
        days_in_month,
        first_weekday,
        today: None,
        counts,
    })
}

impl MonthView {
    pub fn mark_today(&mut self, today: NaiveDate) {
        self.today = (today.year() == self.year && today.month() == self.month).then(|| today.day());
    }
}

/// Entries on `date`, in the order they appear in `entries`.
pub fn entries_for_day<Tz: TimeZone>(entries: &[LogEntry], date: NaiveDate, tz: &Tz) -> Vec<LogEntry> {
    entries
        .iter()
        .filter(|entry| local_date(entry, tz) == date)
        .cloned()
        .collect()
}

pub fn entry_view<Tz: TimeZone>(entry: &LogEntry, tz: &Tz) -> EntryView {
    let local = entry.timestamp.with_timezone(tz).naive_local();
    EntryView {
        id: entry.id,
        timestamp: entry.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        local_date: local.date().format("%Y-%m-%d").to_string(),
        local_time: local.time().format("%H:%M:%S").to_string(),
    }
}

pub fn day_view<Tz: TimeZone>(entries: &[LogEntry], date: NaiveDate, today: NaiveDate, tz: &Tz) -> DayView {
    DayView {
        date: date.format("%Y-%m-%d").to_string(),
        is_today: date == today,
        entries: entries_for_day(entries, date, tz)
            .iter()
            .map(|entry| entry_view(entry, tz))
            .collect(),
    }
}
