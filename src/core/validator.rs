//! Integrity rules for USF documents.
//!
//! Every rule stops at the first offending item and logs which entry and
//! field broke it.

use crate::domain::model::{Period, ScheduleEntry, SubjectDetails, WeekType};
use crate::utils::error::{Result, ValidationError, ValidationErrorKind};
use std::collections::BTreeMap;

pub const ENTRY_LEN: usize = 4;
pub const FIRST_DAY: i64 = 1;
pub const LAST_DAY: i64 = 7;

fn reject(kind: ValidationErrorKind, message: String) -> Result<()> {
    tracing::error!("{}", message);
    Err(ValidationError::new(kind, message).into())
}

/// Day and period numbers must be plain decimal integers.
fn parse_number(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}

pub fn validate_periods(periods: &[Period]) -> Result<()> {
    for (index, (start, end)) in periods.iter().enumerate() {
        if start.is_empty() || end.is_empty() {
            return reject(
                ValidationErrorKind::EmptyPeriodTime,
                format!(
                    "Invalid period {}: both start and end times must be provided",
                    index + 1
                ),
            );
        }
    }
    Ok(())
}

pub fn validate_timetable(
    timetable: &[ScheduleEntry],
    subjects: &BTreeMap<String, SubjectDetails>,
    period_count: usize,
) -> Result<()> {
    for (index, entry) in timetable.iter().enumerate() {
        validate_entry(index + 1, entry, subjects, period_count)?;
    }
    Ok(())
}

/// `number` is the 1-based position of the entry in the timetable.
fn validate_entry(
    number: usize,
    entry: &[String],
    subjects: &BTreeMap<String, SubjectDetails>,
    period_count: usize,
) -> Result<()> {
    let [day, week_type, subject, period] = entry else {
        return reject(
            ValidationErrorKind::MalformedTimetableEntry,
            format!(
                "Invalid timetable entry {}: should have {} items (day, week_type, subject, period), found {}",
                number, ENTRY_LEN, entry.len()
            ),
        );
    };

    match parse_number(day) {
        Some(d) if (FIRST_DAY..=LAST_DAY).contains(&d) => {}
        _ => {
            return reject(
                ValidationErrorKind::DayOutOfRange,
                format!(
                    "Invalid day '{}' in timetable entry {}: should be between {} and {}",
                    day, number, FIRST_DAY, LAST_DAY
                ),
            );
        }
    }

    if week_type.parse::<WeekType>().is_err() {
        return reject(
            ValidationErrorKind::InvalidWeekType,
            format!(
                "Invalid week type '{}' in timetable entry {}: should be one of {}",
                week_type,
                number,
                WeekType::VALUES.join(", ")
            ),
        );
    }

    if !subjects.contains_key(subject.as_str()) {
        return reject(
            ValidationErrorKind::UnknownSubjectReference,
            format!(
                "Subject {} in timetable entry {} not found in subjects",
                subject, number
            ),
        );
    }

    let max_period = i64::try_from(period_count).unwrap_or(i64::MAX);
    match parse_number(period) {
        Some(p) if (1..=max_period).contains(&p) => Ok(()),
        _ => reject(
            ValidationErrorKind::PeriodOutOfRange,
            format!(
                "Invalid period '{}' in timetable entry {}: should be between 1 and {}",
                period, number, period_count
            ),
        ),
    }
}
