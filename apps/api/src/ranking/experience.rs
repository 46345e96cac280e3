//! Experience Evaluator: derives years of experience from work history and
//! scores them against the job's minimum.
//!
//! Date parsing is fail-soft: an entry whose dates cannot be read contributes
//! zero months instead of failing the candidate.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::ExperienceEntry;

/// A calendar month; days are irrelevant to the month arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Whole months from `self` to `end`. Negative when `end` is earlier.
    pub fn months_until(&self, end: &YearMonth) -> i64 {
        (end.year as i64 - self.year as i64) * 12 + (end.month as i64 - self.month as i64)
    }
}

/// Parses a history date. Accepts `YYYY-MM-DD`, `YYYY-MM`, `YYYY/MM`, `MM/YYYY`,
/// `Mon YYYY`, `Month YYYY`, or a bare year (month defaults to January).
/// "present" in any case resolves to `now`.
pub fn parse_history_date(raw: &str, now: DateTime<Utc>) -> Option<YearMonth> {
    let cleaned = raw.replace([',', '.'], " ");
    let text = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return None;
    }
    if text.eq_ignore_ascii_case("present") || text.eq_ignore_ascii_case("current") {
        return Some(YearMonth::from_date(&now));
    }

    let candidates = [
        (text.clone(), "%Y-%m-%d"),
        (format!("{text}-01"), "%Y-%m-%d"),
        (format!("{text}/01"), "%Y/%m/%d"),
        (format!("01/{text}"), "%d/%m/%Y"),
        (format!("01 {text}"), "%d %B %Y"),
    ];
    for (value, fmt) in &candidates {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(YearMonth::from_date(&date));
        }
    }

    // Bare year only; anything else that failed the formats above is malformed.
    if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<i32>()
        .ok()
        .filter(|year| (1900..=2100).contains(year))
        .map(|year| YearMonth { year, month: 1 })
}

/// Months covered by one entry, or 0 when its dates are missing, malformed,
/// or reversed.
pub fn entry_months(entry: &ExperienceEntry, now: DateTime<Utc>) -> i64 {
    let (Some(start), Some(end)) = (
        parse_history_date(&entry.start_date, now),
        parse_history_date(&entry.end_date, now),
    ) else {
        debug!(
            title = %entry.title,
            start = %entry.start_date,
            end = %entry.end_date,
            "Unreadable experience dates, counting 0 months"
        );
        return 0;
    };

    start.months_until(&end).max(0)
}

/// Total years across all entries, rounded to one decimal place.
///
/// Overlapping positions are not merged; their durations simply add up.
pub fn derive_years_of_experience(history: &[ExperienceEntry], now: DateTime<Utc>) -> f64 {
    let total_months: i64 = history.iter().map(|e| entry_months(e, now)).sum();
    round_one_decimal(total_months as f64 / 12.0)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Years dimension result. `score` is capped at 100; `ratio` keeps the raw
/// candidate/required ratio for transparency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearsScore {
    pub score: f64,
    /// `None` when the job sets no minimum.
    pub ratio: Option<f64>,
}

pub fn score_years(candidate_years: f64, required_years: f64) -> YearsScore {
    let candidate_years = if candidate_years.is_finite() {
        candidate_years.max(0.0)
    } else {
        0.0
    };

    if required_years <= 0.0 {
        return YearsScore {
            score: 100.0,
            ratio: None,
        };
    }

    let ratio = candidate_years / required_years;
    YearsScore {
        score: (ratio * 100.0).min(100.0),
        ratio: Some(ratio),
    }
}
