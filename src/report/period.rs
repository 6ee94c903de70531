use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, Months, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::ReportError;

/// Reporting window selected by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    Daily,
    Weekly,
    Monthly,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [ReportKind::Daily, ReportKind::Weekly, ReportKind::Monthly];

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::Daily => "Daily",
            ReportKind::Weekly => "Weekly",
            ReportKind::Monthly => "Monthly",
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ReportKind::Daily => "daily",
            ReportKind::Weekly => "weekly",
            ReportKind::Monthly => "monthly",
        }
    }

    pub fn title(self) -> String {
        format!("{} Sales Report", self.label())
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    /// Accepts the keyword in any case or the menu number (`1`..`3`).
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let needle = input.trim().to_ascii_lowercase();
        let parsed = match needle.as_str() {
            "1" | "daily" => Some(ReportKind::Daily),
            "2" | "weekly" => Some(ReportKind::Weekly),
            "3" | "monthly" => Some(ReportKind::Monthly),
            _ => None,
        };
        parsed.ok_or_else(|| ReportError::InvalidKind {
            input: input.trim().to_string(),
            suggestion: closest_keyword(&needle),
        })
    }
}

fn closest_keyword(needle: &str) -> Option<&'static str> {
    if needle.is_empty() {
        return None;
    }
    ReportKind::ALL
        .iter()
        .map(|kind| (kind.keyword(), strsim::levenshtein(needle, kind.keyword())))
        .filter(|(_, distance)| *distance <= 3)
        .min_by_key(|(_, distance)| *distance)
        .map(|(keyword, _)| keyword)
}

/// Inclusive `[start, end]` window at one-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Period {
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    /// Closes the window one time unit before `next_start`.
    /// `next_start` is `None` when the following period lies past the last
    /// representable instant; the window then runs to that instant.
    fn until(start: NaiveDateTime, next_start: Option<NaiveDateTime>) -> Self {
        Self {
            start,
            end: next_start.map_or(NaiveDateTime::MAX, |next| next - time_unit()),
        }
    }
}

/// Smallest step between two distinct stored instants.
pub fn time_unit() -> Duration {
    Duration::seconds(1)
}

/// Maps a report kind and the current instant to the window of records to
/// include. Weeks start on Sunday; months follow the calendar.
pub fn compute_period(kind: ReportKind, now: NaiveDateTime) -> Period {
    let day_start = now.date().and_time(NaiveTime::MIN);
    match kind {
        ReportKind::Daily => Period::until(day_start, days_after(day_start, 1)),
        ReportKind::Weekly => {
            let start = days_before(day_start, now.weekday().num_days_from_sunday());
            Period::until(start, days_after(start, 7))
        }
        ReportKind::Monthly => {
            let start = days_before(day_start, now.day0());
            Period::until(start, start.checked_add_months(Months::new(1)))
        }
    }
}

fn days_after(instant: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    instant.checked_add_signed(Duration::days(days))
}

/// Clamps to the first representable instant.
fn days_before(instant: NaiveDateTime, days: u32) -> NaiveDateTime {
    instant
        .checked_sub_signed(Duration::days(i64::from(days)))
        .unwrap_or(NaiveDateTime::MIN)
}
