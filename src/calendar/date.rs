use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::foundation::error::{LifegridError, LifegridResult};

/// Weekday on which every grid row begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekStart {
    /// Corresponding chrono weekday.
    pub fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Tuesday => Weekday::Tue,
            Self::Wednesday => Weekday::Wed,
            Self::Thursday => Weekday::Thu,
            Self::Friday => Weekday::Fri,
            Self::Saturday => Weekday::Sat,
            Self::Sunday => Weekday::Sun,
        }
    }
}

/// Parse `dd/mm/yyyy` or `dd-mm-yyyy` into a date.
///
/// The patterns are tried in that order and surrounding whitespace is
/// ignored. Anything else is an [`LifegridError::InvalidFormat`].
pub fn parse_date(text: &str) -> LifegridResult<NaiveDate> {
    let text = text.trim();

    for pattern in ["%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, pattern) {
            return Ok(date);
        }
    }

    Err(LifegridError::invalid_format(format!(
        "date \"{text}\" matches neither dd/mm/yyyy nor dd-mm-yyyy"
    )))
}

/// Latest date on `anchor`'s weekday that is not after `date`.
///
/// The result is at most six days before `date` and aligning an already
/// aligned date is the identity.
pub fn align_week_start(date: NaiveDate, anchor: WeekStart) -> NaiveDate {
    let offset = (date.weekday().num_days_from_monday() + 7
        - anchor.weekday().num_days_from_monday())
        % 7;
    date - Duration::days(i64::from(offset))
}

/// Step `n` whole weeks forward from `date`.
pub fn weeks_after(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::weeks(n)
}

/// Whether the week starting at `week_start` contains the recurring
/// `month`/`day` anniversary.
///
/// The anniversary is instantiated in both candidate years the window can
/// touch (`week_start.year()` and the year after) and checked against the
/// half-open span `[week_start, week_start + 7d)`. A `Feb 29` anniversary
/// falls back to `Feb 28` in non-leap candidate years; any other
/// unconstructible `(month, day)` pair is an
/// [`LifegridError::InvalidDate`].
pub fn week_contains(week_start: NaiveDate, month: u32, day: u32) -> LifegridResult<bool> {
    let week_end = week_start + Duration::days(7);

    for year in [week_start.year(), week_start.year() + 1] {
        let candidate = match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => date,
            None if month == 2 && day == 29 => NaiveDate::from_ymd_opt(year, 2, 28)
                .ok_or_else(|| LifegridError::invalid_date(format!("no Feb 28 in year {year}")))?,
            None => {
                return Err(LifegridError::invalid_date(format!(
                    "day {day} of month {month} does not exist in year {year}"
                )));
            }
        };

        if week_start <= candidate && candidate < week_end {
            return Ok(true);
        }
    }

    Ok(false)
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/date.rs"]
mod tests;
