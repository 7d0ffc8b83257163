//! The one-day commit window

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};

/// A half-open time window `[since, until)` covering one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitWindow {
    /// The calendar day the window covers
    pub date: NaiveDate,
    /// Local midnight at the start of `date`, in UTC
    pub since: DateTime<Utc>,
    /// Local midnight at the start of the following day, in UTC
    pub until: DateTime<Utc>,
}

impl CommitWindow {
    /// Window for `date` measured in the time zone `tz`
    #[must_use]
    pub fn for_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        let next = date.checked_add_days(Days::new(1)).unwrap_or(date);
        Self {
            date,
            since: local_midnight(date, tz),
            until: local_midnight(next, tz),
        }
    }

    /// Window for `date` in the local time zone
    #[must_use]
    pub fn for_local_day(date: NaiveDate) -> Self {
        Self::for_day(date, &Local)
    }

    /// Window for the day before today, in the local time zone
    #[must_use]
    pub fn yesterday() -> Self {
        let today = Local::now().date_naive();
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        Self::for_local_day(yesterday)
    }

    /// Check whether `timestamp` falls inside the window
    #[must_use]
    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        &self.since <= timestamp && timestamp < &self.until
    }
}

/// Start of `date` in `tz`: local midnight, or the first local time that
/// exists when a DST jump skips midnight.
fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight: NaiveDateTime = date.and_time(chrono::NaiveTime::MIN);
    (0..MAX_GAP_MINUTES)
        .filter_map(|minute| midnight.checked_add_signed(TimeDelta::minutes(minute)))
        .find_map(|naive| tz.from_local_datetime(&naive).earliest())
        .map_or_else(
            || Utc.from_utc_datetime(&midnight),
            |dt| dt.with_timezone(&Utc),
        )
}

/// Longest DST gap searched past midnight
const MAX_GAP_MINUTES: i64 = 24 * 60;
