use crate::clock::Clock;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Weekday};

pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical `YYYY-MM-DD` key for a calendar day.
pub fn to_day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// The local calendar day an instant falls on, whatever its time-of-day.
pub fn local_day<Tz: TimeZone>(at: &DateTime<Tz>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

pub fn day_key_at<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    to_day_key(local_day(at))
}

/// Parses a day key. Only the zero-padded canonical form is accepted, so
/// `2026-1-5` is rejected even though it names a real day.
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(key, DAY_KEY_FORMAT).ok()?;
    (to_day_key(date) == key).then_some(date)
}

/// Monday at or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn week_dates(today: NaiveDate) -> Week {
    let start = start_of_week(today);
    let mut days = [start; 7];
    for (offset, day) in days.iter_mut().enumerate() {
        *day = start + Duration::days(offset as i64);
    }
    Week { days }
}

pub fn current_week_dates(clock: &dyn Clock) -> Week {
    week_dates(clock.today())
}

/// Seven consecutive days, Monday through Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    days: [NaiveDate; 7],
}

impl Week {
    pub fn days(&self) -> &[NaiveDate; 7] {
        &self.days
    }

    pub fn start(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn end(&self) -> NaiveDate {
        self.days[6]
    }

    pub fn keys(&self) -> Vec<String> {
        self.days.iter().copied().map(to_day_key).collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start() <= date && date <= self.end()
    }

    /// e.g. `Oct 12 – Oct 18`
    pub fn range_label(&self) -> String {
        format!(
            "{} – {}",
            self.start().format("%b %-d"),
            self.end().format("%b %-d")
        )
    }

    /// e.g. `2026-W42`
    pub fn iso_label(&self) -> String {
        let iso = self.start().iso_week();
        format!("{}-W{:02}", iso.year(), iso.week())
    }
}

/// Two-letter weekday label used in the week grid header.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}
