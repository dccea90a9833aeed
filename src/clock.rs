use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime};
use std::sync::Mutex;

/// Source of the current local time. Injected into the store and the week
/// refresher so tests can pin "now".
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
pub struct FixedClock {
    now: Mutex<DateTime<Local>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Pins the clock to noon on `date`.
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(noon(date))
    }

    pub fn set(&self, now: DateTime<Local>) {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = now;
    }

    pub fn set_date(&self, date: NaiveDate) {
        self.set(noon(date));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn noon(date: NaiveDate) -> DateTime<Local> {
    let naive = date.and_time(NaiveTime::MIN) + Duration::hours(12);
    naive
        .and_local_timezone(Local)
        .earliest()
        .unwrap_or_else(|| naive.and_utc().with_timezone(&Local))
}
