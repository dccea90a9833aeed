use crate::clock::Clock;
use crate::dates::{Week, current_week_dates, week_dates};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(60);

/// Owns the task that keeps the current week up to date. Dropping it stops
/// the task.
pub struct WeekRefresher {
    task: JoinHandle<()>,
}

impl WeekRefresher {
    /// Publishes the current week immediately and re-checks it every `period`,
    /// so a session left open across midnight on Sunday rolls to the new week.
    pub fn spawn(clock: Arc<dyn Clock>, period: Duration) -> (Self, watch::Receiver<Week>) {
        let (tx, rx) = watch::channel(current_week_dates(clock.as_ref()));

        let task = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval.tick().await;

            loop {
                interval.tick().await;
                let today = clock.today();
                let changed = tx.send_if_modified(|current| {
                    if current.contains(today) {
                        return false;
                    }
                    *current = week_dates(today);
                    true
                });
                if changed {
                    debug!(start = %tx.borrow().start(), "week window rolled over");
                }
                if tx.is_closed() {
                    break;
                }
            }
        });

        (Self { task }, rx)
    }
}

impl Drop for WeekRefresher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
