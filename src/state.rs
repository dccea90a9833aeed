use crate::dates::Week;
use crate::store::HabitStore;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<HabitStore>>,
    pub week: watch::Receiver<Week>,
}

impl AppState {
    pub fn new(store: HabitStore, week: watch::Receiver<Week>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            week,
        }
    }

    pub fn current_week(&self) -> Week {
        *self.week.borrow()
    }
}
