pub mod app;
pub mod clock;
pub mod config;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod streak;
pub mod ui;
pub mod week;

pub use app::router;
pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use errors::{HabitError, StorageError};
pub use models::{Habit, HabitStats};
pub use state::AppState;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{HabitStore, STORAGE_KEY};
pub use week::WeekRefresher;
