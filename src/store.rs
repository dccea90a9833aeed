use crate::clock::Clock;
use crate::dates::to_day_key;
use crate::errors::{HabitError, StorageError};
use crate::models::{Habit, HabitStats, default_color, is_hex_color};
use crate::storage::KeyValueStorage;
use crate::streak::current_streak;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Storage key holding the serialized habit array.
pub const STORAGE_KEY: &str = "habit-tracker:data";

/// The whole habit collection, newest first. Every mutation writes the full
/// collection back to storage; write failures are logged and the in-memory
/// state stays authoritative.
pub struct HabitStore {
    storage: Arc<dyn KeyValueStorage>,
    clock: Arc<dyn Clock>,
    habits: Vec<Habit>,
    loaded: bool,
}

impl HabitStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            habits: Vec::new(),
            loaded: false,
        }
    }

    /// Builds a store and restores its contents in one step.
    pub fn open(storage: Arc<dyn KeyValueStorage>, clock: Arc<dyn Clock>) -> Self {
        let mut store = Self::new(storage, clock);
        store.load();
        store
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Replaces the in-memory collection with what storage holds. Any read
    /// or decode failure leaves the store empty.
    pub fn load(&mut self) {
        self.habits = match self.read_habits() {
            Ok(habits) => habits,
            Err(err) => {
                warn!("starting with no habits: {err}");
                Vec::new()
            }
        };
        self.loaded = true;
        info!(count = self.habits.len(), "habits loaded");
    }

    fn read_habits(&self) -> Result<Vec<Habit>, HabitError> {
        let Some(raw) = self
            .storage
            .get(STORAGE_KEY)
            .map_err(HabitError::PersistenceRead)?
        else {
            return Ok(Vec::new());
        };

        let parsed: Value = serde_json::from_str(&raw)
            .map_err(|err| HabitError::PersistenceRead(err.into()))?;
        let Value::Array(records) = parsed else {
            return Err(HabitError::PersistenceRead(StorageError::Malformed(
                "stored habits are not an array".into(),
            )));
        };

        let fallback_created_at = self.clock.now_millis();
        let mut seen = HashSet::new();
        let mut habits = Vec::with_capacity(records.len());
        for record in &records {
            match Habit::from_stored(record, fallback_created_at) {
                Some(habit) if seen.insert(habit.id.clone()) => habits.push(habit),
                Some(habit) => warn!(id = %habit.id, "dropping duplicate stored habit"),
                None => warn!("dropping malformed stored habit"),
            }
        }
        Ok(habits)
    }

    pub fn save(&self) -> Result<(), HabitError> {
        let payload = serde_json::to_string(&self.habits)
            .map_err(|err| HabitError::PersistenceWrite(err.into()))?;
        self.storage
            .set(STORAGE_KEY, &payload)
            .map_err(HabitError::PersistenceWrite)
    }

    fn persist(&self) {
        if let Err(err) = self.save() {
            warn!("keeping unsaved changes in memory: {err}");
        }
    }

    pub fn add_habit(&mut self, name: &str, color: Option<&str>) -> Result<Habit, HabitError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HabitError::validation("Please enter a habit name."));
        }

        let color = match color.map(str::trim).filter(|color| !color.is_empty()) {
            None => default_color().to_string(),
            Some(color) if is_hex_color(color) => color.to_ascii_lowercase(),
            Some(color) => {
                return Err(HabitError::validation(format!(
                    "color must be a #rrggbb hex value, got {color:?}"
                )));
            }
        };

        let habit = Habit {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            color,
            completed_days: Default::default(),
            created_at: self.clock.now_millis(),
        };
        self.habits.insert(0, habit.clone());
        info!(id = %habit.id, name = %habit.name, "habit added");
        self.persist();
        Ok(habit)
    }

    /// Removes the habit if present. Returns whether anything was removed.
    pub fn delete_habit(&mut self, id: &str) -> bool {
        let before = self.habits.len();
        self.habits.retain(|habit| habit.id != id);
        let removed = self.habits.len() != before;
        if removed {
            info!(%id, "habit deleted");
            self.persist();
        }
        removed
    }

    /// Flips completion of `date` for the habit. Returns whether the day is
    /// completed afterwards.
    pub fn toggle_completion(&mut self, id: &str, date: NaiveDate) -> Result<bool, HabitError> {
        let habit = self
            .habits
            .iter_mut()
            .find(|habit| habit.id == id)
            .ok_or_else(|| HabitError::NotFound { id: id.to_string() })?;

        let key = to_day_key(date);
        let checked = if habit.completed_days.remove(&key) {
            false
        } else {
            habit.completed_days.insert(key.clone());
            true
        };
        info!(%id, day = %key, checked, "completion toggled");
        self.persist();
        Ok(checked)
    }

    pub fn list_habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get_habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    pub fn streak_of(&self, habit: &Habit) -> u32 {
        current_streak(&habit.completed_days, self.clock.as_ref())
    }

    pub fn compute_stats(&self) -> HabitStats {
        HabitStats {
            habit_count: self.habits.len(),
            total_completions: self
                .habits
                .iter()
                .map(|habit| habit.completed_days.len())
                .sum(),
            best_streak: self
                .habits
                .iter()
                .map(|habit| self.streak_of(habit))
                .max()
                .unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::{FileStorage, MemoryStorage};
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn store_with(storage: Arc<MemoryStorage>) -> HabitStore {
        HabitStore::open(storage, Arc::new(FixedClock::at_date(today())))
    }

    fn fresh_store() -> (Arc<MemoryStorage>, HabitStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(Arc::clone(&storage));
        (storage, store)
    }

    #[test]
    fn add_trims_name_and_inserts_newest_first() {
        let (_, mut store) = fresh_store();
        let first = store.add_habit("Run", None).unwrap();
        let second = store.add_habit("  Read  ", Some("#3B82F6")).unwrap();

        assert_eq!(second.name, "Read");
        assert_eq!(second.color, "#3b82f6");
        assert_eq!(first.color, default_color());
        assert!(second.completed_days.is_empty());
        assert_eq!(second.created_at, store.clock().now_millis());
        assert_ne!(first.id, second.id);

        let names: Vec<_> = store.list_habits().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["Read", "Run"]);
    }

    #[test]
    fn add_rejects_blank_name_without_changes() {
        let (storage, mut store) = fresh_store();
        store.add_habit("Run", None).unwrap();
        let saved = storage.get(STORAGE_KEY).unwrap();

        for name in ["", "   ", "\t\n"] {
            let err = store.add_habit(name, None).unwrap_err();
            assert!(matches!(err, HabitError::Validation(_)));
        }
        assert_eq!(store.list_habits().len(), 1);
        assert_eq!(storage.get(STORAGE_KEY).unwrap(), saved);
    }

    #[test]
    fn add_rejects_malformed_color() {
        let (_, mut store) = fresh_store();
        let err = store.add_habit("Run", Some("red")).unwrap_err();
        assert!(matches!(err, HabitError::Validation(_)));
        assert!(store.list_habits().is_empty());
    }

    #[test]
    fn toggle_twice_restores_original_set() {
        let (_, mut store) = fresh_store();
        let habit = store.add_habit("Run", None).unwrap();
        store.toggle_completion(&habit.id, today() - Duration::days(3)).unwrap();
        let before = store.get_habit(&habit.id).unwrap().completed_days.clone();

        assert!(store.toggle_completion(&habit.id, today()).unwrap());
        assert!(!store.toggle_completion(&habit.id, today()).unwrap());
        assert_eq!(store.get_habit(&habit.id).unwrap().completed_days, before);
    }

    #[test]
    fn toggle_unknown_habit_is_not_found() {
        let (_, mut store) = fresh_store();
        store.add_habit("Run", None).unwrap();
        let before = store.list_habits().to_vec();

        let err = store.toggle_completion("missing", today()).unwrap_err();
        assert!(matches!(err, HabitError::NotFound { .. }));
        assert_eq!(store.list_habits(), before.as_slice());
    }

    #[test]
    fn delete_is_idempotent() {
        let (_, mut store) = fresh_store();
        let keep = store.add_habit("Run", None).unwrap();
        let gone = store.add_habit("Read", None).unwrap();

        assert!(store.delete_habit(&gone.id));
        let after_first = store.list_habits().to_vec();
        assert!(!store.delete_habit(&gone.id));
        assert!(!store.delete_habit("never-existed"));
        assert_eq!(store.list_habits(), after_first.as_slice());
        assert_eq!(store.list_habits()[0].id, keep.id);
    }

    #[test]
    fn stats_sum_completions_and_take_best_streak() {
        let (_, mut store) = fresh_store();
        assert_eq!(store.compute_stats(), HabitStats::default());

        let a = store.add_habit("A", None).unwrap();
        let b = store.add_habit("B", None).unwrap();
        // A: three scattered days, current streak 1.
        for offset in [0, 2, 4] {
            store.toggle_completion(&a.id, today() - Duration::days(offset)).unwrap();
        }
        // B: five days, current streak 4.
        for offset in [0, 1, 2, 3, 9] {
            store.toggle_completion(&b.id, today() - Duration::days(offset)).unwrap();
        }

        assert_eq!(
            store.compute_stats(),
            HabitStats {
                habit_count: 2,
                total_completions: 8,
                best_streak: 4,
            }
        );
    }

    #[test]
    fn save_then_reload_reproduces_collection() {
        let (storage, mut store) = fresh_store();
        let habit = store.add_habit("Run", Some("#f59e0b")).unwrap();
        store.add_habit("Read", None).unwrap();
        store.toggle_completion(&habit.id, today()).unwrap();
        store.toggle_completion(&habit.id, today() - Duration::days(1)).unwrap();

        let restarted = store_with(storage);
        assert!(restarted.is_loaded());
        assert_eq!(restarted.list_habits(), store.list_habits());
    }

    #[test]
    fn round_trip_through_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");
        let clock = Arc::new(FixedClock::at_date(today()));

        let mut store = HabitStore::open(Arc::new(FileStorage::new(&path)), clock.clone());
        let habit = store.add_habit("Meditate", None).unwrap();
        store.toggle_completion(&habit.id, today()).unwrap();

        let restarted = HabitStore::open(Arc::new(FileStorage::new(&path)), clock);
        assert_eq!(restarted.list_habits(), store.list_habits());
        assert_eq!(restarted.streak_of(&restarted.list_habits()[0]), 1);
    }

    #[test]
    fn corrupt_or_non_array_payload_loads_empty() {
        for payload in ["{oops", "{\"id\": \"x\"}", "42", "null"] {
            let storage = Arc::new(MemoryStorage::new());
            storage.set(STORAGE_KEY, payload).unwrap();
            let store = store_with(storage);
            assert!(store.is_loaded());
            assert!(store.list_habits().is_empty(), "payload {payload}");
        }
    }

    #[test]
    fn unreadable_storage_loads_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.fail_reads(true);
        let store = store_with(storage);
        assert!(store.is_loaded());
        assert!(store.list_habits().is_empty());
    }

    #[test]
    fn load_drops_malformed_and_duplicate_records() {
        let storage = Arc::new(MemoryStorage::new());
        let payload = serde_json::json!([
            {"id": "a", "name": "Run", "color": "#22c55e", "datesChecked": ["2026-10-14"], "createdAt": 1},
            {"id": "a", "name": "Dup", "color": "#22c55e", "datesChecked": [], "createdAt": 2},
            {"name": "No id"},
            {"id": "b", "name": "Read", "datesChecked": "2026-10-14"},
        ]);
        storage.set(STORAGE_KEY, &payload.to_string()).unwrap();

        let store = store_with(storage);
        let habits = store.list_habits();
        assert_eq!(habits.len(), 2);
        assert_eq!(habits[0].name, "Run");
        assert_eq!(habits[1].id, "b");
        assert!(habits[1].completed_days.is_empty());
        assert_eq!(habits[1].created_at, store.clock().now_millis());
    }

    #[test]
    fn write_failures_keep_memory_state() {
        let (storage, mut store) = fresh_store();
        storage.fail_writes(true);

        let habit = store.add_habit("Run", None).unwrap();
        assert!(store.toggle_completion(&habit.id, today()).unwrap());
        assert_eq!(store.list_habits().len(), 1);
        assert!(store.save().is_err());
        assert_eq!(storage.get(STORAGE_KEY).unwrap(), None);

        storage.fail_writes(false);
        store.save().unwrap();
        assert_eq!(store_with(storage).list_habits(), store.list_habits());
    }
}
