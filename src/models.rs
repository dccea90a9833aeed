use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::dates::parse_day_key;

pub const PRESET_COLORS: [&str; 8] = [
    "#22c55e", "#10b981", "#06b6d4", "#3b82f6", "#a78bfa", "#f43f5e", "#f59e0b", "#eab308",
];

pub fn default_color() -> &'static str {
    PRESET_COLORS[0]
}

/// `#rrggbb`
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// A tracked habit as persisted. `completed_days` holds `YYYY-MM-DD` keys and
/// serializes as a sorted array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(rename = "datesChecked")]
    pub completed_days: BTreeSet<String>,
    pub created_at: i64,
}

impl Habit {
    /// Validates one loosely shaped stored record. Returns `None` when the
    /// record has no usable id or name; other malformed fields fall back to
    /// defaults.
    pub fn from_stored(value: &Value, fallback_created_at: i64) -> Option<Self> {
        let record = value.as_object()?;

        let id = record.get("id")?.as_str()?.trim();
        if id.is_empty() {
            return None;
        }

        let name = record.get("name")?.as_str()?.trim();
        if name.is_empty() {
            return None;
        }

        let color = record
            .get("color")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|color| is_hex_color(color))
            .unwrap_or(default_color())
            .to_ascii_lowercase();

        let completed_days = record
            .get("datesChecked")
            .and_then(Value::as_array)
            .map(|days| {
                days.iter()
                    .filter_map(Value::as_str)
                    .filter(|key| parse_day_key(key).is_some())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let created_at = record
            .get("createdAt")
            .and_then(|value| value.as_i64().or_else(|| value.as_f64().map(|f| f as i64)))
            .unwrap_or(fallback_created_at);

        Some(Self {
            id: id.to_string(),
            name: name.to_string(),
            color,
            completed_days,
            created_at,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    pub habit_count: usize,
    pub total_completions: usize,
    pub best_streak: u32,
}

#[derive(Debug, Deserialize)]
pub struct NewHabitRequest {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToggleRequest {
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeekCell {
    pub date: String,
    pub label: String,
    pub checked: bool,
}

/// A habit as shown in the week grid.
#[derive(Debug, Serialize, Deserialize)]
pub struct HabitView {
    #[serde(flatten)]
    pub habit: Habit,
    pub streak: u32,
    pub week: Vec<WeekCell>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeekDay {
    pub date: String,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeekResponse {
    pub start: String,
    pub end: String,
    pub label: String,
    pub iso: String,
    pub days: Vec<WeekDay>,
}
