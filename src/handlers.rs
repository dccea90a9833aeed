use crate::clock::Clock;
use crate::dates::{Week, parse_day_key, to_day_key, weekday_label};
use crate::errors::AppError;
use crate::models::{
    Habit, HabitStats, HabitView, NewHabitRequest, PRESET_COLORS, ToggleRequest, WeekCell,
    WeekDay, WeekResponse,
};
use crate::state::AppState;
use crate::store::HabitStore;
use crate::ui::render_index;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.current_week()))
}

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<HabitView>> {
    let week = state.current_week();
    let store = state.store.lock().await;
    let views = store
        .list_habits()
        .iter()
        .map(|habit| to_view(&store, habit, &week))
        .collect();
    Json(views)
}

pub async fn add_habit(
    State(state): State<AppState>,
    Json(payload): Json<NewHabitRequest>,
) -> Result<(StatusCode, Json<HabitView>), AppError> {
    let week = state.current_week();
    let mut store = state.store.lock().await;
    let habit = store.add_habit(&payload.name, payload.color.as_deref())?;
    Ok((StatusCode::CREATED, Json(to_view(&store, &habit, &week))))
}

pub async fn delete_habit(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    state.store.lock().await.delete_habit(&id);
    StatusCode::NO_CONTENT
}

pub async fn toggle_completion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<HabitView>, AppError> {
    let payload = parse_toggle_body(&body)?;
    let week = state.current_week();
    let mut store = state.store.lock().await;

    let date = match payload.date.as_deref().map(str::trim) {
        None | Some("") => store.clock().today(),
        Some(key) => parse_day_key(key)
            .ok_or_else(|| AppError::bad_request(format!("date must be YYYY-MM-DD, got {key:?}")))?,
    };

    store.toggle_completion(&id, date)?;
    let habit = store
        .get_habit(&id)
        .ok_or_else(|| AppError::not_found(format!("habit not found: {id}")))?;
    Ok(Json(to_view(&store, habit, &week)))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<HabitStats> {
    Json(state.store.lock().await.compute_stats())
}

pub async fn get_week(State(state): State<AppState>) -> Json<WeekResponse> {
    Json(to_week_response(&state.current_week()))
}

pub async fn get_colors() -> Json<Vec<&'static str>> {
    Json(PRESET_COLORS.to_vec())
}

/// An empty body toggles today; anything else must be a well-formed
/// `ToggleRequest`.
fn parse_toggle_body(body: &[u8]) -> Result<ToggleRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ToggleRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|err| AppError::bad_request(format!("invalid toggle request: {err}")))
}

fn to_view(store: &HabitStore, habit: &Habit, week: &Week) -> HabitView {
    let cells = week
        .days()
        .iter()
        .zip(week.keys())
        .map(|(day, date)| {
            WeekCell {
                checked: habit.completed_days.contains(&date),
                label: weekday_label(*day).to_string(),
                date,
            }
        })
        .collect();

    HabitView {
        streak: store.streak_of(habit),
        habit: habit.clone(),
        week: cells,
    }
}

fn to_week_response(week: &Week) -> WeekResponse {
    WeekResponse {
        start: to_day_key(week.start()),
        end: to_day_key(week.end()),
        label: week.range_label(),
        iso: week.iso_label(),
        days: week
            .days()
            .iter()
            .map(|day| WeekDay {
                date: to_day_key(*day),
                label: weekday_label(*day).to_string(),
            })
            .collect(),
    }
}
