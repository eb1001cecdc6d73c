use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::foods::repo as foods_repo;
use crate::meal_log::dto::{DailySummary, FoodSource, LogEntryOut, LogEntryRequest};
use crate::meal_log::repo::{self, EntryWithFood};
use crate::meal_log::services::{day_window_utc, round2, total_calories};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/log", post(create_entry))
        .route("/log/summary/today", get(today_summary))
}

#[instrument(skip(state, user, payload))]
pub async fn create_entry(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<LogEntryRequest>,
) -> Result<(StatusCode, Json<LogEntryOut>), ApiError> {
    let source = payload.food_source()?;
    if payload.grams <= 0.0 {
        return Err(ApiError::InvalidInput("'grams' must be positive".into()));
    }

    let (food_item, custom_name, custom_calories, rate) = match source {
        FoodSource::Catalog(food_item_id) => {
            let item = foods_repo::find_by_id(&state.db, food_item_id)
                .await?
                .ok_or_else(|| {
                    ApiError::NotFound(format!("FoodItem with id '{food_item_id}' not found"))
                })?;
            let rate = item.calories_per_100g;
            (Some(item), None, None, rate)
        }
        FoodSource::Custom {
            name,
            calories_per_100g,
        } => (None, Some(name), Some(calories_per_100g), calories_per_100g),
    };

    let total = total_calories(rate, payload.grams);
    let now = OffsetDateTime::now_utc();

    let entry = repo::insert(
        &state.db,
        user.id,
        food_item.as_ref().map(|f| f.id),
        custom_name.as_deref(),
        custom_calories,
        payload.grams,
        total,
        now,
    )
    .await?;

    info!(
        user_id = %user.id,
        entry_id = %entry.id,
        total_calories = total,
        "log entry created"
    );
    Ok((
        StatusCode::CREATED,
        Json(LogEntryOut::from(EntryWithFood { entry, food_item })),
    ))
}

#[instrument(skip(state, user))]
pub async fn today_summary(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<DailySummary>, ApiError> {
    let today = OffsetDateTime::now_utc().date();
    let (start, end) = day_window_utc(today);

    let entries = repo::list_for_window(&state.db, user.id, start, end).await?;

    let consumed = round2(entries.iter().map(|e| e.entry.total_calories).sum());
    let remaining = user
        .daily_calorie_goal
        .map(|goal| round2((f64::from(goal) - consumed).max(0.0)));

    Ok(Json(DailySummary {
        date: today,
        user_id: user.id,
        username: user.username,
        daily_calorie_goal: user.daily_calorie_goal,
        total_calories_consumed: consumed,
        calories_remaining: remaining,
        logged_entries: entries.into_iter().map(LogEntryOut::from).collect(),
    }))
}
