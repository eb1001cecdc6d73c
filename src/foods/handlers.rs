use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::extractors::CurrentUser;
use crate::error::{conflict_on_unique, ApiError};
use crate::foods::dto::{FoodItemCreate, FoodSearch};
use crate::foods::repo::{self, FoodItem};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/foods", post(create_food).get(list_foods))
}

#[instrument(skip(state, _caller, payload))]
pub async fn create_food(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Json(payload): Json<FoodItemCreate>,
) -> Result<(StatusCode, Json<FoodItem>), ApiError> {
    payload.validate()?;
    let name = payload.name.trim();

    if repo::find_by_name(&state.db, name).await?.is_some() {
        warn!(name = %name, "food item already exists");
        return Err(ApiError::Conflict(format!(
            "A food item named '{name}' already exists"
        )));
    }

    let item = repo::insert(
        &state.db,
        name,
        payload.calories_per_100g,
        payload.protein_per_100g,
        payload.carbs_per_100g,
        payload.fat_per_100g,
    )
    .await
    .map_err(|e| conflict_on_unique(e, "A food item with this name already exists"))?;

    info!(food_id = %item.id, name = %item.name, "food item created");
    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state, _caller))]
pub async fn list_foods(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Query(params): Query<FoodSearch>,
) -> Result<Json<Vec<FoodItem>>, ApiError> {
    let items = repo::search(&state.db, params.search.as_deref()).await?;
    Ok(Json(items))
}
