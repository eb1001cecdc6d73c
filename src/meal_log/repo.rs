use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::foods::repo::FoodItem;

/// Consumption record. Immutable once created; `total_calories` is computed
/// at insert time and never revised by later catalog edits.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LogEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_item_id: Option<Uuid>,
    pub custom_food_name: Option<String>,
    pub custom_calories_per_100g: Option<f64>,
    pub grams: f64,
    pub total_calories: f64,
    pub timestamp: OffsetDateTime,
}

/// An entry with its catalog item resolved on read, so re-fetched entries see
/// the item's current name and macros.
#[derive(Debug)]
pub struct EntryWithFood {
    pub entry: LogEntry,
    pub food_item: Option<FoodItem>,
}

const ENTRY_COLUMNS: &str = r#"id, user_id, food_item_id, custom_food_name,
    custom_calories_per_100g, grams, total_calories, "timestamp""#;

#[allow(clippy::too_many_arguments)]
pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    food_item_id: Option<Uuid>,
    custom_food_name: Option<&str>,
    custom_calories_per_100g: Option<f64>,
    grams: f64,
    total_calories: f64,
    timestamp: OffsetDateTime,
) -> anyhow::Result<LogEntry> {
    let entry = sqlx::query_as::<_, LogEntry>(&format!(
        r#"
        INSERT INTO log_entries
            (user_id, food_item_id, custom_food_name, custom_calories_per_100g,
             grams, total_calories, "timestamp")
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {ENTRY_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(food_item_id)
    .bind(custom_food_name)
    .bind(custom_calories_per_100g)
    .bind(grams)
    .bind(total_calories)
    .bind(timestamp)
    .fetch_one(db)
    .await?;
    Ok(entry)
}

#[derive(Debug, FromRow)]
struct EntryWithFoodRow {
    id: Uuid,
    user_id: Uuid,
    food_item_id: Option<Uuid>,
    custom_food_name: Option<String>,
    custom_calories_per_100g: Option<f64>,
    grams: f64,
    total_calories: f64,
    timestamp: OffsetDateTime,
    food_name: Option<String>,
    food_calories_per_100g: Option<f64>,
    food_protein_per_100g: Option<f64>,
    food_carbs_per_100g: Option<f64>,
    food_fat_per_100g: Option<f64>,
}

impl From<EntryWithFoodRow> for EntryWithFood {
    fn from(r: EntryWithFoodRow) -> Self {
        let food_item = match (r.food_item_id, r.food_name, r.food_calories_per_100g) {
            (Some(id), Some(name), Some(calories_per_100g)) => Some(FoodItem {
                id,
                name,
                calories_per_100g,
                protein_per_100g: r.food_protein_per_100g,
                carbs_per_100g: r.food_carbs_per_100g,
                fat_per_100g: r.food_fat_per_100g,
            }),
            _ => None,
        };
        Self {
            entry: LogEntry {
                id: r.id,
                user_id: r.user_id,
                food_item_id: r.food_item_id,
                custom_food_name: r.custom_food_name,
                custom_calories_per_100g: r.custom_calories_per_100g,
                grams: r.grams,
                total_calories: r.total_calories,
                timestamp: r.timestamp,
            },
            food_item,
        }
    }
}

/// All of a user's entries in `[start, end]`, ascending by timestamp, with
/// linked catalog items resolved.
pub async fn list_for_window(
    db: &PgPool,
    user_id: Uuid,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> anyhow::Result<Vec<EntryWithFood>> {
    let rows = sqlx::query_as::<_, EntryWithFoodRow>(
        r#"
        SELECT e.id, e.user_id, e.food_item_id, e.custom_food_name,
               e.custom_calories_per_100g, e.grams, e.total_calories, e."timestamp",
               f.name AS food_name,
               f.calories_per_100g AS food_calories_per_100g,
               f.protein_per_100g AS food_protein_per_100g,
               f.carbs_per_100g AS food_carbs_per_100g,
               f.fat_per_100g AS food_fat_per_100g
        FROM log_entries e
        LEFT JOIN food_items f ON f.id = e.food_item_id
        WHERE e.user_id = $1 AND e."timestamp" >= $2 AND e."timestamp" <= $3
        ORDER BY e."timestamp" ASC
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(EntryWithFood::from).collect())
}
