use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Catalog item shared across all users.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub calories_per_100g: f64,
    pub protein_per_100g: Option<f64>,
    pub carbs_per_100g: Option<f64>,
    pub fat_per_100g: Option<f64>,
}

const FOOD_COLUMNS: &str =
    "id, name, calories_per_100g, protein_per_100g, carbs_per_100g, fat_per_100g";

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<FoodItem>> {
    let item = sqlx::query_as::<_, FoodItem>(&format!(
        "SELECT {FOOD_COLUMNS} FROM food_items WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(item)
}

pub async fn find_by_name(db: &PgPool, name: &str) -> anyhow::Result<Option<FoodItem>> {
    let item = sqlx::query_as::<_, FoodItem>(&format!(
        "SELECT {FOOD_COLUMNS} FROM food_items WHERE name = $1"
    ))
    .bind(name)
    .fetch_optional(db)
    .await?;
    Ok(item)
}

pub async fn insert(
    db: &PgPool,
    name: &str,
    calories_per_100g: f64,
    protein_per_100g: Option<f64>,
    carbs_per_100g: Option<f64>,
    fat_per_100g: Option<f64>,
) -> Result<FoodItem, sqlx::Error> {
    sqlx::query_as::<_, FoodItem>(&format!(
        r#"
        INSERT INTO food_items (name, calories_per_100g, protein_per_100g, carbs_per_100g, fat_per_100g)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {FOOD_COLUMNS}
        "#
    ))
    .bind(name)
    .bind(calories_per_100g)
    .bind(protein_per_100g)
    .bind(carbs_per_100g)
    .bind(fat_per_100g)
    .fetch_one(db)
    .await
}

/// Case-insensitive substring search; the full catalog when `query` is None.
pub async fn search(db: &PgPool, query: Option<&str>) -> anyhow::Result<Vec<FoodItem>> {
    let items = match query.filter(|q| !q.is_empty()) {
        Some(q) => {
            sqlx::query_as::<_, FoodItem>(&format!(
                "SELECT {FOOD_COLUMNS} FROM food_items WHERE name ILIKE $1 ORDER BY name"
            ))
            .bind(format!("%{}%", escape_like(q)))
            .fetch_all(db)
            .await?
        }
        None => {
            sqlx::query_as::<_, FoodItem>(&format!(
                "SELECT {FOOD_COLUMNS} FROM food_items ORDER BY name"
            ))
            .fetch_all(db)
            .await?
        }
    };
    Ok(items)
}

/// LIKE metacharacters in user input must match literally.
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_passes_plain_text_through() {
        assert_eq!(escape_like("apple"), "apple");
    }

    #[test]
    fn escape_like_escapes_metacharacters() {
        assert_eq!(escape_like("100%_pure"), "100\\%\\_pure");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
