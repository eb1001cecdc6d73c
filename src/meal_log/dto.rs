use serde::{Deserialize, Serialize, Serializer};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::error::ApiError;
use crate::foods::repo::FoodItem;
use crate::meal_log::repo::EntryWithFood;

/// Request body for logging a meal. Exactly one calorie source must be
/// present: a catalog reference, or the complete custom pair.
#[derive(Debug, Deserialize)]
pub struct LogEntryRequest {
    pub food_item_id: Option<Uuid>,
    pub custom_food_name: Option<String>,
    pub custom_calories_per_100g: Option<f64>,
    pub grams: f64,
}

/// The validated calorie source of a log entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FoodSource {
    Catalog(Uuid),
    Custom { name: String, calories_per_100g: f64 },
}

impl LogEntryRequest {
    /// Single parse point for the source invariant; every invalid combination
    /// gets its own message.
    pub fn food_source(&self) -> Result<FoodSource, ApiError> {
        let custom_name = self
            .custom_food_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        match (self.food_item_id, custom_name, self.custom_calories_per_100g) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(ApiError::InvalidInput(
                "Provide either 'food_item_id' or custom food fields, not both".into(),
            )),
            (None, None, None) => Err(ApiError::InvalidInput(
                "Provide 'food_item_id' or both 'custom_food_name' and 'custom_calories_per_100g'"
                    .into(),
            )),
            (None, Some(_), None) => Err(ApiError::InvalidInput(
                "'custom_food_name' requires 'custom_calories_per_100g'".into(),
            )),
            (None, None, Some(_)) => Err(ApiError::InvalidInput(
                "'custom_calories_per_100g' requires 'custom_food_name'".into(),
            )),
            (Some(id), None, None) => Ok(FoodSource::Catalog(id)),
            (None, Some(name), Some(calories_per_100g)) => {
                if calories_per_100g <= 0.0 {
                    return Err(ApiError::InvalidInput(
                        "'custom_calories_per_100g' must be positive".into(),
                    ));
                }
                Ok(FoodSource::Custom {
                    name: name.to_string(),
                    calories_per_100g,
                })
            }
        }
    }
}

/// Stored entry with its catalog item resolved for the response.
#[derive(Debug, Serialize)]
pub struct LogEntryOut {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_item: Option<FoodItem>,
    pub custom_food_name: Option<String>,
    pub custom_calories_per_100g: Option<f64>,
    pub grams: f64,
    pub total_calories: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl From<EntryWithFood> for LogEntryOut {
    fn from(e: EntryWithFood) -> Self {
        Self {
            id: e.entry.id,
            user_id: e.entry.user_id,
            food_item: e.food_item,
            custom_food_name: e.entry.custom_food_name,
            custom_calories_per_100g: e.entry.custom_calories_per_100g,
            grams: e.entry.grams,
            total_calories: e.entry.total_calories,
            timestamp: e.entry.timestamp,
        }
    }
}

/// Derived report for one calendar day; computed on demand, never persisted.
#[derive(Debug, Serialize)]
pub struct DailySummary {
    #[serde(serialize_with = "serialize_date")]
    pub date: Date,
    pub user_id: Uuid,
    pub username: String,
    pub daily_calorie_goal: Option<i32>,
    pub total_calories_consumed: f64,
    pub calories_remaining: Option<f64>,
    pub logged_entries: Vec<LogEntryOut>,
}

fn serialize_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> LogEntryRequest {
        serde_json::from_str(json).expect("valid request json")
    }

    #[test]
    fn catalog_reference_parses() {
        let id = Uuid::new_v4();
        let req = request(&format!(r#"{{"food_item_id":"{id}","grams":150}}"#));
        assert_eq!(req.food_source().unwrap(), FoodSource::Catalog(id));
    }

    #[test]
    fn custom_pair_parses() {
        let req = request(
            r#"{"custom_food_name":"protein bar","custom_calories_per_100g":400,"grams":50}"#,
        );
        assert_eq!(
            req.food_source().unwrap(),
            FoodSource::Custom {
                name: "protein bar".into(),
                calories_per_100g: 400.0
            }
        );
    }

    #[test]
    fn rejects_both_sources() {
        let id = Uuid::new_v4();
        let req = request(&format!(
            r#"{{"food_item_id":"{id}","custom_food_name":"bar","custom_calories_per_100g":400,"grams":50}}"#
        ));
        let err = req.food_source().unwrap_err();
        assert!(err.to_string().contains("not both"));
    }

    #[test]
    fn rejects_neither_source() {
        let req = request(r#"{"grams":50}"#);
        assert!(req.food_source().is_err());
    }

    #[test]
    fn rejects_name_without_calories() {
        let req = request(r#"{"custom_food_name":"bar","grams":50}"#);
        let err = req.food_source().unwrap_err();
        assert!(err.to_string().contains("custom_calories_per_100g"));
    }

    #[test]
    fn rejects_calories_without_name() {
        let req = request(r#"{"custom_calories_per_100g":400,"grams":50}"#);
        let err = req.food_source().unwrap_err();
        assert!(err.to_string().contains("custom_food_name"));
    }

    #[test]
    fn rejects_non_positive_custom_calories() {
        let req =
            request(r#"{"custom_food_name":"bar","custom_calories_per_100g":0,"grams":50}"#);
        let err = req.food_source().unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn empty_custom_name_counts_as_missing() {
        let req =
            request(r#"{"custom_food_name":"","custom_calories_per_100g":400,"grams":50}"#);
        let err = req.food_source().unwrap_err();
        assert!(err.to_string().contains("custom_food_name"));
    }
}
