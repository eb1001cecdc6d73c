use serde::Deserialize;

use crate::error::ApiError;

/// Request body for adding a catalog item. Values are per 100g.
#[derive(Debug, Deserialize)]
pub struct FoodItemCreate {
    pub name: String,
    pub calories_per_100g: f64,
    pub protein_per_100g: Option<f64>,
    pub carbs_per_100g: Option<f64>,
    pub fat_per_100g: Option<f64>,
}

/// Optional search filter for the catalog listing.
#[derive(Debug, Deserialize)]
pub struct FoodSearch {
    pub search: Option<String>,
}

impl FoodItemCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::InvalidInput("'name' must not be empty".into()));
        }
        if self.calories_per_100g <= 0.0 {
            return Err(ApiError::InvalidInput(
                "'calories_per_100g' must be positive".into(),
            ));
        }
        for (field, value) in [
            ("protein_per_100g", self.protein_per_100g),
            ("carbs_per_100g", self.carbs_per_100g),
            ("fat_per_100g", self.fat_per_100g),
        ] {
            if let Some(v) = value {
                if v < 0.0 {
                    return Err(ApiError::InvalidInput(format!(
                        "'{field}' must not be negative"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> FoodItemCreate {
        FoodItemCreate {
            name: "Apple".into(),
            calories_per_100g: 52.0,
            protein_per_100g: Some(0.3),
            carbs_per_100g: Some(13.8),
            fat_per_100g: Some(0.2),
        }
    }

    #[test]
    fn valid_item_passes() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_calories() {
        let mut item = base();
        item.calories_per_100g = 0.0;
        assert!(item.validate().is_err());
        item.calories_per_100g = -10.0;
        assert!(item.validate().is_err());
    }

    #[test]
    fn rejects_negative_macros() {
        let mut item = base();
        item.fat_per_100g = Some(-0.1);
        let err = item.validate().unwrap_err();
        assert!(err.to_string().contains("fat_per_100g"));
    }

    #[test]
    fn macros_are_optional_and_zero_is_allowed() {
        let mut item = base();
        item.protein_per_100g = None;
        item.carbs_per_100g = Some(0.0);
        assert!(item.validate().is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        let mut item = base();
        item.name = "   ".into();
        assert!(item.validate().is_err());
    }
}
