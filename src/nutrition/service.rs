use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::calories::{compute, extract};
use super::matcher::select_best;
use super::source::{FoodSource, SourceError};
use super::types::CalorieResult;

pub const SOURCE_LABEL: &str = "USDA FoodData Central";

/// Largest servings count accepted for a single lookup.
pub const MAX_SERVINGS: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("dish name must not be empty")]
    EmptyDishName,
    #[error("servings must be a positive number no greater than {MAX_SERVINGS}, got {0}")]
    InvalidServings(f64),
    #[error("no foods found for this dish")]
    NotFound,
    #[error("no matching food for this dish")]
    NoMatch,
    #[error("calorie data unavailable for the matched food")]
    CaloriesUnavailable,
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Resolves a dish name to a calorie estimate.
pub struct CalorieService {
    source: Arc<dyn FoodSource>,
    page_size: u32,
}

impl CalorieService {
    pub fn new(source: Arc<dyn FoodSource>, page_size: u32) -> Self {
        Self { source, page_size }
    }

    #[instrument(skip(self))]
    pub async fn lookup(
        &self,
        dish_name: &str,
        servings: f64,
    ) -> Result<CalorieResult, LookupError> {
        let dish_name = dish_name.trim();
        if dish_name.is_empty() {
            return Err(LookupError::EmptyDishName);
        }
        if !servings.is_finite() || servings <= 0.0 || servings > MAX_SERVINGS {
            return Err(LookupError::InvalidServings(servings));
        }

        let candidates = self.source.search(dish_name, self.page_size).await?;
        if candidates.is_empty() {
            info!("no search results");
            return Err(LookupError::NotFound);
        }

        let food = select_best(&candidates, dish_name).ok_or(LookupError::NoMatch)?;
        let per_100g = extract(food).ok_or_else(|| {
            warn!(fdc_id = food.id, "matched food has no energy value");
            LookupError::CaloriesUnavailable
        })?;
        let estimate = compute(per_100g, servings).ok_or_else(|| {
            warn!(fdc_id = food.id, per_100g, "energy value out of range");
            LookupError::CaloriesUnavailable
        })?;

        info!(
            fdc_id = food.id,
            matched = %food.description,
            total = estimate.total_calories,
            "calories resolved"
        );
        Ok(CalorieResult {
            dish_name: dish_name.to_string(),
            servings,
            calories_per_serving: estimate.calories_per_serving,
            total_calories: estimate.total_calories,
            source: SOURCE_LABEL,
            matched_food: food.description.clone(),
            food_id: food.id,
        })
    }
}
