use serde::{Deserialize, Serialize};

use super::types::CalorieResult;

/// Request body for `POST /get-calories`.
#[derive(Debug, Deserialize)]
pub struct GetCaloriesRequest {
    pub dish_name: String,
    #[serde(default = "default_servings")]
    pub servings: f64,
}

fn default_servings() -> f64 {
    1.0
}

/// Calorie estimate returned to the client.
#[derive(Debug, Serialize)]
pub struct CaloriesResponse {
    pub dish_name: String,
    pub servings: f64,
    pub calories_per_serving: i64,
    pub total_calories: i64,
    pub source: String,
    pub matched_food: String,
    pub food_id: u64,
}

impl From<CalorieResult> for CaloriesResponse {
    fn from(r: CalorieResult) -> Self {
        Self {
            dish_name: r.dish_name,
            servings: r.servings,
            calories_per_serving: r.calories_per_serving,
            total_calories: r.total_calories,
            source: r.source.to_string(),
            matched_food: r.matched_food,
            food_id: r.food_id,
        }
    }
}
