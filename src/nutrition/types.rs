use serde::{Deserialize, Serialize};

/// One food record returned by a FoodData Central search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCandidate {
    #[serde(rename = "fdcId")]
    pub id: u64,
    pub description: String,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default, rename = "foodNutrients")]
    pub nutrients: Vec<NutrientEntry>,
}

/// A single nutrient measurement, per 100g of the food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientEntry {
    pub nutrient_id: u32,
    #[serde(default)]
    pub nutrient_name: String,
    #[serde(default)]
    pub value: Option<f64>,
}

/// Search response envelope of `GET /foods/search`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub foods: Vec<FoodCandidate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieResult {
    pub dish_name: String,
    pub servings: f64,
    pub calories_per_serving: i64,
    pub total_calories: i64,
    pub source: &'static str,
    pub matched_food: String,
    pub food_id: u64,
}
