use super::types::FoodCandidate;

/// FoodData Central nutrient number for energy in kcal.
pub const ENERGY_NUTRIENT_ID: u32 = 1008;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalorieEstimate {
    pub calories_per_serving: i64,
    pub total_calories: i64,
}

/// Energy per 100g, taken from the first nutrient that is the energy entry by
/// id or mentions "energy" in its name.
pub fn extract(food: &FoodCandidate) -> Option<f64> {
    food.nutrients
        .iter()
        .find(|n| {
            n.nutrient_id == ENERGY_NUTRIENT_ID || n.nutrient_name.to_lowercase().contains("energy")
        })
        .and_then(|n| n.value)
}

/// One serving is 100g. The per-serving value is rounded (half away from zero)
/// before it is multiplied out. `None` when either figure does not fit an `i64`.
pub fn compute(calories_per_100g: f64, servings: f64) -> Option<CalorieEstimate> {
    let calories_per_serving = rounded_i64(calories_per_100g)?;
    let total_calories = rounded_i64(calories_per_serving as f64 * servings)?;
    Some(CalorieEstimate {
        calories_per_serving,
        total_calories,
    })
}

fn rounded_i64(value: f64) -> Option<i64> {
    let rounded = value.round();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    (rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64)
        .then_some(rounded as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::types::NutrientEntry;

    fn nutrient(id: u32, name: &str, value: Option<f64>) -> NutrientEntry {
        NutrientEntry {
            nutrient_id: id,
            nutrient_name: name.into(),
            value,
        }
    }

    fn food_with(nutrients: Vec<NutrientEntry>) -> FoodCandidate {
        FoodCandidate {
            id: 1,
            description: "Test food".into(),
            brand_name: None,
            ingredients: None,
            nutrients,
        }
    }

    #[test]
    fn extract_by_id() {
        let food = food_with(vec![
            nutrient(1003, "Protein", Some(11.0)),
            nutrient(1008, "Energy", Some(280.0)),
        ]);
        assert_eq!(extract(&food), Some(280.0));
    }

    #[test]
    fn extract_by_name_case_insensitive() {
        let food = food_with(vec![nutrient(2047, "ENERGY (Atwater General Factors)", Some(95.5))]);
        assert_eq!(extract(&food), Some(95.5));
    }

    #[test]
    fn first_qualifying_entry_wins() {
        let food = food_with(vec![
            nutrient(2048, "Energy (Atwater Specific Factors)", Some(90.0)),
            nutrient(1008, "Energy", Some(100.0)),
        ]);
        assert_eq!(extract(&food), Some(90.0));
    }

    #[test]
    fn first_match_without_value_is_none() {
        let food = food_with(vec![
            nutrient(1008, "Energy", None),
            nutrient(2047, "Energy (Atwater General Factors)", Some(90.0)),
        ]);
        assert_eq!(extract(&food), None);
    }

    #[test]
    fn extract_none_for_empty_or_missing_energy() {
        assert_eq!(extract(&food_with(vec![])), None);
        let food = food_with(vec![
            nutrient(1003, "Protein", Some(20.0)),
            nutrient(1004, "Total lipid (fat)", Some(5.0)),
        ]);
        assert_eq!(extract(&food), None);
    }

    #[test]
    fn compute_examples() {
        assert_eq!(
            compute(280.0, 2.0),
            Some(CalorieEstimate {
                calories_per_serving: 280,
                total_calories: 560
            })
        );
        assert_eq!(
            compute(87.4, 3.0),
            Some(CalorieEstimate {
                calories_per_serving: 87,
                total_calories: 261
            })
        );
    }

    #[test]
    fn compute_rounds_before_multiplying() {
        // 87.5 rounds to 88 first, so 88 * 3 = 264 rather than round(262.5)
        let estimate = compute(87.5, 3.0).unwrap();
        assert_eq!(estimate.calories_per_serving, 88);
        assert_eq!(estimate.total_calories, 264);
        assert_eq!(compute(100.0, 1.5).unwrap().total_calories, 150);
        assert_eq!(compute(101.0, 0.5).unwrap().total_calories, 51);
    }

    #[test]
    fn compute_refuses_values_that_overflow() {
        assert_eq!(compute(280.0, 1e20), None);
        assert_eq!(compute(1e300, 1.0), None);
        assert_eq!(compute(f64::INFINITY, 1.0), None);
        assert_eq!(compute(f64::NAN, 1.0), None);
    }
}
