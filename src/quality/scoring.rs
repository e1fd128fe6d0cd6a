//! Deterministic data-quality scoring for food item records.
//!
//! Every function here is total: incomplete records degrade to zero scores,
//! `false` indicators and empty lists instead of failing.
//!
//! Overall weights: ingredients 30%, nutrition 40%, completeness 30%.
//! Completeness already blends the nutrition and ingredient scores at its own
//! weights, so both signals are counted twice in the overall score.

use crate::quality::models::{
    DataQualityMetrics, FoodItemRecord, NutritionalField, NutritionalInfo, QualityIndicators,
    QualityLevel,
};

const OVERALL_INGREDIENTS_WEIGHT: f64 = 0.3;
const OVERALL_NUTRITIONAL_WEIGHT: f64 = 0.4;
const OVERALL_COMPLETENESS_WEIGHT: f64 = 0.3;

const BASIC_INFO_FIELD_WEIGHT: f64 = 0.1;
const COMPLETENESS_NUTRITIONAL_WEIGHT: f64 = 0.5;
const COMPLETENESS_INGREDIENTS_WEIGHT: f64 = 0.2;

/// Ingredient count at which a list is considered detailed.
pub const DETAILED_INGREDIENT_COUNT: usize = 6;
/// Ingredient count at which a list is considered exhaustive.
pub const EXHAUSTIVE_INGREDIENT_COUNT: usize = 15;

/// Score an ingredient list by its length.
///
/// ```text
/// 0      -> 0.0
/// 1..=2  -> 0.2
/// 3..=5  -> 0.5
/// 6..=14 -> 0.7
/// 15..   -> 1.0
/// ```
pub fn calculate_ingredients_score(ingredients: &[String]) -> (f64, usize) {
    let count = ingredients.len();

    let score = match count {
        0 => 0.0,
        1..=2 => 0.2,
        n if n >= EXHAUSTIVE_INGREDIENT_COUNT => 1.0,
        n if n >= DETAILED_INGREDIENT_COUNT => 0.7,
        _ => 0.5,
    };

    (score, count)
}

/// Weighted presence score over the ten tracked nutrient fields, capped at 1.0.
///
/// Returns the score and the number of present fields.
pub fn calculate_nutritional_score(nutritional_info: &NutritionalInfo) -> (f64, usize) {
    let mut raw = 0.0;
    let mut count = 0;

    for field in NutritionalField::ALL {
        if nutritional_info.is_present(field) {
            raw += field.tier().weight();
            count += 1;
        }
    }

    (raw.min(1.0), count)
}

/// Completeness of the whole record: basic identity fields, nutrition and ingredients.
pub fn calculate_completeness_score(food_item: &FoodItemRecord) -> f64 {
    let basic_info = [
        food_item.has_name(),
        food_item.has_brand(),
        food_item.has_barcode(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count() as f64
        * BASIC_INFO_FIELD_WEIGHT;

    let nutrition = &food_item.nutritional_info;
    let (nutritional_score, _) = calculate_nutritional_score(nutrition);
    let (ingredients_score, _) = calculate_ingredients_score(&nutrition.ingredients);

    basic_info
        + nutritional_score * COMPLETENESS_NUTRITIONAL_WEIGHT
        + ingredients_score * COMPLETENESS_INGREDIENTS_WEIGHT
}

/// Critical fields without a value, in [`NutritionalField::CRITICAL`] order.
pub fn identify_missing_critical_fields(nutritional_info: &NutritionalInfo) -> Vec<NutritionalField> {
    NutritionalField::CRITICAL
        .into_iter()
        .filter(|field| !nutritional_info.is_present(*field))
        .collect()
}

pub fn generate_quality_indicators(
    nutritional_info: &NutritionalInfo,
    ingredients: &[String],
) -> QualityIndicators {
    QualityIndicators {
        has_calories: nutritional_info.is_present(NutritionalField::CaloriesPer100g),
        has_protein: nutritional_info.is_present(NutritionalField::ProteinPercentage),
        has_fat: nutritional_info.is_present(NutritionalField::FatPercentage),
        has_fiber: nutritional_info.is_present(NutritionalField::FiberPercentage),
        has_moisture: nutritional_info.is_present(NutritionalField::MoisturePercentage),
        has_ingredients: !ingredients.is_empty(),
        has_allergens: !nutritional_info.allergens.is_empty(),
        has_vitamins: !nutritional_info.vitamins.is_empty(),
        has_minerals: !nutritional_info.minerals.is_empty(),
    }
}

/// Assess a food item and produce the full quality report.
pub fn assess_data_quality(food_item: &FoodItemRecord) -> DataQualityMetrics {
    let nutrition = &food_item.nutritional_info;
    let ingredients = nutrition.ingredients.as_slice();

    let (ingredients_score, ingredients_count) = calculate_ingredients_score(ingredients);
    let (nutritional_score, nutritional_fields_count) = calculate_nutritional_score(nutrition);
    let completeness_score = calculate_completeness_score(food_item);

    let overall_score = ingredients_score * OVERALL_INGREDIENTS_WEIGHT
        + nutritional_score * OVERALL_NUTRITIONAL_WEIGHT
        + completeness_score * OVERALL_COMPLETENESS_WEIGHT;

    DataQualityMetrics {
        overall_score,
        level: QualityLevel::from_score(overall_score),
        ingredients_score,
        nutritional_score,
        completeness_score,
        ingredients_count,
        nutritional_fields_count,
        missing_critical_fields: identify_missing_critical_fields(nutrition),
        quality_indicators: generate_quality_indicators(nutrition, ingredients),
    }
}
