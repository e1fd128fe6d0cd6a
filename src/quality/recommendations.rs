//! Canned improvement suggestions derived from a quality report.

use crate::quality::models::DataQualityMetrics;
use crate::quality::scoring::DETAILED_INGREDIENT_COUNT;

/// Below this many present nutrient fields the basic panel is considered absent.
const MIN_BASIC_NUTRITIONAL_FIELDS: usize = 3;

/// Build recommendations for a report. Rules are evaluated in a fixed order,
/// so the output is stable for a given report.
pub fn get_quality_recommendations(metrics: &DataQualityMetrics) -> Vec<String> {
    let indicators = &metrics.quality_indicators;
    let mut recommendations = Vec::new();

    if !indicators.has_ingredients {
        recommendations.push("Add ingredient list for better product transparency".to_string());
    }

    if metrics.nutritional_fields_count < MIN_BASIC_NUTRITIONAL_FIELDS {
        recommendations
            .push("Add basic nutritional information (calories, protein, fat)".to_string());
    }

    if !metrics.missing_critical_fields.is_empty() {
        let names: Vec<&str> = metrics
            .missing_critical_fields
            .iter()
            .map(|field| field.name())
            .collect();
        recommendations.push(format!(
            "Fill in missing critical nutritional data ({} fields): {}",
            names.len(),
            names.join(", ")
        ));
    }

    if !indicators.has_allergens {
        recommendations.push("Include allergen information for pet safety".to_string());
    }

    if indicators.has_ingredients && metrics.ingredients_count < DETAILED_INGREDIENT_COUNT {
        recommendations
            .push("Expand the ingredient list to cover the complete formulation".to_string());
    }

    if !indicators.has_vitamins {
        recommendations.push("Add vitamin content information".to_string());
    }

    if !indicators.has_minerals {
        recommendations.push("Add mineral content information".to_string());
    }

    recommendations
}
