use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Scoring tier of a tracked nutritional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTier {
    Critical,
    Important,
    Minor,
}

impl FieldTier {
    /// Contribution of one present field of this tier to the nutritional score.
    pub fn weight(self) -> f64 {
        match self {
            Self::Critical => 0.4,
            Self::Important => 0.2,
            Self::Minor => 0.1,
        }
    }
}

/// The ten numeric nutritional fields tracked by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionalField {
    #[serde(rename = "calories_per_100g")]
    CaloriesPer100g,
    ProteinPercentage,
    FatPercentage,
    FiberPercentage,
    MoisturePercentage,
    AshPercentage,
    CarbohydratesPercentage,
    SodiumPercentage,
    SugarsPercentage,
    SaturatedFatPercentage,
}

impl NutritionalField {
    /// Critical fields, in the order missing fields are reported.
    pub const CRITICAL: [Self; 5] = [
        Self::CaloriesPer100g,
        Self::ProteinPercentage,
        Self::FatPercentage,
        Self::FiberPercentage,
        Self::MoisturePercentage,
    ];

    pub const ALL: [Self; 10] = [
        Self::CaloriesPer100g,
        Self::ProteinPercentage,
        Self::FatPercentage,
        Self::FiberPercentage,
        Self::MoisturePercentage,
        Self::AshPercentage,
        Self::CarbohydratesPercentage,
        Self::SodiumPercentage,
        Self::SugarsPercentage,
        Self::SaturatedFatPercentage,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::CaloriesPer100g => "calories_per_100g",
            Self::ProteinPercentage => "protein_percentage",
            Self::FatPercentage => "fat_percentage",
            Self::FiberPercentage => "fiber_percentage",
            Self::MoisturePercentage => "moisture_percentage",
            Self::AshPercentage => "ash_percentage",
            Self::CarbohydratesPercentage => "carbohydrates_percentage",
            Self::SodiumPercentage => "sodium_percentage",
            Self::SugarsPercentage => "sugars_percentage",
            Self::SaturatedFatPercentage => "saturated_fat_percentage",
        }
    }

    pub fn tier(self) -> FieldTier {
        match self {
            Self::CaloriesPer100g
            | Self::ProteinPercentage
            | Self::FatPercentage
            | Self::FiberPercentage
            | Self::MoisturePercentage => FieldTier::Critical,
            Self::AshPercentage | Self::CarbohydratesPercentage => FieldTier::Important,
            Self::SodiumPercentage | Self::SugarsPercentage | Self::SaturatedFatPercentage => {
                FieldTier::Minor
            }
        }
    }
}

impl fmt::Display for NutritionalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stored nutrient value. Upstream rows mostly carry numbers or free text
/// (e.g. `"12.5"` or `""`), but any non-null value is kept: presence is all
/// the scorer cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NutrientValue {
    Number(f64),
    Text(String),
    Other(Value),
}

/// Nutritional payload nested inside a food item.
///
/// Missing keys and explicit `null` both deserialize to `None` / empty lists.
/// List fields skip `null` entries and stringify scalars, so one odd entry
/// never discards the rest of the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_per_100g: Option<NutrientValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_percentage: Option<NutrientValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_percentage: Option<NutrientValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber_percentage: Option<NutrientValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture_percentage: Option<NutrientValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ash_percentage: Option<NutrientValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbohydrates_percentage: Option<NutrientValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium_percentage: Option<NutrientValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugars_percentage: Option<NutrientValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturated_fat_percentage: Option<NutrientValue>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub allergens: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub vitamins: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub minerals: Vec<String>,
}

impl NutritionalInfo {
    pub fn value(&self, field: NutritionalField) -> Option<&NutrientValue> {
        match field {
            NutritionalField::CaloriesPer100g => self.calories_per_100g.as_ref(),
            NutritionalField::ProteinPercentage => self.protein_percentage.as_ref(),
            NutritionalField::FatPercentage => self.fat_percentage.as_ref(),
            NutritionalField::FiberPercentage => self.fiber_percentage.as_ref(),
            NutritionalField::MoisturePercentage => self.moisture_percentage.as_ref(),
            NutritionalField::AshPercentage => self.ash_percentage.as_ref(),
            NutritionalField::CarbohydratesPercentage => self.carbohydrates_percentage.as_ref(),
            NutritionalField::SodiumPercentage => self.sodium_percentage.as_ref(),
            NutritionalField::SugarsPercentage => self.sugars_percentage.as_ref(),
            NutritionalField::SaturatedFatPercentage => self.saturated_fat_percentage.as_ref(),
        }
    }

    /// A field is present when it has any non-null value, including `0` and `""`.
    pub fn is_present(&self, field: NutritionalField) -> bool {
        self.value(field).is_some()
    }
}

/// A food item row as handed over by the record source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodItemRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_nutritional_info")]
    pub nutritional_info: NutritionalInfo,
    /// Legacy completeness value written by older importers. Never read by scoring.
    #[serde(default)]
    pub data_completeness: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl FoodItemRecord {
    pub fn has_name(&self) -> bool {
        is_filled(&self.name)
    }

    pub fn has_brand(&self) -> bool {
        is_filled(&self.brand)
    }

    pub fn has_barcode(&self) -> bool {
        is_filled(&self.barcode)
    }
}

fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Quality classification derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl QualityLevel {
    pub const EXCELLENT_THRESHOLD: f64 = 0.85;
    pub const GOOD_THRESHOLD: f64 = 0.65;
    pub const FAIR_THRESHOLD: f64 = 0.4;

    pub const ALL: [Self; 4] = [Self::Excellent, Self::Good, Self::Fair, Self::Poor];

    pub fn from_score(score: f64) -> Self {
        if score >= Self::EXCELLENT_THRESHOLD {
            Self::Excellent
        } else if score >= Self::GOOD_THRESHOLD {
            Self::Good
        } else if score >= Self::FAIR_THRESHOLD {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presence flags for the fields a reader of the product page looks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityIndicators {
    pub has_calories: bool,
    pub has_protein: bool,
    pub has_fat: bool,
    pub has_fiber: bool,
    pub has_moisture: bool,
    pub has_ingredients: bool,
    pub has_allergens: bool,
    pub has_vitamins: bool,
    pub has_minerals: bool,
}

/// Result of assessing one food item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityMetrics {
    pub overall_score: f64,
    pub level: QualityLevel,
    pub ingredients_score: f64,
    pub nutritional_score: f64,
    pub completeness_score: f64,
    pub ingredients_count: usize,
    pub nutritional_fields_count: usize,
    pub missing_critical_fields: Vec<NutritionalField>,
    pub quality_indicators: QualityIndicators,
}

/// Accepts an array (null entries dropped, scalars stringified), a
/// comma-separated string, or anything else as an empty list.
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let list = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                Value::Null | Value::Array(_) | Value::Object(_) => None,
            })
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };
    Ok(list)
}

/// A non-object payload (null, string, number) scores as empty nutrition.
fn lenient_nutritional_info<'de, D>(deserializer: D) -> Result<NutritionalInfo, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).map_err(serde::de::Error::custom),
        _ => Ok(NutritionalInfo::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_and_missing_keys_are_absent() {
        let info: NutritionalInfo = serde_json::from_value(serde_json::json!({
            "calories_per_100g": null,
            "ingredients": null,
            "protein_percentage": 24.0
        }))
        .unwrap();
        assert!(!info.is_present(NutritionalField::CaloriesPer100g));
        assert!(!info.is_present(NutritionalField::FatPercentage));
        assert!(info.is_present(NutritionalField::ProteinPercentage));
        assert!(info.ingredients.is_empty());
    }

    #[test]
    fn test_zero_and_empty_string_count_as_present() {
        let info: NutritionalInfo = serde_json::from_value(serde_json::json!({
            "fat_percentage": 0,
            "fiber_percentage": ""
        }))
        .unwrap();
        assert!(info.is_present(NutritionalField::FatPercentage));
        assert!(info.is_present(NutritionalField::FiberPercentage));
    }

    #[test]
    fn test_null_nutritional_info_defaults_to_empty() {
        let record: FoodItemRecord = serde_json::from_value(serde_json::json!({
            "name": "Kibble",
            "nutritional_info": null
        }))
        .unwrap();
        assert_eq!(record.nutritional_info, NutritionalInfo::default());
        assert!(record.has_name());
        assert!(!record.has_brand());
    }

    #[test]
    fn test_only_none_and_empty_are_missing_basic_info() {
        let record = FoodItemRecord {
            name: None,
            brand: Some("   ".to_string()),
            barcode: Some(String::new()),
            ..Default::default()
        };
        assert!(!record.has_name());
        assert!(record.has_brand());
        assert!(!record.has_barcode());
    }

    #[test]
    fn test_unexpected_values_still_count_as_present() {
        let info: NutritionalInfo = serde_json::from_value(serde_json::json!({
            "ash_percentage": true,
            "sodium_percentage": {"value": 0.3, "unit": "%"},
            "sugars_percentage": [1, 2],
            "protein_percentage": 25
        }))
        .unwrap();
        assert!(info.is_present(NutritionalField::AshPercentage));
        assert!(info.is_present(NutritionalField::SodiumPercentage));
        assert!(info.is_present(NutritionalField::SugarsPercentage));
        assert!(info.is_present(NutritionalField::ProteinPercentage));
        assert!(!info.is_present(NutritionalField::FatPercentage));
    }

    #[test]
    fn test_list_entries_are_tolerated() {
        let info: NutritionalInfo = serde_json::from_value(serde_json::json!({
            "ingredients": ["chicken", null, "rice", 42, {"name": "peas"}],
            "allergens": "chicken, , wheat",
            "vitamins": {"a": true},
            "minerals": 7
        }))
        .unwrap();
        assert_eq!(info.ingredients, vec!["chicken", "rice", "42"]);
        assert_eq!(info.allergens, vec!["chicken", "wheat"]);
        assert!(info.vitamins.is_empty());
        assert!(info.minerals.is_empty());
    }

    #[test]
    fn test_non_object_nutritional_info_is_empty() {
        let record: FoodItemRecord = serde_json::from_value(serde_json::json!({
            "name": "Kibble",
            "nutritional_info": "see label"
        }))
        .unwrap();
        assert_eq!(record.nutritional_info, NutritionalInfo::default());
    }

    #[test]
    fn test_field_names_serialize_as_keys() {
        let fields = vec![
            NutritionalField::CaloriesPer100g,
            NutritionalField::MoisturePercentage,
        ];
        let json = serde_json::to_value(fields).unwrap();
        assert_eq!(
            json,
            serde_json::json!(["calories_per_100g", "moisture_percentage"])
        );
        for field in NutritionalField::ALL {
            assert_eq!(serde_json::to_value(field).unwrap(), field.name());
        }
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(QualityLevel::from_score(0.85), QualityLevel::Excellent);
        assert_eq!(QualityLevel::from_score(0.849), QualityLevel::Good);
        assert_eq!(QualityLevel::from_score(0.65), QualityLevel::Good);
        assert_eq!(QualityLevel::from_score(0.4), QualityLevel::Fair);
        assert_eq!(QualityLevel::from_score(0.399), QualityLevel::Poor);
        assert_eq!(QualityLevel::from_score(0.0), QualityLevel::Poor);
    }

    #[test]
    fn test_tier_weights() {
        let critical = NutritionalField::ALL
            .iter()
            .filter(|f| f.tier() == FieldTier::Critical)
            .count();
        assert_eq!(critical, NutritionalField::CRITICAL.len());
        assert_eq!(NutritionalField::AshPercentage.tier().weight(), 0.2);
        assert_eq!(NutritionalField::SugarsPercentage.tier().weight(), 0.1);
    }
}
