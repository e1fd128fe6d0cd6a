pub mod models;
pub mod recommendations;
pub mod scoring;
pub mod summary;

pub use models::{
    DataQualityMetrics, FieldTier, FoodItemRecord, NutrientValue, NutritionalField,
    NutritionalInfo, QualityIndicators, QualityLevel,
};
pub use recommendations::get_quality_recommendations;
pub use scoring::{
    assess_data_quality, calculate_completeness_score, calculate_ingredients_score,
    calculate_nutritional_score, generate_quality_indicators, identify_missing_critical_fields,
};
pub use summary::{format_quality_summary, QualitySummary, ScoreBreakdown};
