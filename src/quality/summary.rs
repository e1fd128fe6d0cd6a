use serde::{Deserialize, Serialize};

use crate::quality::models::{DataQualityMetrics, NutritionalField, QualityIndicators, QualityLevel};
use crate::quality::recommendations::get_quality_recommendations;

/// Client-facing view of a quality report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitySummary {
    pub overall_score: f64,
    pub quality_level: QualityLevel,
    pub breakdown: ScoreBreakdown,
    pub ingredients_count: usize,
    pub nutritional_fields_count: usize,
    pub missing_critical_fields: Vec<NutritionalField>,
    pub quality_indicators: QualityIndicators,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub ingredients_score: f64,
    pub nutritional_score: f64,
    pub completeness_score: f64,
}

pub fn format_quality_summary(metrics: &DataQualityMetrics) -> QualitySummary {
    QualitySummary {
        overall_score: round_score(metrics.overall_score),
        quality_level: metrics.level,
        breakdown: ScoreBreakdown {
            ingredients_score: round_score(metrics.ingredients_score),
            nutritional_score: round_score(metrics.nutritional_score),
            completeness_score: round_score(metrics.completeness_score),
        },
        ingredients_count: metrics.ingredients_count,
        nutritional_fields_count: metrics.nutritional_fields_count,
        missing_critical_fields: metrics.missing_critical_fields.clone(),
        quality_indicators: metrics.quality_indicators,
        recommendations: get_quality_recommendations(metrics),
    }
}

/// Clamp to [0, 1] and round to three decimals.
pub fn round_score(score: f64) -> f64 {
    (score.clamp(0.0, 1.0) * 1000.0).round() / 1000.0
}
