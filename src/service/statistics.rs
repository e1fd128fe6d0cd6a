//! Aggregate views over many assessed items.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::db::FoodItemRepository;
use crate::error::ServiceError;
use crate::quality::models::{DataQualityMetrics, NutritionalField, QualityLevel};
use crate::quality::scoring::assess_data_quality;
use crate::quality::summary::round_score;
use crate::service::QualityService;

/// Level distribution and mean scores over a sample of stored items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityStatistics {
    pub total_assessed: usize,
    pub average_score: f64,
    pub level_distribution: BTreeMap<QualityLevel, usize>,
    pub level_percentages: BTreeMap<QualityLevel, f64>,
    pub average_ingredients_score: f64,
    pub average_nutritional_score: f64,
    pub average_completeness_score: f64,
    pub items_missing_critical_fields: usize,
}

impl QualityStatistics {
    pub fn from_metrics(metrics: &[DataQualityMetrics]) -> Self {
        let mut level_distribution: BTreeMap<QualityLevel, usize> =
            QualityLevel::ALL.into_iter().map(|level| (level, 0)).collect();
        for m in metrics {
            *level_distribution.entry(m.level).or_default() += 1;
        }

        let total = metrics.len();
        let level_percentages = level_distribution
            .iter()
            .map(|(level, count)| (*level, percentage(*count, total)))
            .collect();

        let mean = |score: fn(&DataQualityMetrics) -> f64| {
            if total == 0 {
                0.0
            } else {
                round_score(metrics.iter().map(score).sum::<f64>() / total as f64)
            }
        };

        Self {
            total_assessed: total,
            average_score: mean(|m| m.overall_score),
            level_distribution,
            level_percentages,
            average_ingredients_score: mean(|m| m.ingredients_score),
            average_nutritional_score: mean(|m| m.nutritional_score),
            average_completeness_score: mean(|m| m.completeness_score),
            items_missing_critical_fields: metrics
                .iter()
                .filter(|m| !m.missing_critical_fields.is_empty())
                .count(),
        }
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

/// A stored item scoring below the requested threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowQualityItem {
    pub food_item_id: String,
    pub food_name: Option<String>,
    pub brand: Option<String>,
    pub overall_score: f64,
    pub quality_level: QualityLevel,
    pub missing_critical_fields: Vec<NutritionalField>,
}

impl<R: FoodItemRepository> QualityService<R> {
    /// Assess the most recent `sample_size` items (capped by configuration).
    #[instrument(skip(self))]
    pub async fn quality_statistics(
        &self,
        sample_size: usize,
    ) -> Result<QualityStatistics, ServiceError> {
        if sample_size == 0 {
            return Err(ServiceError::InvalidSampleSize(sample_size));
        }
        let sample_size = sample_size.min(self.config.statistics_max_sample);

        let records = self.repository.list_food_items(sample_size).await?;
        let metrics: Vec<DataQualityMetrics> = records.iter().map(assess_data_quality).collect();
        let stats = QualityStatistics::from_metrics(&metrics);

        info!(
            total = stats.total_assessed,
            average_score = stats.average_score,
            "Quality statistics computed"
        );
        Ok(stats)
    }

    /// Items whose recomputed overall score is strictly below `threshold`,
    /// worst first. Uses the configured default threshold when none is given.
    #[instrument(skip(self))]
    pub async fn find_low_quality_items(
        &self,
        threshold: Option<f64>,
        limit: usize,
    ) -> Result<Vec<LowQualityItem>, ServiceError> {
        let threshold = threshold.unwrap_or(self.config.default_low_quality_threshold);
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ServiceError::InvalidThreshold(threshold));
        }

        let records = self
            .repository
            .list_food_items(self.config.low_quality_scan_limit)
            .await?;
        let scanned = records.len();

        let mut items: Vec<(f64, LowQualityItem)> = records
            .into_iter()
            .filter_map(|record| {
                let metrics = assess_data_quality(&record);
                (metrics.overall_score < threshold).then(|| {
                    let item = LowQualityItem {
                        food_item_id: record.id.unwrap_or_default(),
                        food_name: record.name,
                        brand: record.brand,
                        overall_score: round_score(metrics.overall_score),
                        quality_level: metrics.level,
                        missing_critical_fields: metrics.missing_critical_fields,
                    };
                    (metrics.overall_score, item)
                })
            })
            .collect();

        items.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        items.truncate(limit);

        info!(scanned, found = items.len(), threshold, "Low quality scan complete");
        Ok(items.into_iter().map(|(_, item)| item).collect())
    }
}
