use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::db::FoodItemRepository;
use crate::error::ServiceError;
use crate::quality::models::FoodItemRecord;
use crate::quality::scoring::assess_data_quality;
use crate::quality::summary::{format_quality_summary, QualitySummary};
use crate::service::QualityService;

/// Quality summary of one stored item, tagged with its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItemQualityReport {
    pub food_item_id: String,
    pub food_name: Option<String>,
    pub brand: Option<String>,
    #[serde(flatten)]
    pub summary: QualitySummary,
}

impl FoodItemQualityReport {
    pub fn from_record(record: &FoodItemRecord) -> Self {
        let metrics = assess_data_quality(record);
        Self {
            food_item_id: record.id.clone().unwrap_or_default(),
            food_name: record.name.clone(),
            brand: record.brand.clone(),
            summary: format_quality_summary(&metrics),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAssessment {
    pub results: Vec<FoodItemQualityReport>,
    pub not_found: Vec<String>,
    pub total_requested: usize,
    pub total_assessed: usize,
}

impl<R: FoodItemRepository> QualityService<R> {
    /// Assess a single stored food item.
    #[instrument(skip(self))]
    pub async fn assess_food_item(&self, id: &str) -> Result<FoodItemQualityReport, ServiceError> {
        let record = self
            .repository
            .get_food_item(id)
            .await?
            .ok_or_else(|| ServiceError::FoodItemNotFound(id.to_string()))?;

        let report = FoodItemQualityReport::from_record(&record);
        info!(
            food_item_id = id,
            score = report.summary.overall_score,
            level = %report.summary.quality_level,
            "Food item assessed"
        );
        Ok(report)
    }

    /// Assess several stored items in request order. Duplicate ids are
    /// assessed once; unknown ids are reported in `not_found`.
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn assess_multiple(&self, ids: &[String]) -> Result<BatchAssessment, ServiceError> {
        if ids.is_empty() {
            return Err(ServiceError::EmptyBatch);
        }
        let max = self.config.batch_limit;
        if ids.len() > max {
            return Err(ServiceError::BatchTooLarge {
                requested: ids.len(),
                max,
            });
        }

        let mut seen = HashSet::new();
        let unique: Vec<String> = ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect();

        let mut records: HashMap<String, FoodItemRecord> = self
            .repository
            .get_food_items(&unique)
            .await?
            .into_iter()
            .filter_map(|record| record.id.clone().map(|id| (id, record)))
            .collect();

        let mut results = Vec::with_capacity(unique.len());
        let mut not_found = Vec::new();
        for id in &unique {
            match records.remove(id) {
                Some(record) => results.push(FoodItemQualityReport::from_record(&record)),
                None => not_found.push(id.clone()),
            }
        }

        info!(
            assessed = results.len(),
            not_found = not_found.len(),
            "Batch assessment complete"
        );

        Ok(BatchAssessment {
            total_requested: unique.len(),
            total_assessed: results.len(),
            results,
            not_found,
        })
    }
}
