//! Assessment workflows over stored food items.
//!
//! Fetches records through a [`FoodItemRepository`] and runs them through the
//! quality scorer. All policy limits (batch size, sample caps) live here.

pub mod assessment;
pub mod statistics;

use crate::config::QualityConfig;
use crate::db::FoodItemRepository;

pub use assessment::{BatchAssessment, FoodItemQualityReport};
pub use statistics::{LowQualityItem, QualityStatistics};

pub struct QualityService<R> {
    repository: R,
    config: QualityConfig,
}

impl<R: FoodItemRepository> QualityService<R> {
    pub fn new(repository: R, config: QualityConfig) -> Self {
        Self { repository, config }
    }
}
