use thiserror::Error;

/// Errors surfaced by the assessment service. The scorer itself never fails;
/// these cover lookups and caller input only.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Food item not found: {0}")]
    FoodItemNotFound(String),

    #[error("No food item ids provided")]
    EmptyBatch,

    #[error("Maximum {max} items per batch, got {requested}")]
    BatchTooLarge { requested: usize, max: usize },

    #[error("Threshold must be between 0 and 1, got {0}")]
    InvalidThreshold(f64),

    #[error("Sample size must be at least 1, got {0}")]
    InvalidSampleSize(usize),

    #[error("Food item repository failed: {0:#}")]
    Repository(#[from] anyhow::Error),
}

impl ServiceError {
    /// Whether the error was caused by the caller's input rather than the backend.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Repository(_))
    }
}
