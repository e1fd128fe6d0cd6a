//! Service health state reported by `GET /api/health`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

/// Shared health state updated by the request handlers.
#[derive(Clone)]
pub struct HealthState {
    inner: Arc<RwLock<HealthData>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: i64,
    pub assessments_served: u64,
    pub last_assessment_at: Option<DateTime<Utc>>,
}

impl HealthState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HealthData {
                status: "ok".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                started_at: Utc::now(),
                uptime_seconds: 0,
                assessments_served: 0,
                last_assessment_at: None,
            })),
        }
    }

    pub async fn record_assessments(&self, count: usize) {
        if count == 0 {
            return;
        }
        let mut data = self.inner.write().await;
        data.assessments_served += count as u64;
        data.last_assessment_at = Some(Utc::now());
    }

    pub async fn snapshot(&self) -> HealthData {
        let mut data = self.inner.read().await.clone();
        data.uptime_seconds = (Utc::now() - data.started_at).num_seconds();
        data
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}
