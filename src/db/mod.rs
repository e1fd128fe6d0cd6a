pub mod store;

use anyhow::Result;
use async_trait::async_trait;

use crate::quality::models::FoodItemRecord;

/// Read access to stored food items. The quality scorer never touches this;
/// the service layer fetches records through it and hands them to the scorer.
#[async_trait]
pub trait FoodItemRepository: Send + Sync {
    /// Fetch a single food item by id.
    async fn get_food_item(&self, id: &str) -> Result<Option<FoodItemRecord>>;

    /// Fetch every food item whose id is in `ids`. Unknown ids are skipped.
    async fn get_food_items(&self, ids: &[String]) -> Result<Vec<FoodItemRecord>>;

    /// Most recently created food items, newest first.
    async fn list_food_items(&self, limit: usize) -> Result<Vec<FoodItemRecord>>;
}
