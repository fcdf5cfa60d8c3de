use async_trait::async_trait;

use super::usda::{FoodApiError, FoodRecord};

/// Source of food composition records, keyed by FDC ID.
#[async_trait]
pub trait FoodProvider: Send + Sync {
    async fn get_food(&self, fdc_id: &str) -> Result<FoodRecord, FoodApiError>;
}
