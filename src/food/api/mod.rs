pub mod traits;
pub mod usda;

// Re-export common types
pub use traits::FoodProvider;
pub use usda::{FoodApiError, FoodClass, FoodPortion, FoodRecord, NutrientEntry, NutrientInfo, UsdaClient};
