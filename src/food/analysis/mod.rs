pub mod nutrition;

pub use nutrition::{consumed_nutrients, MacroSummary, NutrientAmount, NutrientTotals};
