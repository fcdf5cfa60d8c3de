use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::database::LogEntry;
use crate::food::api::FoodRecord;

pub const CARBOHYDRATE: &str = "Carbohydrate, by difference";
pub const FAT: &str = "Total lipid (fat)";
pub const PROTEIN: &str = "Protein";

const CALORIES_PER_GRAM_CARBOHYDRATE: f64 = 4.0;
const CALORIES_PER_GRAM_PROTEIN: f64 = 4.0;
const CALORIES_PER_GRAM_FAT: f64 = 9.0;

/// A nutrient amount with its unit, stored on disk as `[amount, "unit"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, String)", into = "(f64, String)")]
pub struct NutrientAmount {
    pub amount: f64,
    pub unit: String,
}

impl From<(f64, String)> for NutrientAmount {
    fn from((amount, unit): (f64, String)) -> Self {
        Self { amount, unit }
    }
}

impl From<NutrientAmount> for (f64, String) {
    fn from(nutrient: NutrientAmount) -> Self {
        (nutrient.amount, nutrient.unit)
    }
}

/// Scales every nutrient with a reported amount by `portions` (count of 100g
/// portions eaten). Nutrients without an amount are left out.
pub fn consumed_nutrients(food: &FoodRecord, portions: f64) -> BTreeMap<String, NutrientAmount> {
    food.food_nutrients
        .iter()
        .filter_map(|entry| {
            entry.amount.map(|amount| {
                (
                    entry.nutrient.name.clone(),
                    NutrientAmount {
                        amount: amount * portions,
                        unit: entry.nutrient.unit_name.clone(),
                    },
                )
            })
        })
        .collect()
}

/// Per-nutrient sums across a day's entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutrientTotals {
    totals: BTreeMap<String, NutrientAmount>,
}

impl NutrientTotals {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a LogEntry>) -> Self {
        let mut totals = Self::default();
        for entry in entries {
            totals.add(entry);
        }
        totals
    }

    /// Adds an entry's nutrients. The unit recorded for a nutrient is the one
    /// from the first entry that carried it.
    pub fn add(&mut self, entry: &LogEntry) {
        for (name, nutrient) in &entry.nutrients {
            self.totals
                .entry(name.clone())
                .and_modify(|total| total.amount += nutrient.amount)
                .or_insert_with(|| nutrient.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&NutrientAmount> {
        self.totals.get(name)
    }

    pub fn amount(&self, name: &str) -> f64 {
        self.get(name).map(|n| n.amount).unwrap_or(0.0)
    }
}

/// Daily macro figures, in grams, plus the calories derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroSummary {
    pub calories: f64,
    pub carbohydrate: f64,
    pub protein: f64,
    pub fat: f64,
}

impl MacroSummary {
    pub fn from_totals(totals: &NutrientTotals) -> Self {
        let carbohydrate = totals.amount(CARBOHYDRATE);
        let protein = totals.amount(PROTEIN);
        let fat = totals.amount(FAT);

        Self {
            calories: carbohydrate * CALORIES_PER_GRAM_CARBOHYDRATE
                + protein * CALORIES_PER_GRAM_PROTEIN
                + fat * CALORIES_PER_GRAM_FAT,
            carbohydrate,
            protein,
            fat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::api::{NutrientEntry, NutrientInfo};
    use crate::food::units::Quantity;

    fn nutrient(name: &str, unit: &str, amount: Option<f64>) -> NutrientEntry {
        NutrientEntry {
            nutrient: NutrientInfo {
                name: name.to_string(),
                unit_name: unit.to_string(),
            },
            amount,
        }
    }

    fn entry(nutrients: &[(&str, f64, &str)]) -> LogEntry {
        LogEntry {
            fdc_id: "1".to_string(),
            amount_with_unit: Quantity {
                amount: 1.0,
                unit: "g".to_string(),
            },
            meal_name: "lunch".to_string(),
            nutrients: nutrients
                .iter()
                .map(|(name, amount, unit)| {
                    (
                        name.to_string(),
                        NutrientAmount {
                            amount: *amount,
                            unit: unit.to_string(),
                        },
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_consumed_nutrients_scales_and_skips_missing() {
        let food = FoodRecord {
            food_nutrients: vec![
                nutrient(PROTEIN, "G", Some(12.0)),
                nutrient("Vitamin D", "IU", None),
                nutrient("Sodium, Na", "MG", Some(400.0)),
            ],
            ..FoodRecord::default()
        };

        let consumed = consumed_nutrients(&food, 0.25);

        assert_eq!(consumed.len(), 2);
        assert_eq!(consumed[PROTEIN].amount, 3.0);
        assert_eq!(consumed[PROTEIN].unit, "G");
        assert_eq!(consumed["Sodium, Na"].amount, 100.0);
        assert!(!consumed.contains_key("Vitamin D"));
    }

    #[test]
    fn test_totals_sum_per_nutrient() {
        let entries = vec![entry(&[(PROTEIN, 10.0, "G")]), entry(&[(PROTEIN, 5.0, "G")])];

        let totals = NutrientTotals::from_entries(&entries);

        assert_eq!(totals.get(PROTEIN).unwrap().amount, 15.0);
    }

    #[test]
    fn test_totals_keep_first_unit() {
        let entries = vec![
            entry(&[("Iron, Fe", 2.0, "MG")]),
            entry(&[("Iron, Fe", 1.0, "mg")]),
        ];

        let totals = NutrientTotals::from_entries(&entries);

        assert_eq!(totals.get("Iron, Fe").unwrap().unit, "MG");
    }

    #[test]
    fn test_calories_from_macros() {
        let entries = vec![
            entry(&[(CARBOHYDRATE, 30.0, "G"), (PROTEIN, 20.0, "G")]),
            entry(&[(CARBOHYDRATE, 20.0, "G"), (FAT, 10.0, "G")]),
        ];

        let summary = MacroSummary::from_totals(&NutrientTotals::from_entries(&entries));

        assert_eq!(summary.carbohydrate, 50.0);
        assert_eq!(summary.protein, 20.0);
        assert_eq!(summary.fat, 10.0);
        assert_eq!(summary.calories, 370.0);
    }

    #[test]
    fn test_missing_macros_default_to_zero() {
        let summary = MacroSummary::from_totals(&NutrientTotals::default());
        assert_eq!(summary.calories, 0.0);
        assert_eq!(summary.fat, 0.0);
    }
}
