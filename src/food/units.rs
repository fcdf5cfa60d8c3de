//! Resolution of the units a food can be measured in.
//!
//! FoodData Central reports nutrients per 100g. A [`UnitTable`] maps each
//! unit label the user may type to the number of units that make up one
//! 100g basis, so `amount / scale` is the count of 100g portions eaten.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::api::{FoodClass, FoodRecord};

const BASIS_SCALE: f64 = 100.0;

#[derive(Error, Debug, PartialEq)]
pub enum UnitError {
    #[error("Could not parse serving amount in '{0}'")]
    UnparseableAmount(String),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortionInputError {
    #[error("Invalid Unit")]
    InvalidUnit,
    #[error("Invalid Amount")]
    InvalidAmount,
}

/// An amount paired with the unit label it was entered in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, String)", into = "(f64, String)")]
pub struct Quantity {
    pub amount: f64,
    pub unit: String,
}

impl From<(f64, String)> for Quantity {
    fn from((amount, unit): (f64, String)) -> Self {
        Self { amount, unit }
    }
}

impl From<Quantity> for (f64, String) {
    fn from(quantity: Quantity) -> Self {
        (quantity.amount, quantity.unit)
    }
}

/// Unit label to scale, in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitTable {
    entries: Vec<(String, f64)>,
}

impl UnitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `unit`. A label that is already present keeps its position
    /// but takes the new scale.
    pub fn insert(&mut self, unit: impl Into<String>, scale: f64) {
        let unit = unit.into();
        match self.entries.iter_mut().find(|(label, _)| *label == unit) {
            Some(entry) => entry.1 = scale,
            None => self.entries.push((unit, scale)),
        }
    }

    pub fn scale(&self, unit: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(label, _)| label == unit)
            .map(|(_, scale)| *scale)
    }

    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of 100g portions represented by `quantity`.
    pub fn portions(&self, quantity: &Quantity) -> Option<f64> {
        self.scale(&quantity.unit).map(|scale| quantity.amount / scale)
    }

    /// Parses "amount unit" input against this table. The unit is checked
    /// before the amount.
    pub fn parse_input(&self, input: &str) -> Result<Quantity, PortionInputError> {
        let (amount, unit) = split_amount_and_unit(input);

        if self.scale(unit).is_none() {
            return Err(PortionInputError::InvalidUnit);
        }

        let amount = amount
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
            .ok_or(PortionInputError::InvalidAmount)?;

        Ok(Quantity {
            amount,
            unit: unit.to_string(),
        })
    }
}

impl fmt::Display for UnitTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units: Vec<&str> = self.units().collect();
        write!(f, "{}", units.join(" / "))
    }
}

/// Splits text like "1.5 large slice" into ("1.5", "large slice").
pub fn split_amount_and_unit(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.find(char::is_whitespace) {
        Some(idx) => (&text[..idx], text[idx..].trim()),
        None => (text, ""),
    }
}

// A zero or missing weight yields a scale that cannot be logged.
fn insert_checked(table: &mut UnitTable, unit: &str, scale: f64) {
    if scale.is_finite() && scale > 0.0 {
        table.insert(unit, scale);
    } else {
        warn!("Ignoring unit '{}' with unusable scale {}", unit, scale);
    }
}

/// Builds the unit table for `food`.
///
/// Branded serving units are registered first, then discrete food portions,
/// so a portion modifier overwrites a branded unit with the same label.
pub fn resolve_units(food: &FoodRecord) -> Result<UnitTable, UnitError> {
    let mut table = UnitTable::new();

    if food.food_class == FoodClass::Branded {
        if let Some(unit) = &food.serving_size_unit {
            table.insert(unit.clone(), BASIS_SCALE);
        }

        if let (Some(household), Some(serving_size)) =
            (&food.household_serving_full_text, food.serving_size)
        {
            let (amount, unit) = split_amount_and_unit(household);
            let amount = amount
                .parse::<f64>()
                .map_err(|_| UnitError::UnparseableAmount(household.clone()))?;
            insert_checked(&mut table, unit, amount / serving_size * BASIS_SCALE);
        }
    }

    if !food.food_portions.is_empty() {
        table.insert("g", BASIS_SCALE);
        for portion in &food.food_portions {
            insert_checked(
                &mut table,
                &portion.modifier,
                1.0 / (portion.gram_weight / portion.amount / BASIS_SCALE),
            );
        }
    }

    Ok(table)
}
