use chrono::NaiveDate;
use colored::Colorize;
use log::warn;

use super::input::LineReader;
use super::CommandError;
use crate::database::{DailyLogStore, LogEntry};
use crate::food::analysis::{consumed_nutrients, MacroSummary, NutrientTotals};
use crate::food::api::FoodProvider;
use crate::food::units::{resolve_units, PortionInputError};

fn prompt(reader: &mut dyn LineReader, text: &str) -> Result<String, CommandError> {
    let line = reader
        .read_line(&text.green().to_string())?
        .ok_or(CommandError::InputClosed)?;
    Ok(line.trim().to_string())
}

/// Looks up a food, asks how much was eaten and for which meal, and appends
/// the scaled nutrients to the log for `date`.
pub async fn add_food_item(
    provider: &dyn FoodProvider,
    store: &DailyLogStore,
    reader: &mut dyn LineReader,
    date: NaiveDate,
) -> Result<LogEntry, CommandError> {
    let fdc_id = prompt(reader, "FDC ID: ")?;
    let food = provider.get_food(&fdc_id).await?;

    let units = resolve_units(&food)?;
    if units.is_empty() {
        warn!("Food {} reports no usable serving units", fdc_id);
    }

    let quantity = loop {
        let input = prompt(reader, &format!("Amount ({}): ", units))?;
        match units.parse_input(&input) {
            Ok(quantity) => break quantity,
            Err(e) => println!("{}", e.to_string().red()),
        }
    };

    let meal_name = prompt(reader, "Meal Name: ")?;

    let portions = units
        .portions(&quantity)
        .ok_or(PortionInputError::InvalidUnit)?;

    let entry = LogEntry {
        fdc_id,
        amount_with_unit: quantity,
        meal_name,
        nutrients: consumed_nutrients(&food, portions),
    };

    store.append(date, &entry)?;
    Ok(entry)
}

/// Totals everything logged on `date` and prints calories and macros.
pub fn show_nutritional_summary(
    store: &DailyLogStore,
    date: NaiveDate,
) -> Result<MacroSummary, CommandError> {
    let entries = store.read_day(date)?;
    let totals = NutrientTotals::from_entries(&entries);
    let summary = MacroSummary::from_totals(&totals);

    println!("{}", format!("Calories: {:.1}", summary.calories).red());
    println!("{}", format!("Carbohydrates: {:.1} g", summary.carbohydrate).yellow());
    println!("{}", format!("Protein: {:.1} g", summary.protein).green());
    println!("{}", format!("Fat: {:.1} g", summary.fat).blue());

    Ok(summary)
}
