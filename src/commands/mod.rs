use chrono::{Local, NaiveDate};
use colored::Colorize;
use std::io;
use thiserror::Error;

use crate::database::{DailyLogStore, StoreError};
use crate::food::api::{FoodApiError, FoodProvider};
use crate::food::units::{PortionInputError, UnitError};

pub mod food_cmd;
pub mod input;
pub mod menu;

pub use input::LineReader;
pub use menu::{Menu, MenuAction, MenuItem, MenuOutcome};

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("API Error Fetching Food: {0}")]
    Api(#[from] FoodApiError),
    #[error("Unit conversion error: {0}")]
    Units(#[from] UnitError),
    #[error("{0}")]
    Portion(#[from] PortionInputError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Input error: {0}")]
    Input(#[from] io::Error),
    #[error("Input closed")]
    InputClosed,
}

pub struct CommandHandler {
    provider: Box<dyn FoodProvider>,
    store: DailyLogStore,
    menu: Menu,
}

impl CommandHandler {
    pub fn new(provider: Box<dyn FoodProvider>, store: DailyLogStore) -> Self {
        Self {
            provider,
            store,
            menu: Menu::main_menu(),
        }
    }

    pub fn store(&self) -> &DailyLogStore {
        &self.store
    }

    /// Shows the menu and dispatches commands until Quit is chosen or input
    /// ends.
    pub async fn run(&self, reader: &mut dyn LineReader) -> Result<(), CommandError> {
        loop {
            println!("{}", self.menu.render());

            let Some(line) = reader.read_line("> ")? else {
                break;
            };
            let Some(action) = self.menu.select(&line) else {
                continue;
            };

            if self.handle_action(action, reader).await? == MenuOutcome::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Runs one menu action. Failures of the action itself are printed and
    /// the menu continues; only a broken input stream is returned.
    pub async fn handle_action(
        &self,
        action: MenuAction,
        reader: &mut dyn LineReader,
    ) -> Result<MenuOutcome, CommandError> {
        let today = today();
        let result = match action {
            MenuAction::Quit => return Ok(MenuOutcome::Quit),
            MenuAction::AddFoodItem => {
                food_cmd::add_food_item(self.provider.as_ref(), &self.store, reader, today)
                    .await
                    .map(|_| ())
            }
            MenuAction::ShowNutritionalSummary => {
                food_cmd::show_nutritional_summary(&self.store, today).map(|_| ())
            }
        };

        match result {
            Ok(()) => Ok(MenuOutcome::Continue),
            Err(CommandError::Input(e)) => Err(CommandError::Input(e)),
            Err(CommandError::InputClosed) => {
                println!("{}", "Cancelled".red());
                Ok(MenuOutcome::Continue)
            }
            Err(e) => {
                println!("{}", e.to_string().red());
                Ok(MenuOutcome::Continue)
            }
        }
    }
}

/// Local calendar date; daily logs are keyed by it.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
