use colored::{Color, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddFoodItem,
    ShowNutritionalSummary,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Continue,
    Quit,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: &'static str,
    pub color: Color,
    pub action: MenuAction,
}

impl MenuItem {
    pub fn new(label: &'static str, color: Color, action: MenuAction) -> Self {
        Self { label, color, action }
    }

    /// "Add Food Item" renders as "[Aa]dd Food Item".
    pub fn hotkey_label(&self) -> String {
        let mut chars = self.label.chars();
        match chars.next() {
            Some(first) => format!(
                "[{}{}]{}",
                first.to_uppercase(),
                first.to_lowercase(),
                chars.as_str()
            ),
            None => String::new(),
        }
    }
}

/// Ordered menu; a Quit item is always appended last.
#[derive(Debug, Clone)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(mut items: Vec<MenuItem>) -> Self {
        items.push(MenuItem::new("Quit", Color::Red, MenuAction::Quit));
        Self { items }
    }

    pub fn main_menu() -> Self {
        Self::new(vec![
            MenuItem::new("Add Food Item", Color::Green, MenuAction::AddFoodItem),
            MenuItem::new(
                "Show Nutritional Summary",
                Color::Yellow,
                MenuAction::ShowNutritionalSummary,
            ),
        ])
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn render(&self) -> String {
        self.items
            .iter()
            .map(|item| item.hotkey_label().color(item.color).to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// First item, in declared order, whose label starts with `input`
    /// case-insensitively.
    ///
    /// Blank input is a prefix of every label but selects nothing, so that
    /// pressing Enter alone only redraws the menu instead of starting an add.
    pub fn select(&self, input: &str) -> Option<MenuAction> {
        let command = input.trim().to_lowercase();
        if command.is_empty() {
            return None;
        }
        self.items
            .iter()
            .find(|item| item.label.to_lowercase().starts_with(&command))
            .map(|item| item.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_is_appended() {
        let menu = Menu::main_menu();
        let labels: Vec<&str> = menu.items().iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["Add Food Item", "Show Nutritional Summary", "Quit"]);
    }

    #[test]
    fn test_prefix_selection() {
        let menu = Menu::main_menu();
        assert_eq!(menu.select("a"), Some(MenuAction::AddFoodItem));
        assert_eq!(menu.select("SHOW nut"), Some(MenuAction::ShowNutritionalSummary));
        assert_eq!(menu.select(" q "), Some(MenuAction::Quit));
        assert_eq!(menu.select("quit"), Some(MenuAction::Quit));
    }

    #[test]
    fn test_non_matching_and_blank_input_select_nothing() {
        let menu = Menu::main_menu();
        assert_eq!(menu.select("x"), None);
        assert_eq!(menu.select("add food items"), None);
        assert_eq!(menu.select(""), None);
        assert_eq!(menu.select("   "), None);
    }

    #[test]
    fn test_ambiguous_prefix_takes_first_declared() {
        let menu = Menu::new(vec![
            MenuItem::new("Summary", Color::Yellow, MenuAction::ShowNutritionalSummary),
            MenuItem::new("Scan", Color::Green, MenuAction::AddFoodItem),
        ]);
        assert_eq!(menu.select("s"), Some(MenuAction::ShowNutritionalSummary));
        assert_eq!(menu.select("sc"), Some(MenuAction::AddFoodItem));
    }

    #[test]
    fn test_hotkey_label() {
        let item = MenuItem::new("Add Food Item", Color::Green, MenuAction::AddFoodItem);
        assert_eq!(item.hotkey_label(), "[Aa]dd Food Item");
    }
}
