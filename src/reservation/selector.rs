use serde::{Deserialize, Serialize};

use crate::{core::types::TableRecord, floorplan::element::table_display_text};

pub const PLACEHOLDER_TEXT: &str = "Please select a table...";
pub const NO_TABLES_TEXT: &str = "No tables available.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectorOption {
    pub value: String,
    pub display_text: String,
    #[serde(default)]
    pub disabled: bool,
}

impl SelectorOption {
    pub fn new(value: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display_text: display_text.into(),
            disabled: false,
        }
    }

    fn placeholder(text: &str) -> Self {
        Self {
            value: String::new(),
            display_text: text.to_string(),
            disabled: true,
        }
    }

    /// Whether the display text names `number` as a whole token, so `"1"`
    /// matches `"Table 1"` but not `"Table 11"`.
    pub fn names_table_number(&self, number: &str) -> bool {
        let number = number.trim();
        !number.is_empty()
            && self
                .display_text
                .split(|ch: char| !ch.is_alphanumeric())
                .any(|token| token == number)
    }
}

/// The reservation form's table `<select>`: an ordered option list plus the
/// chosen value. Option values are unique.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSelector {
    options: Vec<SelectorOption>,
    value: String,
    disabled: bool,
}

impl TableSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder followed by one option per table, or a disabled selector
    /// when there is nothing to choose from.
    pub fn from_tables(tables: &[TableRecord]) -> Self {
        let mut selector = Self::new();
        if tables.is_empty() {
            selector.options.push(SelectorOption::placeholder(NO_TABLES_TEXT));
            selector.disabled = true;
            return selector;
        }

        selector.options.push(SelectorOption::placeholder(PLACEHOLDER_TEXT));
        for table in tables {
            if selector.find_by_value(&table.id).is_some() {
                tracing::warn!(table_id = %table.id, "duplicate table id in payload");
                continue;
            }
            selector.options.push(SelectorOption::new(
                table.id.clone(),
                table_display_text(&table.table_number),
            ));
        }
        selector
    }

    pub fn options(&self) -> &[SelectorOption] {
        &self.options
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Raw value, empty while the placeholder is showing.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn selected_value(&self) -> Option<&str> {
        Some(self.value.as_str()).filter(|value| !value.is_empty())
    }

    pub fn selected_option(&self) -> Option<&SelectorOption> {
        let value = self.selected_value()?;
        self.find_by_value(value)
    }

    pub fn find_by_value(&self, value: &str) -> Option<&SelectorOption> {
        self.options.iter().find(|option| option.value == value)
    }

    pub fn find_by_table_number(&self, number: &str) -> Option<&SelectorOption> {
        self.options
            .iter()
            .filter(|option| !option.value.is_empty())
            .find(|option| option.names_table_number(number))
    }

    /// Appends `option` unless its value is already present. Returns the value
    /// now carried by the selector.
    pub fn ensure_option(&mut self, option: SelectorOption) -> String {
        if self.find_by_value(&option.value).is_none() {
            tracing::debug!(value = %option.value, "adding table option from floor plan");
            self.options.push(option.clone());
        }
        option.value
    }

    /// Chooses `value` if an option carries it; unknown values leave the
    /// selector untouched.
    pub fn select(&mut self, value: &str) -> bool {
        if self.find_by_value(value).is_none() {
            return false;
        }
        self.value = value.to_string();
        true
    }

    /// Back to the placeholder, as a form reset does.
    pub fn reset(&mut self) {
        self.value.clear();
    }
}
