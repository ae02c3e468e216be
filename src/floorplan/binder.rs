use serde::{Deserialize, Serialize};

use crate::{
    floorplan::{
        element::{table_display_text, ElementKind},
        renderer::LayoutContainer,
    },
    reservation::selector::{SelectorOption, TableSelector},
};

/// The table the guest picked on the floor plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Selection {
    /// Index of the element in the canonical layout.
    pub position: usize,
    pub table_id: Option<String>,
    pub table_number: Option<String>,
    /// Selector value chosen for this table, if one could be resolved.
    pub option_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No rendered node at that position.
    Missed,
    /// Decorative element. The click is swallowed so it never reaches the
    /// overlay's click-outside handler.
    Ignored,
    /// Table with neither id nor number: marked selected, selector untouched.
    Marked { position: usize },
    /// Table bound into the selector; the overlay should close.
    Selected { position: usize, option_value: String },
}

impl ClickOutcome {
    pub fn closes_overlay(&self) -> bool {
        matches!(self, Self::Selected { .. })
    }

    /// Every click on a floor-plan node stops propagation.
    pub fn stops_propagation(&self) -> bool {
        !matches!(self, Self::Missed)
    }
}

/// Keeps the floor plan's selected marker and the reservation table selector
/// in step. The selection lives here; the `selected` flag on rendered nodes is
/// only ever a projection of it, so at most one node can carry it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SelectionBinder {
    selection: Option<Selection>,
}

impl SelectionBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selected_position(&self) -> Option<usize> {
        self.selection.as_ref().map(|selection| selection.position)
    }

    pub fn selected_table_id(&self) -> Option<&str> {
        self.selection
            .as_ref()
            .and_then(|selection| selection.table_id.as_deref())
    }

    /// Re-derives the selection from the selector's current value and
    /// projects it onto `container`.
    ///
    /// The selector is the source of truth whenever it changes outside the
    /// floor plan (dropdown change, form reset). A stored selection is kept
    /// only while its node still resolves to the chosen value; otherwise the
    /// first table that resolves to it is marked, or nothing.
    pub fn sync_with_selector(&mut self, container: &mut LayoutContainer, selector: &TableSelector) {
        let Some(value) = selector.selected_value() else {
            self.selection = None;
            container.project_selection(None);
            return;
        };

        let resolves_to_value = |kind: &ElementKind| {
            option_value_for(selector, kind).as_deref() == Some(value)
        };
        let stored = self
            .selection
            .as_ref()
            .filter(|selection| selection.option_value.as_deref() == Some(value))
            .and_then(|selection| container.node(selection.position))
            .filter(|node| resolves_to_value(&node.kind));
        let node = stored.or_else(|| {
            container
                .nodes()
                .iter()
                .find(|node| resolves_to_value(&node.kind))
        });

        self.selection = node.and_then(|node| match &node.kind {
            ElementKind::Table { id, number } => Some(Selection {
                position: node.position,
                table_id: id.clone(),
                table_number: number.clone(),
                option_value: Some(value.to_string()),
            }),
            ElementKind::Decoration { .. } => None,
        });
        if self.selection.is_none() {
            tracing::debug!(value, "selected table is not on the floor plan");
        }
        container.project_selection(self.selected_position());
    }

    pub fn click(
        &mut self,
        container: &mut LayoutContainer,
        position: usize,
        selector: &mut TableSelector,
    ) -> ClickOutcome {
        let Some(node) = container.node(position) else {
            tracing::warn!(position, "click on unknown floor plan node");
            return ClickOutcome::Missed;
        };
        let (table_id, table_number) = match &node.kind {
            ElementKind::Table { id, number } => (id.clone(), number.clone()),
            ElementKind::Decoration { .. } => return ClickOutcome::Ignored,
        };

        let option_value = resolve_option(selector, &node.kind);
        if let Some(value) = option_value.as_deref() {
            selector.select(value);
        }

        self.selection = Some(Selection {
            position,
            table_id,
            table_number,
            option_value: option_value.clone(),
        });
        container.project_selection(Some(position));

        match option_value {
            Some(option_value) => {
                tracing::info!(position, value = %option_value, "table selected from floor plan");
                ClickOutcome::Selected {
                    position,
                    option_value,
                }
            }
            None => {
                tracing::debug!(position, "table without id or number marked");
                ClickOutcome::Marked { position }
            }
        }
    }
}

/// Selector value a table element binds to, without touching the selector.
///
/// With an id the value is the id. Number-only tables take the option whose
/// text names the number as a whole token (substring matching would let
/// table "1" pick "Table 11"), else the number itself.
fn option_value_for(selector: &TableSelector, kind: &ElementKind) -> Option<String> {
    let ElementKind::Table { id, number } = kind else {
        return None;
    };
    if let Some(id) = id {
        return Some(id.clone());
    }
    let number = number.as_deref()?;
    Some(
        selector
            .find_by_table_number(number)
            .map(|existing| existing.value.clone())
            .unwrap_or_else(|| number.to_string()),
    )
}

/// Finds or creates the selector option for a table.
fn resolve_option(selector: &mut TableSelector, kind: &ElementKind) -> Option<String> {
    let value = option_value_for(selector, kind)?;
    if selector.find_by_value(&value).is_none() {
        let ElementKind::Table { number, .. } = kind else {
            return None;
        };
        let display = table_display_text(number.as_deref().unwrap_or(&value));
        selector.ensure_option(SelectorOption::new(value.clone(), display));
    }
    Some(value)
}
