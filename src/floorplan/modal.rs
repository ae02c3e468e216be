use serde::{Deserialize, Serialize};

use crate::{
    core::types::PageSnapshot,
    floorplan::{
        binder::{ClickOutcome, Selection, SelectionBinder},
        normalizer::normalize,
        renderer::{render, LayoutContainer},
    },
    reservation::selector::TableSelector,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// Where a click on the overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClickTarget {
    /// The dimmed backdrop itself.
    Background,
    /// Anything inside the dialog.
    Content,
}

/// Full-screen floor-plan overlay.
///
/// Every open re-derives the canonical layout from the snapshot and renders it
/// from scratch. The selected marker is then re-derived from the table
/// selector, so it follows changes made outside the floor plan.
#[derive(Debug, Clone, Serialize)]
pub struct FloorPlanModal {
    state: ModalState,
    overlay_visible: bool,
    body_scroll_locked: bool,
    container: Option<LayoutContainer>,
    binder: SelectionBinder,
    render_count: u64,
}

impl Default for FloorPlanModal {
    fn default() -> Self {
        Self::new()
    }
}

impl FloorPlanModal {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            overlay_visible: false,
            body_scroll_locked: false,
            container: Some(LayoutContainer::new()),
            binder: SelectionBinder::new(),
            render_count: 0,
        }
    }

    /// A page without the floor-plan markup. Opening it does nothing.
    pub fn detached() -> Self {
        Self {
            container: None,
            ..Self::new()
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn body_scroll_locked(&self) -> bool {
        self.body_scroll_locked
    }

    pub fn container(&self) -> Option<&LayoutContainer> {
        self.container.as_ref()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.binder.selection()
    }

    pub fn selected_table_id(&self) -> Option<&str> {
        self.binder.selected_table_id()
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn open(&mut self, snapshot: &PageSnapshot, selector: &TableSelector) -> bool {
        let Some(container) = self.container.as_mut() else {
            tracing::warn!("floor plan container missing, not opening overlay");
            return false;
        };

        self.state = ModalState::Open;
        self.overlay_visible = true;
        let layout = normalize(snapshot.raw_layout());
        render(container, &layout);
        self.binder.sync_with_selector(container, selector);
        self.render_count += 1;
        self.body_scroll_locked = true;
        tracing::debug!(renders = self.render_count, "floor plan overlay opened");
        true
    }

    /// Brings the marker in line with `selector` after it changed elsewhere.
    pub fn sync_selection(&mut self, selector: &TableSelector) {
        if let Some(container) = self.container.as_mut() {
            self.binder.sync_with_selector(container, selector);
        }
    }

    pub fn close(&mut self) {
        if self.state == ModalState::Closed {
            return;
        }
        self.state = ModalState::Closed;
        self.overlay_visible = false;
        self.body_scroll_locked = false;
        tracing::debug!("floor plan overlay closed");
    }

    /// Only a click on the backdrop itself closes; clicks that land inside the
    /// dialog do not.
    pub fn click_overlay(&mut self, target: OverlayClickTarget) {
        if target == OverlayClickTarget::Background {
            self.close();
        }
    }

    pub fn click_element(&mut self, position: usize, selector: &mut TableSelector) -> ClickOutcome {
        if !self.is_open() {
            return ClickOutcome::Missed;
        }
        let Some(container) = self.container.as_mut() else {
            return ClickOutcome::Missed;
        };

        let outcome = self.binder.click(container, position, selector);
        if outcome.closes_overlay() {
            self.close();
        }
        outcome
    }
}
