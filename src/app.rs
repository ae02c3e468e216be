use std::sync::Arc;

use serde::Serialize;

use crate::{
    api::client::SiteApiClient,
    core::{
        errors::{AppError, AppResult},
        types::PageSnapshot,
    },
    floorplan::{binder::ClickOutcome, modal::OverlayClickTarget},
    page::sections::{populate, PageView, ReservationSection},
};

pub const LOAD_FAILED_MESSAGE: &str = "An error occurred while loading the website.";

/// The page-wide loading spinner.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct LoaderIndicator {
    visible: bool,
}

impl LoaderIndicator {
    pub fn shown() -> Self {
        Self { visible: true }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Hides the loader when the guard drops, whichever way the scope exits.
    pub fn hide_on_drop(&mut self) -> LoaderGuard<'_> {
        LoaderGuard { loader: self }
    }
}

pub struct LoaderGuard<'a> {
    loader: &'a mut LoaderIndicator,
}

impl Drop for LoaderGuard<'_> {
    fn drop(&mut self) {
        self.loader.hide();
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageBody {
    Ready { page: PageView },
    /// The whole body replaced by a single message; nothing else renders.
    Failed { message: String, code: &'static str },
}

/// A loaded site: the immutable snapshot plus the mutable page built from it.
#[derive(Debug)]
pub struct SiteApp {
    client: SiteApiClient,
    loader: LoaderIndicator,
    snapshot: Option<Arc<PageSnapshot>>,
    body: PageBody,
}

impl SiteApp {
    /// Fetches the page data once and populates the page. A failed fetch is
    /// not an error here: it yields a [`PageBody::Failed`] page.
    pub async fn load(client: SiteApiClient) -> Self {
        let mut loader = LoaderIndicator::shown();
        let fetched = {
            let _guard = loader.hide_on_drop();
            client.fetch_page().await
        };

        let (snapshot, body) = match fetched {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                let page = populate(&snapshot);
                (Some(snapshot), PageBody::Ready { page })
            }
            Err(err) => {
                tracing::error!(
                    code = err.code(),
                    retryable = err.retryable(),
                    error = %err,
                    "failed to load page data"
                );
                (
                    None,
                    PageBody::Failed {
                        message: LOAD_FAILED_MESSAGE.to_string(),
                        code: err.code(),
                    },
                )
            }
        };

        Self {
            client,
            loader,
            snapshot,
            body,
        }
    }

    pub fn loader(&self) -> &LoaderIndicator {
        &self.loader
    }

    pub fn body(&self) -> &PageBody {
        &self.body
    }

    pub fn snapshot(&self) -> Option<&PageSnapshot> {
        self.snapshot.as_deref()
    }

    pub fn page(&self) -> Option<&PageView> {
        match &self.body {
            PageBody::Ready { page } => Some(page),
            PageBody::Failed { .. } => None,
        }
    }

    pub fn reservation(&self) -> Option<&ReservationSection> {
        self.page().and_then(|page| page.reservation.as_ref())
    }

    pub fn reservation_mut(&mut self) -> Option<&mut ReservationSection> {
        match &mut self.body {
            PageBody::Ready { page } => page.reservation.as_mut(),
            PageBody::Failed { .. } => None,
        }
    }

    pub fn open_floor_plan(&mut self) -> bool {
        let Some(snapshot) = self.snapshot.clone() else {
            return false;
        };
        match self.reservation_mut() {
            Some(section) => section.floor_plan.open(&snapshot, &section.selector),
            None => false,
        }
    }

    /// The guest picked `value` in the table dropdown. Unknown values are
    /// ignored, as a `<select>` would.
    pub fn choose_table(&mut self, value: &str) -> bool {
        let Some(section) = self.reservation_mut() else {
            return false;
        };
        let chosen = section.selector.select(value);
        section.floor_plan.sync_selection(&section.selector);
        chosen
    }

    pub fn close_floor_plan(&mut self) {
        if let Some(section) = self.reservation_mut() {
            section.floor_plan.close();
        }
    }

    pub fn click_overlay(&mut self, target: OverlayClickTarget) {
        if let Some(section) = self.reservation_mut() {
            section.floor_plan.click_overlay(target);
        }
    }

    pub fn click_floor_plan_element(&mut self, position: usize) -> ClickOutcome {
        match self.reservation_mut() {
            Some(section) => section
                .floor_plan
                .click_element(position, &mut section.selector),
            None => ClickOutcome::Missed,
        }
    }

    /// Sends the reservation form. Only this handler waits on the network;
    /// the outcome is reflected on the form either way.
    pub async fn submit_reservation(&mut self) -> AppResult<()> {
        let PageBody::Ready { page } = &mut self.body else {
            return Err(AppError::NotFound("page is not loaded".to_string()));
        };
        let Some(section) = page.reservation.as_mut() else {
            return Err(AppError::NotFound("reservations are disabled".to_string()));
        };
        if !section.form.can_submit() {
            return Err(AppError::InvalidInput("reservation form is hidden".to_string()));
        }

        let request = section.form.build_request(&section.selector);
        let result = self.client.submit_reservation(&request).await;
        section.form.apply_submission(&mut section.selector, &result);
        section.floor_plan.sync_selection(&section.selector);
        result
    }
}
