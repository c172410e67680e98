//! Single-coffee page: view and edit modes.
//!
//! A successful edit returns to `Viewing` and replaces the page's record with
//! the server response. The shared cache is left as is. A failed edit stays
//! in `Editing` without surfacing the error.

use tracing::debug;

use crate::context::DashboardContext;
use crate::model::{Coffee, CoffeeUpdate};

/// Whether the page shows the record or the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailMode {
    /// Read-only view.
    Viewing,
    /// Edit form shown.
    Editing,
}

/// Fetch state of the page's record.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    /// Fetch in flight.
    Loading,
    /// Record available.
    Loaded(Coffee),
    /// Fetch failed or the coffee does not exist.
    NotFound,
}

/// Edit form fields, seeded from the loaded record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditForm {
    /// Name.
    pub name: String,
    /// Description; shown but not sent, since updates ignore it.
    pub description: String,
    /// Price.
    pub price: f64,
    /// Image URL.
    pub image: String,
}

impl EditForm {
    fn from_coffee(coffee: &Coffee) -> Self {
        Self {
            name: coffee.name.clone(),
            description: coffee.description.clone().unwrap_or_default(),
            price: coffee.price,
            image: coffee.image.clone(),
        }
    }

    fn to_update(&self) -> CoffeeUpdate {
        CoffeeUpdate {
            name: Some(self.name.clone()),
            price: Some(self.price),
            image: Some(self.image.clone()),
        }
    }
}

/// Result of submitting the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Saved; the page is back in `Viewing`.
    Saved,
    /// The update failed; the page is still `Editing`.
    Unsaved,
    /// Not in edit mode or no record loaded; nothing was sent.
    Ignored,
}

/// View model for `/coffee/{id}`.
pub struct CoffeeDetailView {
    ctx: DashboardContext,
    id: i32,
    state: DetailState,
    mode: DetailMode,
    form: EditForm,
}

impl CoffeeDetailView {
    /// Page for `id`, starting in `Editing` when `edit` is set.
    #[must_use]
    pub fn new(ctx: DashboardContext, id: i32, edit: bool) -> Self {
        Self {
            ctx,
            id,
            state: DetailState::Loading,
            mode: if edit {
                DetailMode::Editing
            } else {
                DetailMode::Viewing
            },
            form: EditForm::default(),
        }
    }

    /// Fetch the record through the cache and seed the form from it.
    pub async fn load(&mut self) {
        match self.ctx.cache().fetch_coffee(self.ctx.api(), self.id).await {
            Ok(coffee) => {
                self.form = EditForm::from_coffee(&coffee);
                self.state = DetailState::Loaded(coffee);
            }
            Err(err) => {
                debug!(coffee_id = self.id, error = %err, "coffee unavailable");
                self.state = DetailState::NotFound;
            }
        }
    }

    /// Coffee id this page shows.
    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Fetch state.
    #[must_use]
    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Loaded record, if any.
    #[must_use]
    pub fn coffee(&self) -> Option<&Coffee> {
        match &self.state {
            DetailState::Loaded(coffee) => Some(coffee),
            DetailState::Loading | DetailState::NotFound => None,
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> DetailMode {
        self.mode
    }

    /// Edit form.
    #[must_use]
    pub fn form(&self) -> &EditForm {
        &self.form
    }

    /// Mutable edit form.
    pub fn form_mut(&mut self) -> &mut EditForm {
        &mut self.form
    }

    /// Switch to `Editing`.
    pub fn start_edit(&mut self) {
        self.mode = DetailMode::Editing;
    }

    /// Send the form as an update.
    pub async fn submit_edit(&mut self) -> EditOutcome {
        if self.mode != DetailMode::Editing || self.coffee().is_none() {
            return EditOutcome::Ignored;
        }
        match self.ctx.api().update(self.id, &self.form.to_update()).await {
            Ok(updated) => {
                self.form = EditForm::from_coffee(&updated);
                self.state = DetailState::Loaded(updated);
                self.mode = DetailMode::Viewing;
                EditOutcome::Saved
            }
            Err(err) => {
                debug!(coffee_id = self.id, error = %err, "coffee update failed");
                EditOutcome::Unsaved
            }
        }
    }
}
