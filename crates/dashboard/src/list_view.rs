//! Coffee list view model with the add and delete dialogs.
//!
//! ```text
//! Loading ──fetch ok──▶ Loaded
//!    └────fetch err──▶ Failed (rendered as an empty list)
//! ```
//!
//! After a successful add or delete the cached list is invalidated and
//! refetched.

use tracing::debug;

use crate::cache::QueryKey;
use crate::client::ClientError;
use crate::context::DashboardContext;
use crate::model::{Coffee, ImageFile, NewCoffee, NewCoffeeUpload};
use crate::stats::CatalogueStats;

/// Image shown until the user supplies one.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=100&width=100";

/// Fetch state of the list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    /// Initial fetch in flight.
    Loading,
    /// List fetched.
    Loaded(Vec<Coffee>),
    /// Fetch failed.
    Failed,
}

/// Fields of the add dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct AddForm {
    /// Coffee name.
    pub name: String,
    /// Free-text description; blank means none.
    pub description: String,
    /// Price.
    pub price: f64,
    /// Image URL.
    pub image: String,
}

impl Default for AddForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: 0.0,
            image: PLACEHOLDER_IMAGE.to_owned(),
        }
    }
}

impl AddForm {
    fn description(&self) -> Option<String> {
        let trimmed = self.description.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }

    fn to_new_coffee(&self) -> NewCoffee {
        NewCoffee {
            name: self.name.clone(),
            description: self.description(),
            price: self.price,
            image: self.image.clone(),
        }
    }

    fn to_upload(&self, file: ImageFile) -> NewCoffeeUpload {
        NewCoffeeUpload {
            name: self.name.clone(),
            description: self.description(),
            price: self.price,
            file,
        }
    }
}

/// Add dialog visibility.
#[derive(Debug, Clone, PartialEq)]
pub enum AddDialog {
    /// Hidden.
    Closed,
    /// Shown with the form being edited.
    Open(AddForm),
}

/// Delete confirmation visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDialog {
    /// Hidden.
    Closed,
    /// Asking to confirm deletion of `target`.
    Open {
        /// Coffee pending deletion.
        target: i32,
    },
}

/// View model behind the dashboard's main page.
pub struct CoffeeListView {
    ctx: DashboardContext,
    state: ListState,
    add_dialog: AddDialog,
    delete_dialog: DeleteDialog,
}

impl CoffeeListView {
    /// A view that has not fetched yet.
    #[must_use]
    pub fn new(ctx: DashboardContext) -> Self {
        Self {
            ctx,
            state: ListState::Loading,
            add_dialog: AddDialog::Closed,
            delete_dialog: DeleteDialog::Closed,
        }
    }

    /// Fetch the list through the cache.
    pub async fn load(&mut self) {
        self.state = match self.ctx.cache().fetch_list(self.ctx.api()).await {
            Ok(coffees) => ListState::Loaded(coffees),
            Err(err) => {
                debug!(error = %err, "coffee list unavailable");
                ListState::Failed
            }
        };
    }

    async fn refresh(&mut self) {
        self.ctx.cache().invalidate(QueryKey::CoffeeList);
        self.load().await;
    }

    /// Current fetch state.
    #[must_use]
    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Coffees to render; empty unless loaded.
    #[must_use]
    pub fn coffees(&self) -> &[Coffee] {
        match &self.state {
            ListState::Loaded(coffees) => coffees,
            ListState::Loading | ListState::Failed => &[],
        }
    }

    /// Count and average of the rendered list, recomputed on every call.
    #[must_use]
    pub fn stats(&self) -> CatalogueStats {
        CatalogueStats::from_coffees(self.coffees())
    }

    /// Add dialog state.
    #[must_use]
    pub fn add_dialog(&self) -> &AddDialog {
        &self.add_dialog
    }

    /// Delete dialog state.
    #[must_use]
    pub fn delete_dialog(&self) -> DeleteDialog {
        self.delete_dialog
    }

    /// Show the add dialog with a fresh form.
    pub fn open_add_dialog(&mut self) {
        self.add_dialog = AddDialog::Open(AddForm::default());
    }

    /// Hide the add dialog, discarding the form.
    pub fn close_add_dialog(&mut self) {
        self.add_dialog = AddDialog::Closed;
    }

    /// Mutable access to the open form.
    pub fn add_form_mut(&mut self) -> Option<&mut AddForm> {
        match &mut self.add_dialog {
            AddDialog::Open(form) => Some(form),
            AddDialog::Closed => None,
        }
    }

    fn take_form(&mut self) -> Option<AddForm> {
        match std::mem::replace(&mut self.add_dialog, AddDialog::Closed) {
            AddDialog::Open(form) => Some(form),
            AddDialog::Closed => None,
        }
    }

    /// Submit the add form with its image URL. The dialog closes and the
    /// form resets whatever the outcome; `Ok(None)` means it was not open.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Create`] when the API rejects the coffee.
    pub async fn submit_add(&mut self) -> Result<Option<Coffee>, ClientError> {
        let Some(form) = self.take_form() else {
            return Ok(None);
        };
        let created = self.ctx.api().create(&form.to_new_coffee()).await?;
        self.refresh().await;
        Ok(Some(created))
    }

    /// Submit the add form, uploading `file` as the image.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Create`] when the API rejects the coffee.
    pub async fn submit_add_with_image(
        &mut self,
        file: ImageFile,
    ) -> Result<Option<Coffee>, ClientError> {
        let Some(form) = self.take_form() else {
            return Ok(None);
        };
        let created = self.ctx
            .api()
            .create_with_image(form.to_upload(file))
            .await?;
        self.refresh().await;
        Ok(Some(created))
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: i32) {
        self.delete_dialog = DeleteDialog::Open { target: id };
    }

    /// Dismiss the confirmation.
    pub fn cancel_delete(&mut self) {
        self.delete_dialog = DeleteDialog::Closed;
    }

    /// Delete the pending target. Returns `Ok(false)` without calling the API
    /// when nothing is pending.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Delete`] when the API call fails; the dialog
    /// still closes.
    pub async fn confirm_delete(&mut self) -> Result<bool, ClientError> {
        let DeleteDialog::Open { target } = self.delete_dialog else {
            return Ok(false);
        };
        self.delete_dialog = DeleteDialog::Closed;
        self.ctx.api().delete(target).await?;
        self.refresh().await;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubApi, coffee};
    use rstest::{fixture, rstest};
    use std::sync::Arc;

    #[fixture]
    fn api() -> Arc<StubApi> {
        Arc::new(StubApi::with_coffees(vec![
            coffee(1, "Espresso", 1.5),
            coffee(2, "Latte", 2.5),
        ]))
    }

    fn view(api: &Arc<StubApi>) -> CoffeeListView {
        CoffeeListView::new(DashboardContext::new(api.clone()))
    }

    #[rstest]
    #[tokio::test]
    async fn load_moves_to_loaded_with_stats(api: Arc<StubApi>) {
        let mut list = view(&api);
        assert_eq!(list.state(), &ListState::Loading);

        list.load().await;

        assert_eq!(list.coffees().len(), 2);
        assert_eq!(list.stats().total, 2);
        assert_eq!(list.stats().average_price, Some(2.0));
    }

    #[rstest]
    #[tokio::test]
    async fn failed_load_renders_as_empty() {
        let api = Arc::new(StubApi::failing());
        let mut list = view(&api);

        list.load().await;

        assert_eq!(list.state(), &ListState::Failed);
        assert!(list.coffees().is_empty());
        assert_eq!(list.stats().average_price, None);
    }

    #[rstest]
    #[tokio::test]
    async fn add_refetches_the_list_and_resets_the_form(api: Arc<StubApi>) {
        let mut list = view(&api);
        list.load().await;
        list.open_add_dialog();
        let form = list.add_form_mut().expect("dialog open");
        form.name = "Mocha".to_owned();
        form.price = 3.2;

        let created = list.submit_add()
            .await
            .expect("created")
            .expect("dialog was open");

        assert_eq!(created.image, PLACEHOLDER_IMAGE);
        assert!(created.description.is_none());
        assert_eq!(list.coffees().len(), 3);
        assert_eq!(api.list_calls(), 2);
        assert_eq!(list.add_dialog(), &AddDialog::Closed);
        list.open_add_dialog();
        assert_eq!(list.add_dialog(), &AddDialog::Open(AddForm::default()));
    }

    #[rstest]
    #[tokio::test]
    async fn failed_add_closes_dialog_and_keeps_cache(api: Arc<StubApi>) {
        let mut list = view(&api);
        list.load().await;
        list.open_add_dialog();
        if let Some(form) = list.add_form_mut() {
            form.name = "Latte".to_owned();
        }

        let result = list.submit_add().await;

        assert_eq!(result, Err(ClientError::Create));
        assert_eq!(list.add_dialog(), &AddDialog::Closed);
        assert_eq!(api.list_calls(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn upload_sends_form_fields_with_file(api: Arc<StubApi>) {
        let mut list = view(&api);
        list.open_add_dialog();
        if let Some(form) = list.add_form_mut() {
            form.name = "Cortado".to_owned();
            form.description = "  ".to_owned();
            form.price = 2.9;
        }
        let file = ImageFile {
            file_name: "cortado.png".to_owned(),
            content_type: Some("image/png".to_owned()),
            bytes: vec![1, 2, 3],
        };

        let created = list.submit_add_with_image(file.clone())
            .await
            .expect("created")
            .expect("dialog was open");

        assert_eq!(created.image, "https://cdn.example.test/cortado.png");
        let upload = api.last_upload().expect("upload recorded");
        assert_eq!(upload.file, file);
        assert!(upload.description.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn submit_without_open_dialog_is_a_no_op(api: Arc<StubApi>) {
        let mut list = view(&api);

        assert_eq!(list.submit_add().await, Ok(None));
    }

    #[rstest]
    #[tokio::test]
    async fn confirmed_delete_refetches(api: Arc<StubApi>) {
        let mut list = view(&api);
        list.load().await;
        list.request_delete(1);
        assert_eq!(list.delete_dialog(), DeleteDialog::Open { target: 1 });

        assert_eq!(list.confirm_delete().await, Ok(true));

        assert_eq!(list.delete_dialog(), DeleteDialog::Closed);
        assert_eq!(list.coffees().len(), 1);
        assert_eq!(api.list_calls(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn confirm_without_target_is_a_no_op(api: Arc<StubApi>) {
        let mut list = view(&api);
        list.load().await;
        list.request_delete(2);
        list.cancel_delete();

        assert_eq!(list.confirm_delete().await, Ok(false));
        assert_eq!(list.coffees().len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_delete_keeps_the_cached_list(api: Arc<StubApi>) {
        let mut list = view(&api);
        list.load().await;
        list.request_delete(99);

        assert_eq!(list.confirm_delete().await, Err(ClientError::Delete));
        assert_eq!(list.delete_dialog(), DeleteDialog::Closed);
        assert_eq!(api.list_calls(), 1);
    }
}
