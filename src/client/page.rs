use super::cache::ListFilter;
use super::error::Result;
use super::forms::{FormLayout, FormSession};
use super::hooks::{ClientContext, QueryState};
use super::resources::{Deactivable, Editable};

/// Controller behind one catalog route of the dashboard.
///
/// Holds the list under the page's filter, hands out create and per-row
/// update dialogs, and reloads once a dialog closes after saving.
pub struct CatalogPage<R: Editable + FormLayout + Clone> {
    resource: R,
    ctx: ClientContext,
    filter: ListFilter,
    rows: QueryState<Vec<R::Item>>,
}

impl<R: Editable + FormLayout + Clone> CatalogPage<R> {
    pub fn new(resource: R, ctx: ClientContext, filter: ListFilter) -> Self {
        Self {
            resource,
            ctx,
            filter,
            rows: QueryState::Loading,
        }
    }

    pub async fn load(&mut self) -> &QueryState<Vec<R::Item>> {
        self.rows = self.ctx.queries().list(&self.resource, &self.filter).await;
        &self.rows
    }

    pub fn rows(&self) -> &QueryState<Vec<R::Item>> {
        &self.rows
    }

    pub fn row_ids(&self) -> Vec<String> {
        self.rows
            .data()
            .map(|items| {
                items
                    .iter()
                    .map(|item| self.resource.item_id(item).to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub async fn set_filter(&mut self, filter: ListFilter) {
        self.filter = filter;
        self.load().await;
    }

    /// The "new" button
    pub async fn open_create(&self) -> FormSession<R> {
        FormSession::create(self.resource.clone(), &self.ctx).await
    }

    /// The edit action of one row
    pub async fn open_update(&self, id: &str) -> FormSession<R> {
        FormSession::open_update(self.resource.clone(), id, &self.ctx).await
    }

    /// Reloads the list if `form` closed after a successful submit
    pub async fn on_form_closed(&mut self, form: &FormSession<R>) -> bool {
        if form.is_open() || !form.is_saved() {
            return false;
        }
        self.load().await;
        true
    }
}

impl<R: Deactivable + FormLayout + Clone> CatalogPage<R> {
    /// The deactivate action of one row
    pub async fn deactivate(&mut self, id: &str) -> Result<R::Item> {
        let item = self.ctx.mutations().deactivate(&self.resource, id).await?;
        self.load().await;
        Ok(item)
    }
}
