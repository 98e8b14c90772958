use crate::client::cache::ListFilter;
use crate::client::error::ClientError;
use crate::client::hooks::{ClientContext, QueryState};
use crate::client::notify::Notification;
use crate::client::resources::{Categorias, Editable, Productos};
use crate::schemas::{Schema, Violations};

use super::fields::{FieldSpec, FormLayout, FormOptions, SelectOption};
use super::image::{ImageFile, ImageUploader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Loading,
    Editing,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(String),
}

/// Result of pressing submit
#[derive(Debug)]
pub enum SubmitOutcome<T> {
    Saved(T),
    /// Client-side validation failed; nothing was sent
    Invalid(Violations),
    Failed(ClientError),
    /// The record being edited has not loaded yet
    NotReady,
}

/// A create or update dialog bound to one resource.
///
/// `Loading → Editing → Submitting → Editing`, closing the dialog only when
/// the mutation succeeds.
pub struct FormSession<R: Editable> {
    resource: R,
    mode: FormMode,
    status: FormStatus,
    values: R::Input,
    errors: Violations,
    options: FormOptions,
    open: bool,
    saved: bool,
    load_error: Option<String>,
}

impl<R: Editable + FormLayout> FormSession<R> {
    /// Opens a create dialog with the entity defaults and the first active category
    pub async fn create(resource: R, ctx: &ClientContext) -> Self {
        let mut session = Self::new(resource, FormMode::Create, FormStatus::Editing);
        session.load_options(ctx).await;
        if let Some(first) = session.options.categorias.first() {
            let id = first.value.clone();
            session.resource.set_categoria(&mut session.values, &id);
        }
        session
    }

    /// Opens an update dialog that stays `Loading` until [`FormSession::load`] resolves
    pub fn update(resource: R, id: impl Into<String>) -> Self {
        Self::new(resource, FormMode::Update(id.into()), FormStatus::Loading)
    }

    /// Update dialog with its record already fetched
    pub async fn open_update(resource: R, id: impl Into<String>, ctx: &ClientContext) -> Self {
        let mut session = Self::update(resource, id);
        session.load(ctx).await;
        session
    }

    fn new(resource: R, mode: FormMode, status: FormStatus) -> Self {
        let values = resource.defaults();
        Self {
            resource,
            mode,
            status,
            values,
            errors: Violations::default(),
            options: FormOptions::default(),
            open: true,
            saved: false,
            load_error: None,
        }
    }

    /// Fetches the option lists and, for updates, the record to pre-fill
    pub async fn load(&mut self, ctx: &ClientContext) {
        self.load_options(ctx).await;

        let FormMode::Update(id) = &self.mode else {
            return;
        };
        match ctx.queries().get(&self.resource, id).await {
            QueryState::Ready(item) => {
                self.values = self.resource.prefill(&item);
                self.status = FormStatus::Editing;
                self.load_error = None;
            }
            QueryState::Failed(message) => self.load_error = Some(message),
            QueryState::Loading => {}
        }
    }

    async fn load_options(&mut self, ctx: &ClientContext) {
        let queries = ctx.queries();
        if let Some(tipo) = self.resource.categoria_tipo() {
            let categorias = Categorias(tipo);
            if let QueryState::Ready(items) = queries.list(&categorias, &ListFilter::activos()).await
            {
                self.options.categorias = items
                    .into_iter()
                    .map(|c| SelectOption::new(c.id_categoria, c.nombre))
                    .collect();
            }
        }
        if self.resource.links_productos() {
            if let QueryState::Ready(items) =
                queries.list(&Productos, &ListFilter::activos()).await
            {
                self.options.productos = items
                    .into_iter()
                    .map(|p| SelectOption::new(p.id_producto, p.nombre))
                    .collect();
            }
        }
    }

    pub fn fields(&self) -> Vec<FieldSpec> {
        self.resource.fields(&self.options)
    }

    /// Applies an edit; ignored while loading or submitting
    pub fn edit(&mut self, change: impl FnOnce(&mut R::Input)) -> bool {
        if self.status != FormStatus::Editing {
            return false;
        }
        change(&mut self.values);
        true
    }

    /// Runs the shared schema, keeping the violations for display
    pub fn validate(&mut self) -> bool {
        match self.values.parse() {
            Ok(_) => {
                self.errors = Violations::default();
                true
            }
            Err(violations) => {
                self.errors = violations;
                false
            }
        }
    }

    pub async fn submit(&mut self, ctx: &ClientContext) -> SubmitOutcome<R::Item> {
        if self.status != FormStatus::Editing {
            tracing::debug!("Submit refused while {:?}", self.status);
            return SubmitOutcome::NotReady;
        }
        if !self.validate() {
            return SubmitOutcome::Invalid(self.errors.clone());
        }

        self.status = FormStatus::Submitting;
        let mutations = ctx.mutations();
        let outcome = match &self.mode {
            FormMode::Create => mutations.create(&self.resource, &self.values).await,
            FormMode::Update(id) => mutations.update(&self.resource, id, &self.values).await,
        };
        self.status = FormStatus::Editing;

        match outcome {
            Ok(item) => {
                self.open = false;
                self.saved = true;
                SubmitOutcome::Saved(item)
            }
            Err(e) => {
                if let Some(violations) = e.violations() {
                    self.errors = violations.clone();
                }
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Uploads an image into the form's image field.
    ///
    /// On failure the field falls back to the entity placeholder.
    pub async fn upload_image(
        &mut self,
        uploader: &dyn ImageUploader,
        file: ImageFile,
        ctx: &ClientContext,
    ) {
        match uploader.upload(file).await {
            Ok(url) => {
                self.resource.set_img_url(&mut self.values, &url);
                ctx.notifier().notify(Notification::success(
                    "Imagen subida",
                    "La imagen ha sido subida exitosamente",
                ));
            }
            Err(message) => {
                if let Some(placeholder) = self.resource.placeholder_img() {
                    self.resource.set_img_url(&mut self.values, placeholder);
                }
                ctx.notifier().notify(Notification::error(message));
            }
        }
    }

    pub fn cancel(&mut self) {
        self.open = false;
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn values(&self) -> &R::Input {
        &self.values
    }

    pub fn errors(&self) -> &Violations {
        &self.errors
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Closed after a successful submit, as opposed to cancelled
    pub fn is_saved(&self) -> bool {
        self.saved
    }
}

impl<R: Editable> std::fmt::Debug for FormSession<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("resource", &self.resource.key())
            .field("mode", &self.mode)
            .field("status", &self.status)
            .field("open", &self.open)
            .finish()
    }
}
