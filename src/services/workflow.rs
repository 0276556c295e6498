//! Generic catalog workflow
//!
//! Every record kind goes through the same five operations (list, detail,
//! create, delete, update). [`Entity`] supplies what differs per kind: the
//! store calls, the form schema, the reference lists a form needs and the
//! records that block a deletion. [`Workflow`] runs the shared shape and
//! returns an [`Outcome`] for the boundary.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    error::{AppError, AppResult},
    repository::CatalogStore,
    validation::{FieldError, FormData, Sanitized, Schema},
    views::{Outcome, View},
};

/// Records that reference an entity and block its deletion
#[derive(Debug, Clone, Copy)]
pub struct Dependents {
    /// Payload key on detail and delete views
    pub key: &'static str,
    /// Plural noun used in the refusal message
    pub label: &'static str,
}

#[async_trait]
pub trait Entity: Send + Sync + 'static {
    /// Stored record
    type Record: Serialize + Send + Sync;
    /// List row
    type Listing: Serialize + Send;
    /// Record with its references resolved
    type Detail: Serialize + Send;
    type Dependent: Serialize + Send + Sync;
    /// Selection lists needed by the form
    type References: Send + Sync;
    /// Form values shown to the operator
    type Form: Serialize + Default + Send + Sync;
    /// Validated values, ready to be written
    type Fields: Send + Sync;

    /// View and payload key, e.g. `author`
    const KEY: &'static str;
    /// Human label, e.g. `Author`
    const LABEL: &'static str;
    const LIST_TITLE: &'static str;
    const LIST_PATH: &'static str;
    /// Form field carrying the id to delete
    const DELETE_FIELD: &'static str;
    /// `None` for entities whose deletion is never blocked
    const DEPENDENTS: Option<Dependents>;

    fn schema(&self) -> &'static Schema;

    fn detail_url(&self, id: i32) -> String;

    fn record_id(&self, record: &Self::Record) -> i32;

    fn not_found(&self) -> AppError {
        AppError::NotFound(format!("{} not found", Self::LABEL))
    }

    async fn list(&self, store: &dyn CatalogStore) -> AppResult<Vec<Self::Listing>>;

    async fn find(&self, store: &dyn CatalogStore, id: i32) -> AppResult<Option<Self::Record>>;

    async fn dependents(&self, _store: &dyn CatalogStore, _id: i32) -> AppResult<Vec<Self::Dependent>> {
        Ok(Vec::new())
    }

    async fn resolve(&self, store: &dyn CatalogStore, record: Self::Record) -> AppResult<Self::Detail>;

    fn detail_title(&self, detail: &Self::Detail) -> String;

    async fn references(&self, store: &dyn CatalogStore) -> AppResult<Self::References>;

    /// Reference lists and selection markers added to the form view
    fn form_context(&self, references: &Self::References, form: &Self::Form) -> AppResult<Map<String, Value>>;

    fn form_from_record(&self, record: &Self::Record) -> Self::Form;

    /// Form repopulated from sanitized input; `id` is the record being edited
    fn candidate(&self, id: Option<i32>, values: &Sanitized) -> Self::Form;

    /// Typed values from a form that passed its schema. Checks that every
    /// referenced record exists in `references`.
    fn fields(&self, form: &Self::Form, references: &Self::References) -> Result<Self::Fields, Vec<FieldError>>;

    /// Existing record that a new one would duplicate
    async fn duplicate_of(&self, _store: &dyn CatalogStore, _fields: &Self::Fields) -> AppResult<Option<i32>> {
        Ok(None)
    }

    async fn insert(&self, store: &dyn CatalogStore, fields: &Self::Fields) -> AppResult<Self::Record>;

    async fn update(&self, store: &dyn CatalogStore, id: i32, fields: &Self::Fields) -> AppResult<Option<Self::Record>>;

    async fn remove(&self, store: &dyn CatalogStore, id: i32) -> AppResult<bool>;
}

/// The five catalog operations for one entity
pub struct Workflow<E: Entity> {
    store: Arc<dyn CatalogStore>,
    entity: E,
}

impl<E: Entity + Clone> Clone for Workflow<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            entity: self.entity.clone(),
        }
    }
}

impl<E: Entity> Workflow<E> {
    pub fn new(store: Arc<dyn CatalogStore>, entity: E) -> Self {
        Self { store, entity }
    }

    fn store(&self) -> &dyn CatalogStore {
        self.store.as_ref()
    }

    /// All records in their fixed order
    pub async fn list(&self) -> AppResult<Outcome> {
        let rows = self.entity.list(self.store()).await?;
        let view = View::new(format!("{}_list", E::KEY), E::LIST_TITLE)
            .with(&format!("{}_list", E::KEY), &rows)?;
        Ok(Outcome::Render(view))
    }

    /// One record and its dependents, fetched in parallel
    pub async fn detail(&self, id: i32) -> AppResult<Outcome> {
        let (record, dependents) = tokio::try_join!(
            self.entity.find(self.store(), id),
            self.entity.dependents(self.store(), id),
        )?;
        let record = record.ok_or_else(|| self.entity.not_found())?;
        let detail = self.entity.resolve(self.store(), record).await?;

        let mut view = View::new(format!("{}_detail", E::KEY), self.entity.detail_title(&detail))
            .with(E::KEY, &detail)?;
        if let Some(deps) = E::DEPENDENTS {
            view = view.with(deps.key, &dependents)?;
        }
        Ok(Outcome::Render(view))
    }

    /// Empty creation form
    pub async fn create_form(&self) -> AppResult<Outcome> {
        let references = self.entity.references(self.store()).await?;
        let view = self.form_view(create_title::<E>(), &references, &E::Form::default(), &[])?;
        Ok(Outcome::Render(view))
    }

    /// Validate and store a new record, or show the form again with errors
    pub async fn create(&self, input: &FormData) -> AppResult<Outcome> {
        let validated = self.entity.schema().apply(input);
        let form = self.entity.candidate(None, &validated.values);
        let references = self.entity.references(self.store()).await?;

        let fields = match self.check(validated.errors, &form, &references) {
            Ok(fields) => fields,
            Err(errors) => {
                tracing::debug!("{} form rejected with {} error(s)", E::KEY, errors.len());
                let view = self.form_view(create_title::<E>(), &references, &form, &errors)?;
                return Ok(Outcome::Render(view));
            }
        };

        if let Some(existing) = self.entity.duplicate_of(self.store(), &fields).await? {
            tracing::info!("{} already exists as id={}, not creating", E::KEY, existing);
            return Ok(Outcome::redirect(self.entity.detail_url(existing)));
        }

        let record = self.entity.insert(self.store(), &fields).await?;
        let id = self.entity.record_id(&record);
        tracing::info!("Created {} id={}", E::KEY, id);
        Ok(Outcome::redirect(self.entity.detail_url(id)))
    }

    /// Deletion confirmation page. A record that is already gone sends the
    /// operator back to the list.
    pub async fn delete_form(&self, id: i32) -> AppResult<Outcome> {
        let (record, dependents) = tokio::try_join!(
            self.entity.find(self.store(), id),
            self.entity.dependents(self.store(), id),
        )?;
        let Some(record) = record else {
            return Ok(Outcome::redirect(E::LIST_PATH));
        };
        let view = self.delete_view(&record, &dependents, None)?;
        Ok(Outcome::Render(view))
    }

    /// Delete the record named in the confirmation form. Dependents are
    /// looked up again here: the confirmation page may be stale.
    pub async fn delete(&self, id: i32, input: &FormData) -> AppResult<Outcome> {
        let target = delete_target::<E>(id, input)?;

        let (record, dependents) = tokio::try_join!(
            self.entity.find(self.store(), target),
            self.entity.dependents(self.store(), target),
        )?;
        let Some(record) = record else {
            return Ok(Outcome::redirect(E::LIST_PATH));
        };

        if let Some(deps) = E::DEPENDENTS {
            if !dependents.is_empty() {
                tracing::info!(
                    "Refused to delete {} id={}: {} {} still reference it",
                    E::KEY,
                    target,
                    dependents.len(),
                    deps.label
                );
                let refusal = format!(
                    "Delete the following {} before attempting to delete this {}.",
                    deps.label,
                    E::LABEL.to_lowercase()
                );
                let view = self.delete_view(&record, &dependents, Some(refusal))?;
                return Ok(Outcome::Render(view));
            }
        }

        if self.entity.remove(self.store(), target).await? {
            tracing::info!("Deleted {} id={}", E::KEY, target);
        } else {
            tracing::debug!("{} id={} was already deleted", E::KEY, target);
        }
        Ok(Outcome::redirect(E::LIST_PATH))
    }

    /// Edit form pre-populated with the stored record
    pub async fn update_form(&self, id: i32) -> AppResult<Outcome> {
        let (record, references) = tokio::try_join!(
            self.entity.find(self.store(), id),
            self.entity.references(self.store()),
        )?;
        let record = record.ok_or_else(|| self.entity.not_found())?;
        let form = self.entity.form_from_record(&record);
        let view = self.form_view(update_title::<E>(), &references, &form, &[])?;
        Ok(Outcome::Render(view))
    }

    /// Validate and update record `id` in place, or show the form again
    /// with errors. The record keeps its identity.
    pub async fn update(&self, id: i32, input: &FormData) -> AppResult<Outcome> {
        let validated = self.entity.schema().apply(input);
        let form = self.entity.candidate(Some(id), &validated.values);
        let references = self.entity.references(self.store()).await?;

        match self.check(validated.errors, &form, &references) {
            Ok(fields) => {
                let record = self
                    .entity
                    .update(self.store(), id, &fields)
                    .await?
                    .ok_or_else(|| self.entity.not_found())?;
                tracing::info!("Updated {} id={}", E::KEY, id);
                Ok(Outcome::redirect(self.entity.detail_url(self.entity.record_id(&record))))
            }
            Err(errors) => {
                tracing::debug!("{} id={} form rejected with {} error(s)", E::KEY, id, errors.len());
                let view = self.form_view(update_title::<E>(), &references, &form, &errors)?;
                Ok(Outcome::Render(view))
            }
        }
    }

    fn check(
        &self,
        errors: Vec<FieldError>,
        form: &E::Form,
        references: &E::References,
    ) -> Result<E::Fields, Vec<FieldError>> {
        if !errors.is_empty() {
            return Err(errors);
        }
        self.entity.fields(form, references)
    }

    fn form_view(
        &self,
        title: String,
        references: &E::References,
        form: &E::Form,
        errors: &[FieldError],
    ) -> AppResult<View> {
        let mut view = View::new(format!("{}_form", E::KEY), title)
            .with(E::KEY, form)?
            .extend(self.entity.form_context(references, form)?);
        if !errors.is_empty() {
            view = view.with("errors", errors)?;
        }
        Ok(view)
    }

    fn delete_view(
        &self,
        record: &E::Record,
        dependents: &[E::Dependent],
        refusal: Option<String>,
    ) -> AppResult<View> {
        let mut view = View::new(format!("{}_delete", E::KEY), format!("Delete {}", E::LABEL))
            .with(E::KEY, record)?;
        if let Some(deps) = E::DEPENDENTS {
            view = view.with(deps.key, dependents)?;
        }
        if let Some(refusal) = refusal {
            view = view.with("refusal", &refusal)?;
        }
        Ok(view)
    }
}

fn create_title<E: Entity>() -> String {
    format!("Create {}", E::LABEL)
}

fn update_title<E: Entity>() -> String {
    format!("Update {}", E::LABEL)
}

/// Id named by the confirmation form. It must agree with the record the
/// page was opened for, the one whose dependents get checked.
fn delete_target<E: Entity>(id: i32, input: &FormData) -> AppResult<i32> {
    let raw = input
        .get(E::DELETE_FIELD)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing {}", E::DELETE_FIELD)))?;
    let target: i32 = raw
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {}: {}", E::DELETE_FIELD, raw)))?;
    if target != id {
        return Err(AppError::BadRequest(format!(
            "{} {} does not match the record being deleted ({})",
            E::DELETE_FIELD,
            target,
            id
        )));
    }
    Ok(target)
}
