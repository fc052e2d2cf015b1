//! Page controller tying the form, the table and the API together.

use crate::api::{Api, ApiResult};
use crate::form::{FormError, FormState, Mode, Record};
use crate::table::{Table, render_table};
use crate::ApiError;

pub struct PageController<R: Record, A> {
    api: A,
    records: Vec<R>,
    references: R::References,
    form: FormState<R>,
    last_error: Option<ApiError>,
}

impl<R: Record, A: Api<R>> PageController<R, A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            records: Vec::new(),
            references: R::References::default(),
            form: FormState::new(),
            last_error: None,
        }
    }

    /// Fetch the record list and the dropdown references concurrently.
    ///
    /// A failed fetch leaves its part empty and is kept for display.
    pub async fn mount(&mut self) -> ApiResult<()> {
        let (records, references) = tokio::join!(self.api.list(), self.api.references());
        let result = records.and_then(|records| {
            self.records = records;
            self.references = references?;
            Ok(())
        });
        if let Err(err) = &result {
            log::warn!("mount failed: {err}");
            self.last_error = Some(err.clone());
        }
        result
    }

    pub async fn refresh(&mut self) -> ApiResult<()> {
        self.records = self.api.list().await?;
        Ok(())
    }

    pub fn begin_create(&mut self) {
        self.form.begin_create();
    }

    pub fn begin_edit(&mut self, record: R) {
        self.form.begin_edit(record);
    }

    /// Open the loaded record with `id` for editing. Returns `false` when the
    /// current list has no such record.
    pub fn begin_edit_by_id(&mut self, id: &str) -> bool {
        match self.records.iter().find(|r| r.id() == id) {
            Some(record) => {
                let record = record.clone();
                self.form.begin_edit(record);
                true
            }
            None => false,
        }
    }

    pub fn set_field(&mut self, field: R::Field, value: &str) -> Result<(), FormError> {
        self.form.set(field, value)
    }

    /// Replace the form wholesale, e.g. with a restored submission.
    pub fn load_form(&mut self, form: FormState<R>) {
        self.form = form;
    }

    /// Send the form as a create or an update, depending on the mode.
    ///
    /// On success the form is reset and the list re-fetched. On failure the
    /// form keeps its contents and the error is kept for display.
    pub async fn submit(&mut self) -> ApiResult<()> {
        let record = self.form.record();
        let result = match self.form.mode() {
            Mode::Creating => self.api.create(record).await,
            Mode::Editing => self.api.update(record).await,
        };
        if let Err(err) = result {
            log::warn!("submit of `{}` failed: {err}", record.id());
            self.last_error = Some(err.clone());
            return Err(err);
        }
        self.last_error = None;
        self.form.reset();
        self.refresh().await
    }

    /// Delete by id, then re-fetch the list whatever the outcome.
    pub async fn delete(&mut self, id: &str) -> ApiResult<()> {
        let result = self.api.delete(id).await;
        match &result {
            Ok(()) => self.last_error = None,
            Err(err) => {
                log::warn!("delete of `{id}` failed: {err}");
                self.last_error = Some(err.clone());
            }
        }
        self.refresh().await?;
        result
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn references(&self) -> &R::References {
        &self.references
    }

    pub fn form(&self) -> &FormState<R> {
        &self.form
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    pub fn table(&self) -> Table {
        render_table(&self.records)
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
