//! Application Records Screen
//!
//! View state and operations for managing application records. Requests run
//! on worker threads and their results are applied on the UI thread by `poll`.

pub mod draft;
pub mod expiry;
pub mod ports;

use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use reqwest::Method;
use serde_json::Value;

use crate::api::{app_path, ApiError, ApiResult, AppRecord, HttpClient, APPS_PATH};

pub use draft::{DialogMode, Draft, FieldErrors};
pub use expiry::ExpiryInput;
pub use ports::{LoadingFlag, Notifier, Translator};

/// Delay before validation state is cleared on a freshly opened dialog
pub const FORM_RESET_DELAY: Duration = Duration::from_millis(10);

const SETTLE_TIMEOUT: Duration = Duration::from_secs(30);

/// The action a request was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List,
    Create,
    Fetch,
    Update { from_toggle: bool },
    Delete,
}

/// A finished request waiting to be applied
#[derive(Debug)]
pub struct Completion {
    pub request: Request,
    pub result: ApiResult<Value>,
}

pub struct ApplicationsScreen {
    client: Arc<dyn HttpClient>,
    notifier: Rc<dyn Notifier>,
    translator: Rc<dyn Translator>,
    loading: LoadingFlag,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    in_flight: usize,
    form_reset_at: Option<Instant>,
    draft_revision: u64,

    pub records: Vec<AppRecord>,
    pub dialog_visible: bool,
    pub mode: DialogMode,
    pub draft: Draft,
    pub field_errors: FieldErrors,
    /// Shared by every row's delete confirmation
    pub delete_confirm_visible: bool,
    pub delete_target: Option<String>,
}

impl ApplicationsScreen {
    pub fn new(
        client: Arc<dyn HttpClient>,
        notifier: Rc<dyn Notifier>,
        translator: Rc<dyn Translator>,
        loading: LoadingFlag,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            notifier,
            translator,
            loading,
            tx,
            rx,
            in_flight: 0,
            form_reset_at: None,
            draft_revision: 0,
            records: Vec::new(),
            dialog_visible: false,
            mode: DialogMode::New,
            draft: Draft::default(),
            field_errors: FieldErrors::default(),
            delete_confirm_visible: false,
            delete_target: None,
        }
    }

    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Bumped whenever the draft is replaced wholesale
    pub fn draft_revision(&self) -> u64 {
        self.draft_revision
    }

    pub fn load_records(&mut self) {
        self.dispatch(Request::List, Method::GET, APPS_PATH.to_string(), None);
    }

    pub fn open_create_dialog(&mut self) {
        self.mode = DialogMode::New;
        self.replace_draft(Draft::blank());
        self.dialog_visible = true;
        self.schedule_form_reset();
    }

    pub fn open_edit_dialog(&mut self, record: &AppRecord) {
        self.mode = DialogMode::Edit;
        self.replace_draft(Draft::from_record(record));
        self.dialog_visible = true;
        self.schedule_form_reset();
    }

    pub fn open_view_dialog(&mut self, app_id: &str) {
        self.dispatch(Request::Fetch, Method::GET, app_path(app_id), None);
    }

    pub fn close_dialog(&mut self) {
        self.dialog_visible = false;
        self.draft.wipe();
    }

    /// Validate, then POST the draft
    pub fn submit_create(&mut self) -> bool {
        if !self.validate_draft() {
            return false;
        }
        let body = self.draft.to_record().to_value();
        self.dispatch(Request::Create, Method::POST, APPS_PATH.to_string(), Some(body));
        true
    }

    /// PUT a record.
    ///
    /// `Some(row)` comes from the status switch and skips validation; `None`
    /// saves the dialog draft.
    pub fn submit_update(&mut self, row: Option<AppRecord>) -> bool {
        match row {
            Some(row) => {
                let body = draft::normalized_row(&row);
                let path = app_path(&body.app_id);
                self.dispatch(Request::Update { from_toggle: true }, Method::PUT, path, Some(body.to_value()));
            }
            None => {
                if !self.validate_draft() {
                    return false;
                }
                let body = self.draft.to_record();
                let path = app_path(&body.app_id);
                self.dispatch(Request::Update { from_toggle: false }, Method::PUT, path, Some(body.to_value()));
            }
        }
        true
    }

    /// Flip a row's switch and send it
    pub fn toggle_status(&mut self, index: usize) {
        let Some(record) = self.records.get_mut(index) else { return };
        record.status = !record.status;
        let row = record.clone();
        self.submit_update(Some(row));
    }

    pub fn request_delete(&mut self, app_id: &str) {
        self.delete_target = Some(app_id.to_string());
        self.delete_confirm_visible = true;
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirm_visible = false;
    }

    pub fn delete_record(&mut self, record: &AppRecord) {
        self.dispatch(Request::Delete, Method::DELETE, app_path(&record.app_id), None);
    }

    /// Delete the row the confirmation was opened for
    pub fn confirm_delete(&mut self) {
        let Some(app_id) = self.delete_target.clone() else {
            self.delete_confirm_visible = false;
            return;
        };
        let record = self
            .records
            .iter()
            .find(|r| r.app_id == app_id)
            .cloned()
            .unwrap_or_else(|| AppRecord { app_id, ..Default::default() });
        self.delete_record(&record);
    }

    /// Run deferred work that is due
    pub fn tick(&mut self, now: Instant) {
        if self.form_reset_at.is_some_and(|at| now >= at) {
            self.form_reset_at = None;
            self.field_errors = FieldErrors::default();
        }
    }

    /// Apply every completion that has arrived
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Block until every in-flight request has been applied
    pub fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.rx.recv_timeout(SETTLE_TIMEOUT) {
                Ok(completion) => self.apply(completion),
                Err(RecvTimeoutError::Timeout) => {
                    tracing::warn!(in_flight = self.in_flight, "gave up waiting for requests");
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn dispatch(&mut self, request: Request, method: Method, path: String, body: Option<Value>) {
        tracing::debug!(?request, %method, %path, "dispatching request");

        let client = Arc::clone(&self.client);
        let loading = self.loading.clone();
        let tx = self.tx.clone();

        self.in_flight += 1;
        loading.set(true);

        thread::spawn(move || {
            let result = client.send(method, &path, body.as_ref());
            loading.set(false);
            let _ = tx.send(Completion { request, result });
        });
    }

    fn apply(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let Completion { request, result } = completion;

        let value = match result {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(?request, error = %e, "request failed");
                self.notify_failure(&e);
                return;
            }
        };

        match request {
            Request::List => match AppRecord::list_from_value(value) {
                Ok(records) => {
                    tracing::debug!(count = records.len(), "records loaded");
                    self.records = records;
                }
                Err(e) => self.notify_failure(&ApiError::Decode(e.to_string())),
            },
            Request::Create => {
                self.close_dialog();
                self.notify_success("success.createSuccess");
                self.load_records();
            }
            Request::Fetch => match AppRecord::from_value(value) {
                Ok(record) => {
                    self.replace_draft(Draft::from_record(&record));
                    self.mode = DialogMode::View;
                    self.dialog_visible = true;
                }
                Err(e) => self.notify_failure(&ApiError::Decode(e.to_string())),
            },
            Request::Update { from_toggle } => {
                if !from_toggle {
                    self.close_dialog();
                }
                self.notify_success("oper.editSuccess");
                self.load_records();
            }
            Request::Delete => {
                self.load_records();
                self.delete_confirm_visible = false;
                self.delete_target = None;
            }
        }
    }

    fn validate_draft(&mut self) -> bool {
        let message = self.translator.translate("app.errors");
        self.field_errors = self.draft.validate(&message);
        self.field_errors.is_empty()
    }

    fn replace_draft(&mut self, draft: Draft) {
        self.draft.wipe();
        self.draft = draft;
        self.draft_revision += 1;
    }

    fn schedule_form_reset(&mut self) {
        self.form_reset_at = Some(Instant::now() + FORM_RESET_DELAY);
    }

    fn notify_success(&self, key: &str) {
        let text = self.translator.translate(key);
        tracing::info!(%text, "notify success");
        self.notifier.success(&text);
    }

    fn notify_failure(&self, error: &ApiError) {
        let text = error
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| self.translator.translate("error.networkError"));
        tracing::warn!(%text, "notify error");
        self.notifier.error(&text);
    }
}
