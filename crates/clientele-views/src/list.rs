//! The customer list screen.
//!
//! The list is fetched once on mount and afterwards reconciled from the
//! responses of the view's own writes; it is never refetched. At most one
//! overlay (form, details panel or delete confirmation) is open at a time,
//! and notifications are independent of the overlay.

use tracing::{error, info};

use crate::api::CustomerApi;
use crate::form::{CustomerForm, FormField, FormMode};
use crate::format::format_date;
use crate::notification::{Notification, NotificationSlot};
use crate::record::CustomerRecord;

/// What is drawn over the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Form { mode: FormMode, form: CustomerForm },
    Details { id: String },
    ConfirmDelete { id: String },
}

/// Coarse state of the screen, for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    NoData,
    Loaded,
    FormOpen(FormMode),
    DetailsOpen,
    ConfirmingDelete,
}

/// A table row, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub date_of_birth: String,
    pub member_number: String,
    pub interests: String,
}

/// The read-only details panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub date_of_birth: String,
    pub member_number: String,
    pub interests: String,
}

impl From<&CustomerRecord> for CustomerDetails {
    fn from(record: &CustomerRecord) -> Self {
        Self {
            name: record.name.clone(),
            date_of_birth: format_date(record.date_of_birth.as_deref()),
            member_number: member_number_text(record),
            interests: record.interests.clone(),
        }
    }
}

fn member_number_text(record: &CustomerRecord) -> String {
    record
        .member_number
        .map(|n| n.to_string())
        .unwrap_or_else(|| "N/A".into())
}

pub struct CustomerListView<A> {
    api: A,
    loaded: bool,
    customers: Vec<CustomerRecord>,
    overlay: Overlay,
    notification: NotificationSlot,
}

impl<A: CustomerApi> CustomerListView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            loaded: false,
            customers: Vec::new(),
            overlay: Overlay::None,
            notification: NotificationSlot::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the full list. A failure leaves the view without data and
    /// raises an error notification.
    pub async fn mount(&mut self) {
        match self.api.list().await {
            Ok(customers) => {
                self.customers = customers;
                self.loaded = true;
            }
            Err(e) => {
                error!(error = %e, "Error fetching customers");
                self.notification
                    .error(format!("Error fetching customers: {e}"));
            }
        }
    }

    pub fn state(&self) -> ViewState {
        match &self.overlay {
            Overlay::Form { mode, .. } => ViewState::FormOpen(mode.clone()),
            Overlay::Details { .. } => ViewState::DetailsOpen,
            Overlay::ConfirmDelete { .. } => ViewState::ConfirmingDelete,
            Overlay::None if self.loaded => ViewState::Loaded,
            Overlay::None => ViewState::NoData,
        }
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn customers(&self) -> &[CustomerRecord] {
        &self.customers
    }

    pub fn rows(&self) -> Vec<CustomerRow> {
        self.customers
            .iter()
            .map(|c| CustomerRow {
                id: c.id.clone(),
                name: c.name.clone(),
                date_of_birth: format_date(c.date_of_birth.as_deref()),
                member_number: member_number_text(c),
                interests: c.interests.clone(),
            })
            .collect()
    }

    fn find(&self, id: &str) -> Option<&CustomerRecord> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Open an empty form in create mode.
    pub fn open_create(&mut self) {
        self.overlay = Overlay::Form {
            mode: FormMode::Create,
            form: CustomerForm::default(),
        };
    }

    /// Open the form pre-populated from the customer `id`. Returns false
    /// when no such customer is listed.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(record) = self.find(id) else {
            return false;
        };
        let form = CustomerForm::from_record(record);
        self.overlay = Overlay::Form {
            mode: FormMode::Edit { id: id.to_string() },
            form,
        };
        true
    }

    pub fn form(&self) -> Option<&CustomerForm> {
        match &self.overlay {
            Overlay::Form { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Change a field of the open form. No-op without a form.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        if let Overlay::Form { form, .. } = &mut self.overlay {
            form.set(field, value);
        }
    }

    pub fn close_form(&mut self) {
        if matches!(self.overlay, Overlay::Form { .. }) {
            self.overlay = Overlay::None;
        }
    }

    pub fn open_details(&mut self, id: &str) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.overlay = Overlay::Details { id: id.to_string() };
        true
    }

    pub fn close_details(&mut self) {
        if matches!(self.overlay, Overlay::Details { .. }) {
            self.overlay = Overlay::None;
        }
    }

    /// The details panel contents, when it is open.
    pub fn details(&self) -> Option<CustomerDetails> {
        match &self.overlay {
            Overlay::Details { id } => self.find(id).map(CustomerDetails::from),
            _ => None,
        }
    }

    /// Send the open form. On success the returned record replaces its
    /// entry (edit) or is appended (create) and the form closes; on
    /// failure the form stays open and the list is untouched.
    pub async fn submit(&mut self) -> bool {
        let Overlay::Form { mode, form } = &self.overlay else {
            return false;
        };
        let mode = mode.clone();

        let result = match &mode {
            FormMode::Create => match form.to_create() {
                Ok(payload) => self.api.create(&payload).await,
                Err(e) => Err(e),
            },
            FormMode::Edit { id } => match form.to_update() {
                Ok(payload) => self.api.update(id, &payload).await,
                Err(e) => Err(e),
            },
        };

        match result {
            Ok(saved) => {
                match self.customers.iter_mut().find(|c| c.id == saved.id) {
                    Some(existing) => *existing = saved,
                    None => self.customers.push(saved),
                }
                self.overlay = Overlay::None;
                info!(action = mode.verb(), "Customer saved");
                self.notification
                    .success(format!("Customer {} successfully", mode.past()));
                true
            }
            Err(e) => {
                error!(error = %e, action = mode.verb(), "Error saving customer");
                self.notification
                    .error(format!("Error {} customer: {e}", mode.gerund()));
                false
            }
        }
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: &str) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.overlay = Overlay::ConfirmDelete { id: id.to_string() };
        true
    }

    pub fn cancel_delete(&mut self) {
        if matches!(self.overlay, Overlay::ConfirmDelete { .. }) {
            self.overlay = Overlay::None;
        }
    }

    /// Delete the customer awaiting confirmation. The entry is removed
    /// only after the endpoint confirms.
    pub async fn confirm_delete(&mut self) -> bool {
        let Overlay::ConfirmDelete { id } = &self.overlay else {
            return false;
        };
        let id = id.clone();
        self.overlay = Overlay::None;

        match self.api.delete(&id).await {
            Ok(()) => {
                self.customers.retain(|c| c.id != id);
                info!(customer_id = %id, "Customer deleted");
                self.notification.success("Customer deleted successfully");
                true
            }
            Err(e) => {
                error!(error = %e, customer_id = %id, "Error deleting customer");
                self.notification
                    .error(format!("Error deleting customer: {e}"));
                false
            }
        }
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.current()
    }

    pub fn notifications(&self) -> &NotificationSlot {
        &self.notification
    }

    pub fn dismiss_notification(&mut self) {
        self.notification.dismiss();
    }
}
