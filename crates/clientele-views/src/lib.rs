//! Clientele Views: The customer list and detail screens as view
//! models.
//!
//! Each view owns its UI state, talks to the endpoints through a
//! [`CustomerApi`], and reconciles its state from the responses. The
//! `clientele` binary renders them in a terminal.

pub mod api;
pub mod cli;
pub mod config;
pub mod detail;
pub mod error;
pub mod form;
pub mod format;
pub mod list;
pub mod notification;
pub mod record;

pub use api::{CustomerApi, HttpCustomerApi};
pub use config::ViewConfig;
pub use detail::{CustomerDetailView, DetailState};
pub use error::{ViewError, ViewResult};
pub use form::{CustomerForm, FormField, FormMode};
pub use list::{CustomerDetails, CustomerListView, CustomerRow, Overlay, ViewState};
pub use notification::{Notification, NotificationSlot, Severity};
pub use record::CustomerRecord;
