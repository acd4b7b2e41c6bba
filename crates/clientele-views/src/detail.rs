//! The single-customer screen.

use tracing::warn;

use crate::api::CustomerApi;
use crate::format::format_date;
use crate::record::CustomerRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Loaded(CustomerRecord),
    /// The fetch failed; holds the message to show.
    Failed(String),
}

pub struct CustomerDetailView<A> {
    api: A,
    id: String,
    state: DetailState,
}

impl<A: CustomerApi> CustomerDetailView<A> {
    pub fn new(api: A, id: impl Into<String>) -> Self {
        Self {
            api,
            id: id.into(),
            state: DetailState::Loading,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Fetch the customer. Without an id there is nothing to fetch and
    /// the view keeps loading.
    pub async fn load(&mut self) {
        if self.id.trim().is_empty() {
            return;
        }
        self.state = match self.api.get(&self.id).await {
            Ok(record) => DetailState::Loaded(record),
            Err(e) => {
                warn!(error = %e, customer_id = %self.id, "Error fetching customer");
                DetailState::Failed(format!("Error fetching customer: {e}"))
            }
        };
    }

    /// Lines to print.
    pub fn render(&self) -> Vec<String> {
        match &self.state {
            DetailState::Loading => vec!["Loading...".into()],
            DetailState::Loaded(record) => vec![
                record.name.clone(),
                format!(
                    "Date of Birth: {}",
                    format_date(record.date_of_birth.as_deref())
                ),
                format!(
                    "Member Number: {}",
                    record
                        .member_number
                        .map(|n| n.to_string())
                        .unwrap_or_else(|| "N/A".into())
                ),
                format!("Interests: {}", record.interests),
            ],
            DetailState::Failed(message) => vec![message.clone()],
        }
    }
}
