//! The customer as the views receive it.

use serde::{Deserialize, Serialize};

/// A customer record as returned by the endpoints.
///
/// Everything but `id` may be missing. Dates stay raw strings until
/// they are formatted, so a malformed one renders as `Invalid Date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub member_number: Option<i64>,
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
