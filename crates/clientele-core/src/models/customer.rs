//! Customer domain model.
//!
//! A customer is the only persisted entity. JSON uses camelCase keys;
//! the date of birth travels as a plain calendar date (`YYYY-MM-DD`)
//! but is stored as an instant at midnight UTC.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ClienteleError, ClienteleResult};

/// A persisted customer record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Assigned by the store on creation; never changes.
    pub id: Uuid,
    pub name: String,
    #[serde(deserialize_with = "date_of_birth::deserialize")]
    pub date_of_birth: NaiveDate,
    /// Unique across all customers.
    pub member_number: i64,
    pub interests: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomer {
    pub name: String,
    #[serde(deserialize_with = "date_of_birth::deserialize")]
    pub date_of_birth: NaiveDate,
    pub member_number: i64,
    pub interests: String,
}

/// Fields that can be updated on an existing customer.
///
/// `None` (absent or `null` in JSON) leaves the stored value unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "date_of_birth::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
}

impl CreateCustomer {
    /// Check field-level constraints before the record is written.
    pub fn validate(&self) -> ClienteleResult<()> {
        require_text("name", &self.name)?;
        require_text("interests", &self.interests)
    }
}

impl UpdateCustomer {
    /// Check the constraints of every field present in the update.
    pub fn validate(&self) -> ClienteleResult<()> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(interests) = &self.interests {
            require_text("interests", interests)?;
        }
        Ok(())
    }

    /// True when the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date_of_birth.is_none()
            && self.member_number.is_none()
            && self.interests.is_none()
    }
}

impl From<CreateCustomer> for UpdateCustomer {
    fn from(input: CreateCustomer) -> Self {
        Self {
            name: Some(input.name),
            date_of_birth: Some(input.date_of_birth),
            member_number: Some(input.member_number),
            interests: Some(input.interests),
        }
    }
}

fn require_text(field: &str, value: &str) -> ClienteleResult<()> {
    if value.trim().is_empty() {
        return Err(ClienteleError::validation(format!(
            "`{field}` is required and must not be empty"
        )));
    }
    Ok(())
}

/// Parse a date of birth given either as `YYYY-MM-DD` or as an
/// RFC 3339 instant. Instants keep their calendar date in UTC.
pub fn parse_date_of_birth(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

/// The instant a date of birth is stored as: midnight UTC.
pub fn date_of_birth_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

mod date_of_birth {
    use chrono::NaiveDate;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    use super::parse_date_of_birth;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw)
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn parse<E: Error>(raw: &str) -> Result<NaiveDate, E> {
        parse_date_of_birth(raw).ok_or_else(|| {
            E::custom(format!(
                "invalid dateOfBirth `{raw}`: expected YYYY-MM-DD or an RFC 3339 timestamp"
            ))
        })
    }
}
