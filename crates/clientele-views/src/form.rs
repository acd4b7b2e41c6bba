//! The create/edit form of the list view.

use chrono::NaiveDate;
use clientele_core::models::customer::{CreateCustomer, UpdateCustomer};

use crate::error::{ViewError, ViewResult};
use crate::format::date_for_editing;
use crate::record::CustomerRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    DateOfBirth,
    MemberNumber,
    Interests,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::DateOfBirth,
        FormField::MemberNumber,
        FormField::Interests,
    ];
}

/// Whether submitting the form creates a customer or updates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

impl FormMode {
    pub(crate) fn verb(&self) -> &'static str {
        match self {
            FormMode::Create => "add",
            FormMode::Edit { .. } => "update",
        }
    }

    pub(crate) fn gerund(&self) -> &'static str {
        match self {
            FormMode::Create => "adding",
            FormMode::Edit { .. } => "updating",
        }
    }

    pub(crate) fn past(&self) -> &'static str {
        match self {
            FormMode::Create => "added",
            FormMode::Edit { .. } => "updated",
        }
    }
}

/// Form contents, held as the text the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub name: String,
    /// `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub member_number: String,
    pub interests: String,
}

impl CustomerForm {
    /// Pre-populate from a record, normalizing its date for editing.
    pub fn from_record(record: &CustomerRecord) -> Self {
        Self {
            name: record.name.clone(),
            date_of_birth: date_for_editing(record.date_of_birth.as_deref()),
            member_number: record
                .member_number
                .map(|n| n.to_string())
                .unwrap_or_default(),
            interests: record.interests.clone(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::DateOfBirth => &self.date_of_birth,
            FormField::MemberNumber => &self.member_number,
            FormField::Interests => &self.interests,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::DateOfBirth => self.date_of_birth = value,
            FormField::MemberNumber => self.member_number = value,
            FormField::Interests => self.interests = value,
        }
    }

    /// Payload for a create request.
    pub fn to_create(&self) -> ViewResult<CreateCustomer> {
        let date_of_birth = NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d")
            .map_err(|_| {
                ViewError::InvalidForm(format!(
                    "Date of Birth `{}` is not a date (YYYY-MM-DD)",
                    self.date_of_birth
                ))
            })?;
        let member_number = self.member_number.trim().parse::<i64>().map_err(|_| {
            ViewError::InvalidForm(format!(
                "Member Number `{}` is not a whole number",
                self.member_number
            ))
        })?;

        Ok(CreateCustomer {
            name: self.name.clone(),
            date_of_birth,
            member_number,
            interests: self.interests.clone(),
        })
    }

    /// Payload for an update request. The form always carries every
    /// field, so this is a full replacement.
    pub fn to_update(&self) -> ViewResult<UpdateCustomer> {
        self.to_create().map(UpdateCustomer::from)
    }
}
