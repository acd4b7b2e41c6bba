//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Lookups by id report a missing
//! record as [`ClienteleError::NotFound`](crate::error::ClienteleError::NotFound);
//! writes report constraint violations as `Validation` or `AlreadyExists`.

use uuid::Uuid;

use crate::error::ClienteleResult;
use crate::models::customer::{CreateCustomer, Customer, UpdateCustomer};

pub trait CustomerRepository: Send + Sync {
    /// Every customer, oldest first. Empty when none exist.
    fn list(&self) -> impl Future<Output = ClienteleResult<Vec<Customer>>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = ClienteleResult<Customer>> + Send;
    /// Insert a new customer; the store assigns the id and timestamps.
    fn create(&self, input: CreateCustomer)
    -> impl Future<Output = ClienteleResult<Customer>> + Send;
    /// Apply the present fields of `input` and return the updated record.
    fn update(
        &self,
        id: Uuid,
        input: UpdateCustomer,
    ) -> impl Future<Output = ClienteleResult<Customer>> + Send;
    /// Permanently remove a customer, returning the record as it was.
    fn delete(&self, id: Uuid) -> impl Future<Output = ClienteleResult<Customer>> + Send;
}
