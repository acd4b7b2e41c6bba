//! SurrealDB repository implementations.

mod customer;

pub use customer::SurrealCustomerRepository;
