//! Clientele Core: Domain model, error taxonomy and repository
//! contract shared by the store, the endpoints and the views.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{ClienteleError, ClienteleResult};
pub use models::customer::{CreateCustomer, Customer, UpdateCustomer};
pub use repository::CustomerRepository;
