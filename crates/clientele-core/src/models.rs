//! Domain models for Clientele.
//!
//! The customer is the only persisted entity.

pub mod customer;
