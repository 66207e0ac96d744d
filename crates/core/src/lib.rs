//! Shared primitives for the timeslot backend.
//!
//! Nothing in this crate touches the database or HTTP; both `timeslot-db`
//! and `timeslot-api` depend on it for ids, timestamps and the domain error
//! taxonomy.

pub mod error;
pub mod types;
