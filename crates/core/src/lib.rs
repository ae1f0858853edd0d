//! Domain types and pure business rules for the flightdesk booking API.
//!
//! Nothing in this crate touches the database; the `db` crate persists what
//! these modules validate and normalize.

pub mod booking;
pub mod error;
pub mod flight;
pub mod types;
