//! Domain types for the control room.
//!
//! Project records and identifier rules, decision records, the registry wire
//! transform, and the error taxonomy shared by the client and session crates.
//! Nothing in this crate performs I/O.

pub mod decision;
pub mod error;
pub mod project;
pub mod registry;
pub mod types;
