//! Backend clients for the control room.
//!
//! Two seams, [`directory::ProjectDirectory`] and
//! [`decisions::DecisionQuery`], each with an HTTP strategy (built on
//! [`reqwest`]) and an in-memory fixture strategy. [`backend::Backends`]
//! picks one pair from configuration at startup.
//!
//! Nothing here computes or checks hashes; decision fields are passed
//! through as the backend sent them.

pub mod api;
pub mod backend;
pub mod decisions;
pub mod directory;
pub mod error;
pub mod fixtures;
