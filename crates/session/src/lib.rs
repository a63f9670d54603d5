//! Session layer of the control room.
//!
//! Holds the current project ([`state::SessionState`]) with its durable
//! [`store`], the startup/selection [`gate`], and the project-bound
//! [`dashboard`]. Every decision query made through this crate is
//! parameterized by the selected project; there is no default project.

pub mod dashboard;
pub mod error;
pub mod gate;
pub mod state;
pub mod store;
