//! Command-line front end of the control room.
//!
//! Every invocation is one session: restore the persisted project, run a
//! single [`cli::Command`], render its [`commands::Output`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod render;
