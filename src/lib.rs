//! `sales-forecast` library crate.
//!
//! The binary (`forecast`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the session controller can be driven by other front-ends
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod series;
