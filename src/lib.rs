//! Library crate for userdeck.
//!
//! This crate exposes the building blocks of the TUI:
//! - Users API wire types and HTTP client (`api`)
//! - Application state, key handling and the run loop (`app`)
//! - Command-line configuration (`config`)
//! - Error and result types (`error`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `userdeck` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
pub use error::{ApiError, Result};
