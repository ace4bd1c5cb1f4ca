//! tenant-console: terminal administration console for a tenant-management backend.
//!
//! The [`table`] module holds the client-side table view engine shared by every
//! resource list. [`page`] wraps it with fetch/retry/delete state, and
//! [`console`] renders it in the terminal.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod entities;
pub mod errors;
pub mod i18n;
pub mod models;
pub mod page;
pub mod session;
pub mod table;
