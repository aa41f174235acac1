//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`now`] - Air quality at the nearest station
//! - [`forecast`] - Raw forecast document for one station
//! - [`compute`] - Offline AQI computation for one measurement
//! - [`init`] - Configuration initialization
//! - [`cache`] - Cache management (clear)

pub mod cache;
pub mod common;
pub mod compute;
pub mod forecast;
pub mod init;
pub mod now;
