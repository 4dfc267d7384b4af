//! Launchdeck Library
//!
//! This library provides the core functionality of the Launchdeck command
//! launcher: profile discovery and overlay resolution, the pivot ledger,
//! and inventory reconciliation between equipped and stored profiles.

// Module declarations
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;
