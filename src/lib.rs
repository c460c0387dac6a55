//! HR Ledger Engine
//!
//! This crate tracks employee attendance, manages leave requests against
//! per-year balances, and generates, adjusts and settles monthly payroll.
//! Services sit behind storage traits so they can run against the bundled
//! in-memory store or any other backend, and an axum router exposes them
//! over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
