//! Catalint core library.
//!
//! This crate exposes programmatic APIs for validating product catalog
//! exports against a fixed business rule set: price relationships,
//! inventory sanity, image URL and dimension conformance, HTML body
//! well-formedness, and variant ordering.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `ingest`: CSV ingestion into typed rows with fatal pre-checks.
//! - `checks`: The validation rules themselves, grouped by concern.
//! - `engine`: Report aggregation across group-level and row-level rules.
//! - `net`: DNS/HTTP seams used by the remote checks.
//! - `models`: Catalog row and report data models.
//! - `output`: Human/JSON printers for reports.
//! - `export`: CSV persistence for reports.
//! - `utils`: Supporting helpers.
pub mod checks;
pub mod cli;
pub mod config;
pub mod engine;
pub mod export;
pub mod ingest;
pub mod models;
pub mod net;
pub mod output;
pub mod utils;
