//! Programmatic intake client.
//!
//! The same flows the embedded browser UI drives, expressed as typed Rust:
//! an API client for the HTTP surface, the intake form state machine, and
//! the status viewer. The e2e suite and any headless integration (support
//! tooling, scripted imports) go through this module.

pub mod api;
pub mod form;
pub mod status;
