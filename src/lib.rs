//! Warranty Claims & Returns Intake
//!
//! This library provides the core functionality for the warranty-desk
//! system: JSON CRUD over claim and return records in PostgreSQL, a
//! unified case lookup across both collections, and a Redis-backed
//! notification outbox drained by the `notifier` binary.

pub mod app_state;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
