//! Core types and derivations for the cadre directory client.
//!
//! This crate is deliberately free of HTTP and terminal dependencies. The
//! client binary depends on it; it depends on nothing heavier than serde.

pub mod catalog;
pub mod error;
pub mod person;
pub mod query;
pub mod skill;

pub use error::{Error, Result};
