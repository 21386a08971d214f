//! Forkful Core - Shared types library.
//!
//! This crate provides common types used across Forkful components. It
//! contains only types and traits - no I/O, no HTTP clients - so it can be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and ratings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
