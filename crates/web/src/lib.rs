//! Forkful web application library.
//!
//! This crate provides the recipe discovery site as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod error;
pub mod favorites;
pub mod filters;
pub mod middleware;
pub mod recipes;
pub mod routes;
pub mod sample;
pub mod spoonacular;
pub mod state;
pub mod store;
