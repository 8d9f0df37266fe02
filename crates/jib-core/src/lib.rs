//! Core domain + application logic for the Jira issue bot.
//!
//! This crate is intentionally framework-agnostic. Telegram / Jira REST
//! live behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod cooldown;
pub mod domain;
pub mod errors;
pub mod extract;
pub mod logging;
pub mod pipeline;
pub mod ports;
pub mod projects;
pub mod util;

pub use errors::{Error, Result};
