//! Daybook Core Library
//!
//! Entry parsing, mutation, search and editing engine for the daybook journal.
//! Daily files hold several entries each; everything here treats the flat
//! markdown file as the only durable state.

pub mod config;
pub mod editor;
pub mod entry;
pub mod error;
pub mod exchange;
pub mod format;
pub mod logging;
pub mod search;
pub mod stats;
pub mod store;
pub mod templates;
