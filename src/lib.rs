//! Client library for searching the Rijksmuseum art collection
//!
//! The core is [`controller::SearchController`], a state machine over a
//! caller-owned [`session::SearchSession`]: it decides when a new search is
//! needed versus extending the current result set, filters and deduplicates
//! artworks, caches first pages, and persists session state across runs.

pub mod cache;
pub mod catalog;
pub mod client;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod model;
pub mod persist;
pub mod session;

pub use controller::SearchController;
pub use error::Error;
pub use session::SearchSession;
