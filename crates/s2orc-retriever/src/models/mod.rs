//! Data models for Semantic Scholar API entities.
//!
//! All models use `#[serde(default)]` for optional fields and
//! `#[serde(rename_all = "camelCase")]` to match API naming.

mod paper;

pub use paper::{AuthorRef, Embedding, Journal, Paper, SearchPage, Tldr};
