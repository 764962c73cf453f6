//! Search Service Module
//!
//! The in-memory index behind `searchd`.
//!
//! ## Overview
//! Documents are submitted in batches, tokenized, and stored next to an inverted
//! index mapping each token to the documents containing it and how often. Queries
//! are tokenized the same way and ranked by summed term frequency.
//!
//! ## Submodules
//! - **`engine`**: Document store, inverted index and ranking behind one lock.
//! - **`handlers`**: Axum handlers and the router for `/index`, `/search` and `/healthz`.
//! - **`tokenizer`**: Lower-cased word tokenization shared by ingest and query.
//! - **`types`**: Wire types for documents, results and API payloads.

pub mod engine;
pub mod handlers;
pub mod tokenizer;
pub mod types;
