//! Code Search Library
//!
//! Core of `searchd`, a single-node, memory-resident keyword search service for
//! source-code snippets. The index is rebuilt from scratch on every start.
//!
//! ## Modules
//! - **`search`**: Tokenizer, the index engine (document store + inverted index
//!   behind one reader/writer lock), wire types and HTTP handlers.
//! - **`ingestion`**: Startup seeding and the HTTP client used by the `indexer` binary.
//! - **`launcher`**: Child-process supervision for the `devserver` binary.
//! - **`config`**: Command-line and environment configuration for `searchd`.
//! - **`error`**: Errors returned to HTTP callers.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod launcher;
pub mod search;
