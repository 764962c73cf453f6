//! Ingestion Module
//!
//! Gets documents into the index from outside a running request.
//!
//! ## Workflow
//! 1. **Seeding**: At startup `searchd` may index documents supplied through its
//!    configuration, either a JSON seed value or a built-in demo document.
//! 2. **Client**: The `indexer` binary posts sample documents to a running
//!    `searchd` over HTTP.

pub mod client;
pub mod seed;

#[cfg(test)]
mod tests;
