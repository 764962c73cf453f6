use crate::search::engine::IndexEngine;
use crate::search::types::{Document, IndexRequest};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid seed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("seed is neither a documents wrapper, a document array nor a document with an id")]
    NoDocuments,
}

/// Which of the accepted seed layouts matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedShape {
    /// `{"documents": [...]}`
    Wrapper,
    /// `[...]`
    Array,
    /// A single document object.
    Object,
}

#[derive(Debug)]
pub struct Seed {
    pub shape: SeedShape,
    pub documents: Vec<Document>,
}

/// Parses a startup seed value.
///
/// Shapes are tried in order: a wrapper with at least one document, a
/// non-empty array of documents, then a single document with a non-empty id.
pub fn parse_seed(raw: &str) -> Result<Seed, SeedError> {
    let value: Value = serde_json::from_str(raw)?;

    if let Ok(wrapper) = IndexRequest::deserialize(&value)
        && !wrapper.documents.is_empty()
    {
        return Ok(Seed {
            shape: SeedShape::Wrapper,
            documents: wrapper.documents,
        });
    }

    if let Ok(documents) = Vec::<Document>::deserialize(&value)
        && !documents.is_empty()
    {
        return Ok(Seed {
            shape: SeedShape::Array,
            documents,
        });
    }

    if let Ok(document) = Document::deserialize(&value)
        && !document.id.is_empty()
    {
        return Ok(Seed {
            shape: SeedShape::Object,
            documents: vec![document],
        });
    }

    Err(SeedError::NoDocuments)
}

/// The document indexed when demo seeding is enabled.
pub fn demo_document() -> Document {
    Document {
        id: "1".to_string(),
        repo: "demo/repo".to_string(),
        path: "main.py".to_string(),
        language: "python".to_string(),
        content: "import json\njson.loads(\"{}\")".to_string(),
    }
}

/// Applies startup seeding and returns the number of documents indexed.
///
/// An explicit seed value takes precedence over the demo document. A seed
/// that fails to parse is logged and leaves the index empty.
pub fn seed_engine(engine: &IndexEngine, seed_json: Option<&str>, seed_demo: bool) -> usize {
    match seed_json.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => match parse_seed(raw) {
            Ok(seed) => {
                let count = engine.add_documents(seed.documents);
                tracing::info!("Seeded {} documents from {:?} seed", count, seed.shape);
                count
            }
            Err(e) => {
                tracing::warn!("Failed to parse seed documents: {}", e);
                0
            }
        },
        None if seed_demo => {
            let demo = demo_document();
            tracing::info!("Seeded demo document (id={})", demo.id);
            engine.add_documents([demo])
        }
        None => 0,
    }
}
