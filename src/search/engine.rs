use super::tokenizer::{term_frequencies, tokenize};
use super::types::{Document, SearchResult};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Maximum number of characters of content returned as a result snippet.
pub const SNIPPET_CHARS: usize = 200;

/// Document store and inverted index, always mutated together.
#[derive(Debug, Default)]
struct IndexState {
    documents: HashMap<String, Document>,
    /// token -> document id -> term frequency
    inverted: HashMap<String, HashMap<String, usize>>,
}

impl IndexState {
    fn remove_postings(&mut self, doc_id: &str, content: &str) {
        for token in term_frequencies(content).into_keys() {
            if let Some(posting) = self.inverted.get_mut(&token) {
                posting.remove(doc_id);
                if posting.is_empty() {
                    self.inverted.remove(&token);
                }
            }
        }
    }

    fn insert(&mut self, doc: Document) {
        if let Some(previous) = self.documents.remove(&doc.id) {
            self.remove_postings(&doc.id, &previous.content);
        }

        for (token, tf) in term_frequencies(&doc.content) {
            self.inverted
                .entry(token)
                .or_default()
                .insert(doc.id.clone(), tf);
        }
        self.documents.insert(doc.id.clone(), doc);
    }
}

/// In-memory keyword index over source-code documents.
///
/// A single reader/writer lock guards the store and the postings so that a
/// reader never sees a document whose postings are half written. Ingest takes
/// the write lock for the whole batch; searches share the read lock.
#[derive(Debug, Default)]
pub struct IndexEngine {
    state: RwLock<IndexState>,
}

impl IndexEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores every document of the batch and rebuilds its postings.
    ///
    /// Re-indexing an existing id replaces the stored document and drops all
    /// postings of its previous content before the new ones are written.
    /// Returns the number of documents processed.
    pub fn add_documents<I>(&self, docs: I) -> usize
    where
        I: IntoIterator<Item = Document>,
    {
        let mut state = self.state.write();
        let mut count = 0;
        for doc in docs {
            state.insert(doc);
            count += 1;
        }
        tracing::debug!(
            "Indexed {} documents ({} stored, {} tokens)",
            count,
            state.documents.len(),
            state.inverted.len()
        );
        count
    }

    /// Ranks documents by the summed term frequency of the query tokens.
    ///
    /// Results are ordered by score descending, then by id ascending. A
    /// `limit` of zero returns every match.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let state = self.state.read();

        let mut scores: HashMap<&str, usize> = HashMap::new();
        for token in tokens.iter() {
            if let Some(posting) = state.inverted.get(token) {
                for (doc_id, tf) in posting {
                    *scores.entry(doc_id.as_str()).or_insert(0) += tf;
                }
            }
        }

        let mut results: Vec<SearchResult> = scores
            .into_iter()
            .filter(|(_, score)| *score > 0)
            .filter_map(|(doc_id, score)| {
                state.documents.get(doc_id).map(|doc| SearchResult {
                    id: doc.id.clone(),
                    repo: doc.repo.clone(),
                    path: doc.path.clone(),
                    language: doc.language.clone(),
                    snippet: snippet(&doc.content),
                    score,
                })
            })
            .collect();

        results.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        if limit > 0 {
            results.truncate(limit);
        }
        results
    }

    pub fn document_count(&self) -> usize {
        self.state.read().documents.len()
    }

    /// Number of distinct tokens with at least one posting.
    pub fn token_count(&self) -> usize {
        self.state.read().inverted.len()
    }

    pub fn get_document(&self, id: &str) -> Option<Document> {
        self.state.read().documents.get(id).cloned()
    }

    /// Posting list of `token` as (document id, term frequency), sorted by id.
    pub fn postings(&self, token: &str) -> Vec<(String, usize)> {
        let state = self.state.read();
        let mut postings: Vec<(String, usize)> = state
            .inverted
            .get(token)
            .map(|posting| {
                posting
                    .iter()
                    .map(|(doc_id, tf)| (doc_id.clone(), *tf))
                    .collect()
            })
            .unwrap_or_default();
        postings.sort();
        postings
    }
}

/// First `SNIPPET_CHARS` characters of `content`.
pub fn snippet(content: &str) -> String {
    match content.char_indices().nth(SNIPPET_CHARS) {
        Some((end, _)) => content[..end].to_string(),
        None => content.to_string(),
    }
}
