use serde::{Deserialize, Deserializer, Serialize};

/// Decodes an explicit `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One indexed unit of source content.
///
/// Only `content` is tokenized; the other fields are carried through to
/// search results unchanged. Missing or `null` fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub repo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub repo: String,
    pub path: String,
    pub language: String,
    pub snippet: String,
    pub score: usize,
}

/// Body of `POST /index`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IndexRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub documents: Vec<Document>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResponse {
    pub indexed: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Query string of `GET /search`.
///
/// `limit` is optional; zero or negative means unlimited.
#[derive(Debug, Default, PartialEq)]
pub struct SearchParams {
    pub q: String,
    pub limit: Option<i64>,
}

impl SearchParams {
    /// Builds the parameters from decoded query pairs without ever failing.
    ///
    /// The first `q` and the first `limit` win. A `limit` that is not an
    /// integer counts as absent.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        };

        Self {
            q: first("q").unwrap_or_default().to_string(),
            limit: first("limit").and_then(|raw| raw.trim().parse().ok()),
        }
    }
}
