use crate::search::types::{Document, IndexRequest};
use anyhow::Result;
use std::time::Duration;

/// Raw reply of `POST /index`.
#[derive(Debug, Clone)]
pub struct IndexOutcome {
    pub status: u16,
    pub body: String,
}

/// Minimal HTTP client for a running `searchd`.
#[derive(Debug, Clone)]
pub struct IndexClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl IndexClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts one batch of documents. Non-2xx replies are returned, not raised.
    pub async fn index(&self, documents: Vec<Document>) -> Result<IndexOutcome> {
        let url = format!("{}/index", self.base_url);
        let payload = IndexRequest { documents };

        let response = self.http_client.post(url).json(&payload).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(IndexOutcome { status, body })
    }

    /// Whether `/healthz` answers with a success status.
    pub async fn healthy(&self) -> bool {
        let url = format!("{}/healthz", self.base_url);
        match self
            .http_client
            .get(url)
            .timeout(Duration::from_millis(500))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Two small files in different languages, tagged with `repo`.
pub fn sample_documents(repo: &str) -> Vec<Document> {
    vec![
        Document {
            id: "1".to_string(),
            repo: repo.to_string(),
            path: "main.py".to_string(),
            language: "python".to_string(),
            content: "import json\ndata = json.loads('{}')\nprint(data)".to_string(),
        },
        Document {
            id: "2".to_string(),
            repo: repo.to_string(),
            path: "main.go".to_string(),
            language: "go".to_string(),
            content: "package main\nimport (\n\t\"encoding/json\"\n)\nfunc main() {}".to_string(),
        },
    ]
}
