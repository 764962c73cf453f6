//! Ingestion Module Tests
//!
//! ## Test Scopes
//! - **Seed Parsing**: The three accepted seed layouts and the rejected ones.
//! - **Seeding**: Precedence between seed JSON and the demo document.
//! - **Client**: Posting documents to a live `searchd` router.

#[cfg(test)]
mod tests {
    use crate::ingestion::client::{IndexClient, sample_documents};
    use crate::ingestion::seed::{SeedError, SeedShape, demo_document, parse_seed, seed_engine};
    use crate::search::engine::IndexEngine;
    use crate::search::handlers::{SearchSettings, router};
    use std::sync::Arc;

    // ============================================================
    // SEED PARSING
    // ============================================================

    #[test]
    fn test_parse_seed_wrapper() {
        let seed = parse_seed(
            r#"{"documents": [{"id": "1", "content": "a"}, {"id": "2", "content": "b"}]}"#,
        )
        .unwrap();

        assert_eq!(seed.shape, SeedShape::Wrapper);
        assert_eq!(seed.documents.len(), 2);
        assert_eq!(seed.documents[1].id, "2");
    }

    #[test]
    fn test_parse_seed_array() {
        let seed = parse_seed(r#"[{"id": "a", "repo": "r", "content": "x"}]"#).unwrap();

        assert_eq!(seed.shape, SeedShape::Array);
        assert_eq!(seed.documents[0].repo, "r");
        // Missing fields decode as empty strings
        assert_eq!(seed.documents[0].path, "");
    }

    #[test]
    fn test_parse_seed_single_object() {
        let seed = parse_seed(r#"{"id": "solo", "language": "rust", "content": "fn x() {}"}"#)
            .unwrap();

        assert_eq!(seed.shape, SeedShape::Object);
        assert_eq!(seed.documents.len(), 1);
        assert_eq!(seed.documents[0].id, "solo");
    }

    #[test]
    fn test_parse_seed_all_shapes_index_the_same() {
        let wrapper =
            parse_seed(r#"{"documents": [{"id": "1", "content": "same text"}]}"#).unwrap();
        let array = parse_seed(r#"[{"id": "1", "content": "same text"}]"#).unwrap();
        let object = parse_seed(r#"{"id": "1", "content": "same text"}"#).unwrap();

        assert_eq!(wrapper.documents, array.documents);
        assert_eq!(array.documents, object.documents);
    }

    #[test]
    fn test_parse_seed_rejects_invalid_json() {
        let err = parse_seed("{not json").unwrap_err();
        assert!(matches!(err, SeedError::Json(_)));
    }

    #[test]
    fn test_parse_seed_rejects_empty_shapes() {
        for raw in [r#"{"documents": []}"#, "[]", r#"{"content": "no id"}"#, "42", r#""text""#] {
            let err = parse_seed(raw).unwrap_err();
            assert!(matches!(err, SeedError::NoDocuments), "{} should be rejected", raw);
        }
    }

    // ============================================================
    // SEEDING
    // ============================================================

    #[test]
    fn test_seed_engine_from_json() {
        let engine = IndexEngine::new();
        let seeded = seed_engine(&engine, Some(r#"[{"id": "1", "content": "hello"}]"#), false);

        assert_eq!(seeded, 1);
        assert_eq!(engine.search("hello", 0)[0].id, "1");
    }

    #[test]
    fn test_seed_engine_json_takes_precedence_over_demo() {
        let engine = IndexEngine::new();
        seed_engine(&engine, Some(r#"{"id": "custom", "content": "x"}"#), true);

        assert_eq!(engine.document_count(), 1);
        assert!(engine.get_document("custom").is_some());
    }

    #[test]
    fn test_seed_engine_bad_json_starts_empty() {
        let engine = IndexEngine::new();
        let seeded = seed_engine(&engine, Some("definitely not json"), true);

        assert_eq!(seeded, 0);
        assert_eq!(engine.document_count(), 0);
    }

    #[test]
    fn test_seed_engine_demo() {
        let engine = IndexEngine::new();
        let seeded = seed_engine(&engine, None, true);

        assert_eq!(seeded, 1);
        let results = engine.search("json", 0);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, demo_document().id);
        assert_eq!(results[0].score, 2);
    }

    #[test]
    fn test_seed_engine_blank_json_falls_back_to_demo() {
        let engine = IndexEngine::new();
        seed_engine(&engine, Some("   "), true);
        assert_eq!(engine.document_count(), 1);
    }

    #[test]
    fn test_seed_engine_nothing_configured() {
        let engine = IndexEngine::new();
        assert_eq!(seed_engine(&engine, None, false), 0);
        assert_eq!(engine.document_count(), 0);
    }

    // ============================================================
    // CLIENT
    // ============================================================

    #[test]
    fn test_sample_documents() {
        let docs = sample_documents("acme/repo");

        assert_eq!(docs.len(), 2);
        assert!(docs.iter().all(|d| d.repo == "acme/repo"));
        assert_eq!(docs[0].language, "python");
        assert_eq!(docs[1].language, "go");
    }

    #[tokio::test]
    async fn test_client_indexes_into_running_server() {
        let engine = Arc::new(IndexEngine::new());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(engine.clone(), SearchSettings::default());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = IndexClient::new(&format!("http://{}/", addr));
        assert_eq!(client.base_url(), format!("http://{}", addr));
        assert!(client.healthy().await);

        let outcome = client.index(sample_documents("example/repo")).await.unwrap();
        assert_eq!(outcome.status, 200);
        assert_eq!(outcome.body, r#"{"indexed":2}"#);

        let results = engine.search("json", 0);
        assert_eq!(results.len(), 2);
        // main.py mentions json twice, main.go once
        assert_eq!(results[0].path, "main.py");
        assert_eq!(results[0].score, 2);
        assert_eq!(results[1].path, "main.go");
    }

    #[tokio::test]
    async fn test_client_health_reports_unreachable_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = IndexClient::new(&format!("http://{}", addr));
        assert!(!client.healthy().await);
        assert!(client.index(Vec::new()).await.is_err());
    }
}
