//! End-to-end coverage of the seed scenarios: tokenization, BM25 scoring,
//! rank fusion, filter parsing, and hybrid dispatch against the in-memory
//! store.

use std::sync::Arc;

use retrieval_domain::ports::VectorStore;
use retrieval_domain::value_objects::{FilterExpr, HybridSearchRequest, VectorDocument};
use retrieval_providers::dispatcher::HybridDispatcher;
use retrieval_providers::filter::parse_filter;
use retrieval_providers::fusion::FusionStrategy;
use retrieval_providers::sparse::SparseEncoder;
use retrieval_providers::tokenizer::{tokenize, TokenMode};
use retrieval_providers::vector_store::MemoryVectorStore;

#[test]
fn call_expression_tokenizes_to_identifier_words() {
    let tokens = tokenize("calculateTotalPrice(items)", TokenMode::Code);
    assert_eq!(tokens, vec!["calculate", "total", "price", "items"]);
}

#[test]
fn acronym_then_camel_case_boundary() {
    let tokens = tokenize("XMLHttpRequest is the API", TokenMode::Code);
    assert_eq!(tokens, vec!["xml", "http", "request", "api"]);
}

#[test]
fn bm25_basic_two_document_corpus() {
    let mut encoder = SparseEncoder::default();
    encoder.build_vocabulary(&["red blue red", "blue green"]);

    let red = encoder.embed_query("red");
    assert_eq!(red.len(), 1);
    assert!(red.values[0] > 0.0);

    let yellow = encoder.embed_query("yellow");
    assert!(yellow.is_empty());
}

#[test]
fn filter_parser_covers_all_three_forms() {
    let any = parse_filter(r#"fileExtension in [".ts", ".py"]"#).unwrap();
    assert_eq!(
        any,
        FilterExpr::Any {
            field: "fileExtension".to_string(),
            values: vec![".ts".to_string(), ".py".to_string()],
        }
    );

    let must_not = parse_filter(r#"status != "archived""#).unwrap();
    assert_eq!(
        must_not,
        FilterExpr::MustNot {
            field: "status".to_string(),
            value: "archived".to_string(),
        }
    );

    assert_eq!(parse_filter("garbage expression"), None);
}

#[tokio::test]
async fn hybrid_search_on_empty_sparse_query_returns_empty_without_backend_call() {
    let store: Arc<dyn VectorStore> = Arc::new(MemoryVectorStore::new());
    store.create_hybrid_collection("chunks", 3).await.unwrap();
    store
        .insert_hybrid(
            "chunks",
            vec![VectorDocument::new(
                "a",
                vec![1.0, 0.0, 0.0],
                "fn authenticate() {}",
                "src/auth.rs",
                1,
                1,
                "rs",
            )],
        )
        .await
        .unwrap();

    let dispatcher = HybridDispatcher::new(store);
    let requests = vec![HybridSearchRequest::sparse(
        retrieval_domain::value_objects::SparseVector::empty(),
        10,
    )];
    let results = dispatcher
        .hybrid_search("chunks", &requests, None, &FusionStrategy::rrf_default(), None)
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn hybrid_search_fuses_dense_and_sparse_channels() {
    let store: Arc<dyn VectorStore> = Arc::new(MemoryVectorStore::new());
    store.create_hybrid_collection("chunks", 3).await.unwrap();

    let mut encoder = SparseEncoder::default();
    encoder.build_vocabulary(&["authenticate user session", "render page layout"]);
    let sparse_a = encoder.embed_document("authenticate user session");

    let doc = VectorDocument::new(
        "a",
        vec![1.0, 0.0, 0.0],
        "authenticate user session",
        "src/auth.rs",
        1,
        1,
        "rs",
    )
    .with_sparse_vector(sparse_a.clone());
    store.insert_hybrid("chunks", vec![doc]).await.unwrap();

    let dispatcher = HybridDispatcher::new(store);
    let query_sparse = encoder.embed_query("authenticate user session");
    let requests = vec![
        HybridSearchRequest::dense(vec![1.0, 0.0, 0.0], 10),
        HybridSearchRequest::sparse(query_sparse, 10),
    ];
    let results = dispatcher
        .hybrid_search("chunks", &requests, None, &FusionStrategy::rrf_default(), None)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document.id, "a");
}
