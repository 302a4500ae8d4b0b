//! Integration tests for tiered retrieval against the mock index.

mod common;

use common::fixtures::{container_hit, partial_container};

use bibmatch::entity::{ReleaseExtIds, ReleaseRecord};
use bibmatch::index::{MockFailure, MockSearchIndex, RawHit};
use bibmatch::materialize::SourceMaterializer;
use bibmatch::retrieve::{CandidateRetriever, RetrieveError, RetrieverConfig};
use serde_json::json;

fn retriever(
    index: MockSearchIndex,
) -> CandidateRetriever<MockSearchIndex, SourceMaterializer> {
    CandidateRetriever::new(index, SourceMaterializer, RetrieverConfig::default())
}

#[tokio::test]
async fn test_identifier_tier_wins_over_name_tiers() {
    let index = MockSearchIndex::new();
    index.put_term_hits("issns", vec![container_hit("c1", "Nature")]);
    index.put_match_hits("name", false, vec![container_hit("c9", "Nature Methods")]);
    let retriever = retriever(index);

    let partial = partial_container(Some("Nature"), Some("0028-0836"));
    let candidates = retriever.match_container(&partial, Some(5)).await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].ident.as_deref(), Some("c1"));
}

#[tokio::test]
async fn test_name_only_record_reaches_fuzzy_tier() {
    let index = MockSearchIndex::new();
    index.put_match_hits("name", true, vec![container_hit("c1", "Nature")]);
    let retriever = retriever(index);

    let partial = partial_container(Some("Nautre"), None);
    let candidates = retriever.match_container(&partial, Some(5)).await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(retriever.index().match_calls("name", false), 1);
    assert_eq!(retriever.index().match_calls("name", true), 1);
}

#[tokio::test]
async fn test_empty_result_and_failure_are_distinguishable() {
    let empty = retriever(MockSearchIndex::new());
    let partial = partial_container(Some("Nature"), None);

    let candidates = empty.match_container(&partial, Some(5)).await.unwrap();
    assert!(candidates.is_empty());

    let failing_index = MockSearchIndex::new();
    failing_index.fail_with(MockFailure::Unavailable);
    let failing = retriever(failing_index);

    let result = failing.match_container(&partial, Some(5)).await;
    assert!(matches!(result, Err(RetrieveError::Index(_))));
}

#[tokio::test]
async fn test_release_doi_tier_resolves_before_title() {
    let index = MockSearchIndex::new();
    index.put_term_hits(
        "doi",
        vec![RawHit::new(
            "r1",
            json!({"ident": "r1", "title": "A Study of Things"}),
        )],
    );
    let retriever = retriever(index);

    let partial = ReleaseRecord {
        title: Some("A Study of Things".to_string()),
        ext_ids: ReleaseExtIds {
            doi: Some("10.1000/xyz".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };

    let candidates = retriever.match_release(&partial, Some(5)).await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(retriever.index().term_calls("doi"), 1);
    assert_eq!(retriever.index().match_calls("title", false), 0);
}

#[tokio::test]
async fn test_batch_lookup_keeps_input_association() {
    let index = MockSearchIndex::new();
    index.put_term_hits("issns", vec![container_hit("c1", "Nature")]);
    let retriever = retriever(index);

    let records = vec![
        partial_container(None, Some("0028-0836")),
        partial_container(None, None),
        partial_container(None, Some("0036-8075")),
    ];

    let results = retriever.match_containers(&records, Some(5)).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().len(), 1);
    assert!(results[1].as_ref().unwrap().is_empty());
    assert_eq!(results[2].as_ref().unwrap().len(), 1);
}
