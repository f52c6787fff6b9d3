//! Tests for dot-product ranking and the brute-force index.

use std::sync::Arc;

use docrag::document::StoredChunk;
use docrag::error::RagError;
use docrag::ranking::{BruteForceIndex, VectorIndex, dot_product, rank};
use docrag::store::{ChunkStore, InMemoryChunkStore};
use proptest::prelude::*;

fn stored(name: &str, number: usize, embedding: Vec<f32>) -> StoredChunk {
    StoredChunk {
        document_name: name.to_string(),
        chunk_number: number,
        chunk_text: format!("{name} chunk {number}"),
        embedding,
    }
}

#[test]
fn orthogonal_candidates_rank_by_alignment() {
    let candidates = vec![stored("a", 0, vec![1.0, 0.0]), stored("b", 0, vec![0.0, 1.0])];
    let results = rank(&[1.0, 0.0], &candidates, 1).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document_name, "a");
    assert_eq!(results[0].score, 1.0);
}

#[test]
fn scores_are_raw_dot_products_not_cosine() {
    // Same direction, larger magnitude wins under a raw inner product.
    let candidates = vec![stored("unit", 0, vec![0.9, 0.0]), stored("long", 0, vec![2.0, 0.0])];
    let results = rank(&[1.0, 0.0], &candidates, 2).unwrap();
    assert_eq!(results[0].document_name, "long");
    assert_eq!(results[0].score, 2.0);
    assert_eq!(results[1].score, 0.9);
}

#[test]
fn equal_scores_keep_insertion_order() {
    let candidates = vec![
        stored("first", 0, vec![1.0, 0.0]),
        stored("second", 0, vec![1.0, 0.0]),
        stored("third", 0, vec![1.0, 0.0]),
    ];
    let results = rank(&[1.0, 0.0], &candidates, 3).unwrap();
    let names: Vec<&str> = results.iter().map(|r| r.document_name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[test]
fn top_n_beyond_candidate_count_returns_all_sorted() {
    let candidates = vec![
        stored("low", 0, vec![0.1, 0.0]),
        stored("high", 0, vec![0.9, 0.0]),
        stored("mid", 0, vec![0.5, 0.0]),
    ];
    let results = rank(&[1.0, 0.0], &candidates, 100).unwrap();
    assert_eq!(results.len(), 3);
    let names: Vec<&str> = results.iter().map(|r| r.document_name.as_str()).collect();
    assert_eq!(names, vec!["high", "mid", "low"]);
}

#[test]
fn results_truncate_to_top_n() {
    let candidates: Vec<StoredChunk> =
        (0..10).map(|i| stored("doc", i, vec![i as f32, 0.0])).collect();
    let results = rank(&[1.0, 0.0], &candidates, 3).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].chunk_number, 9);
}

#[test]
fn empty_candidate_set_ranks_to_nothing() {
    assert!(rank(&[1.0, 0.0], &[], 5).unwrap().is_empty());
}

#[test]
fn dimension_mismatch_is_fatal() {
    let candidates = vec![stored("ok", 0, vec![1.0, 0.0]), stored("bad", 1, vec![1.0, 0.0, 0.0])];
    let err = rank(&[1.0, 0.0], &candidates, 5).unwrap_err();
    match err {
        RagError::DimensionMismatch { expected, actual, chunk } => {
            assert_eq!(expected, 2);
            assert_eq!(actual, 3);
            assert_eq!(chunk, "bad#1");
        }
        other => panic!("expected DimensionMismatch, got {other}"),
    }
}

#[test]
fn dot_product_of_orthogonal_vectors_is_zero() {
    assert_eq!(dot_product(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    assert_eq!(dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
}

#[tokio::test]
async fn brute_force_index_scans_the_whole_store() {
    let store = Arc::new(InMemoryChunkStore::new());
    store
        .persist(&[
            stored("a", 0, vec![0.2, 0.0]),
            stored("b", 0, vec![0.8, 0.0]),
            stored("c", 0, vec![0.5, 0.0]),
        ])
        .await
        .unwrap();

    let index = BruteForceIndex::new(store);
    let results = index.search(&[1.0, 0.0], 2).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].document_name, "b");
    assert_eq!(results[1].document_name, "c");
}

const DIM: usize = 8;

fn arb_embedding() -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, DIM)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn results_ordered_descending_and_bounded_by_top_n(
        embeddings in proptest::collection::vec(arb_embedding(), 1..30),
        query in arb_embedding(),
        top_n in 1usize..35,
    ) {
        let candidates: Vec<StoredChunk> = embeddings
            .into_iter()
            .enumerate()
            .map(|(i, e)| stored("doc", i, e))
            .collect();
        let count = candidates.len();

        let results = rank(&query, &candidates, top_n).unwrap();

        prop_assert!(results.len() <= top_n);
        prop_assert_eq!(results.len(), top_n.min(count));

        for window in results.windows(2) {
            prop_assert!(
                window[0].score >= window[1].score,
                "results not in descending order: {} < {}",
                window[0].score,
                window[1].score,
            );
        }
    }
}
