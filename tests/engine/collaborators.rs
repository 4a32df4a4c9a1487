//! The utilities around the engine: batches, the request queue, pagination.

use skald::{
    paginate, process_queries, process_queries_joined, DocumentStatus, RequestQueue, SearchEngine,
    MAX_RESULT_DOCUMENT_COUNT,
};

fn populated_engine() -> SearchEngine {
    let mut server = SearchEngine::new("and with").unwrap();
    let corpus = [
        (1, "funny pet and nasty rat"),
        (2, "funny pet with curly hair"),
        (3, "big cat nasty hair"),
        (4, "big dog cat Vladislav"),
        (5, "big dog hamster Borya"),
    ];
    for (id, text) in corpus {
        server
            .add_document(id, text, DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
    }
    server
}

#[test]
fn batch_results_align_positionally() {
    let server = populated_engine();
    let queries = ["curly dog", "big cat", "sparrow"];

    let results = process_queries(&server, &queries).unwrap();
    assert_eq!(results.len(), 3);
    assert!(!results[0].is_empty());
    assert!(!results[1].is_empty());
    assert!(results[2].is_empty());

    let joined = process_queries_joined(&server, &queries).unwrap();
    assert_eq!(
        joined.len(),
        results[0].len() + results[1].len() + results[2].len()
    );
    assert_eq!(joined[0].id, results[0][0].id);
}

#[test]
fn batch_respects_per_query_result_cap() {
    let mut server = SearchEngine::default();
    for id in 0..10 {
        server
            .add_document(id, "cat", DocumentStatus::Actual, &[id])
            .unwrap();
    }
    let results = process_queries(&server, &["cat", "cat"]).unwrap();
    for page in &results {
        assert_eq!(page.len(), MAX_RESULT_DOCUMENT_COUNT);
    }
}

#[test]
fn request_queue_counts_no_result_queries() {
    let server = populated_engine();
    let mut queue = RequestQueue::new(&server);

    queue.add_find_request("curly dog").unwrap();
    queue.add_find_request("sparrow").unwrap();
    queue
        .add_find_request_with("big", |id, _, _| id > 100)
        .unwrap();
    queue
        .add_find_request_with_status("big", DocumentStatus::Banned)
        .unwrap();

    assert_eq!(queue.no_result_requests(), 3);
}

#[test]
fn search_results_paginate_into_fixed_pages() {
    let server = populated_engine();
    let results = server
        .find_top_documents(skald::ExecutionMode::Seq, "curly dog")
        .unwrap();
    assert_eq!(results.len(), 3);

    let pages = paginate(&results, 2).unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].len(), 2);
    assert_eq!(pages[1].len(), 1);
}
