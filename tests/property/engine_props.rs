//! Engine invariants under random corpora and queries:
//! - Term frequencies of every document sum to 1
//! - The inverted index and per-document tables mirror each other
//! - Removal leaves no trace of a document
//! - Sequential and parallel execution agree
//! - Matching returns exactly the plus-words present, unless a minus-word hits

use proptest::prelude::*;
use skald::{DocumentStatus, ExecutionMode, SearchEngine, RELEVANCE_THRESHOLD};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Small alphabet so documents actually share words.
fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]{1,2}").unwrap()
}

fn document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..8).prop_map(|words| words.join(" "))
}

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(document_strategy(), 1..6)
}

/// Queries mixing plus-words and minus-words.
fn query_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((word_strategy(), proptest::bool::ANY), 1..5).prop_map(|words| {
        words
            .into_iter()
            .map(|(word, minus)| if minus { format!("-{}", word) } else { word })
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// Index the corpus under ids `0..len`, with each document's rating equal to
/// its id so that relevance ties break deterministically.
fn build_engine(corpus: &[String]) -> SearchEngine {
    let mut engine = SearchEngine::default();
    for (i, text) in corpus.iter().enumerate() {
        engine
            .add_document(i as i32, text, DocumentStatus::Actual, &[i as i32])
            .unwrap();
    }
    engine
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: every document's term frequencies sum to 1.
    #[test]
    fn prop_term_frequencies_sum_to_one(corpus in corpus_strategy()) {
        let engine = build_engine(&corpus);

        for id in engine.document_ids() {
            let total: f64 = engine.word_frequencies(id).values().sum();
            prop_assert!(
                (total - 1.0).abs() < 1e-9,
                "frequencies of document {} sum to {}",
                id, total
            );
        }
    }

    /// Property: the inverted index mirrors the per-document tables.
    #[test]
    fn prop_index_mirrors_documents(corpus in corpus_strategy()) {
        let engine = build_engine(&corpus);
        prop_assert!(engine.check_index_well_formed());

        // Spot-check the forward direction through the public surface too.
        for (word, postings) in engine.word_to_document_freqs() {
            for (&id, &term_freq) in postings {
                let mirrored = engine.word_frequencies(id).get(&**word).copied();
                prop_assert_eq!(mirrored, Some(term_freq));
            }
        }
    }

    /// Property: a removed document vanishes from every structure.
    #[test]
    fn prop_removal_leaves_no_trace(corpus in corpus_strategy(), pick in 0usize..6) {
        let mut engine = build_engine(&corpus);
        let id = (pick % corpus.len()) as i32;

        engine.remove_document(id);

        prop_assert!(engine.word_frequencies(id).is_empty());
        prop_assert!(!engine.document_ids().any(|live| live == id));
        for postings in engine.word_to_document_freqs().values() {
            prop_assert!(!postings.contains_key(&id));
        }
        prop_assert_eq!(engine.document_count(), corpus.len() - 1);
        prop_assert!(engine.check_index_well_formed());
    }

    /// Property: sequential and parallel execution return the same ranking,
    /// with relevance agreeing inside the tie threshold.
    #[test]
    fn prop_seq_and_par_agree(corpus in corpus_strategy(), query in query_strategy()) {
        let engine = build_engine(&corpus);

        let seq = engine.find_top_documents(ExecutionMode::Seq, &query).unwrap();
        let par = engine.find_top_documents(ExecutionMode::Par, &query).unwrap();

        let seq_ids: Vec<_> = seq.iter().map(|doc| doc.id).collect();
        let par_ids: Vec<_> = par.iter().map(|doc| doc.id).collect();
        prop_assert_eq!(&seq_ids, &par_ids, "query {:?}", &query);

        for (a, b) in seq.iter().zip(&par) {
            prop_assert!(
                (a.relevance - b.relevance).abs() < RELEVANCE_THRESHOLD,
                "relevance diverged for document {}: {} vs {}",
                a.id, a.relevance, b.relevance
            );
        }
    }

    /// Property: `match_document` returns the empty list iff a minus-word is
    /// present, and otherwise exactly the plus-words the document contains.
    #[test]
    fn prop_match_semantics(corpus in corpus_strategy(), query in query_strategy()) {
        let engine = build_engine(&corpus);

        for id in engine.document_ids().collect::<Vec<_>>() {
            let words = engine.word_frequencies(id);

            let minus_hit = query
                .split(' ')
                .filter_map(|token| token.strip_prefix('-'))
                .any(|minus| words.contains_key(minus));
            let mut expected: Vec<&str> = query
                .split(' ')
                .filter(|token| !token.starts_with('-'))
                .filter(|plus| words.contains_key(*plus))
                .collect();
            expected.sort_unstable();
            expected.dedup();

            for mode in [ExecutionMode::Seq, ExecutionMode::Par] {
                let (matched, status) = engine.match_document(mode, &query, id).unwrap();
                let matched: Vec<&str> = matched.iter().map(AsRef::as_ref).collect();
                prop_assert_eq!(status, DocumentStatus::Actual);
                if minus_hit {
                    prop_assert!(matched.is_empty());
                } else {
                    prop_assert_eq!(&matched, &expected, "document {}", id);
                }
            }
        }
    }

    /// Property: batch execution is positionally faithful to one-at-a-time
    /// execution.
    #[test]
    fn prop_batch_matches_individual_queries(
        corpus in corpus_strategy(),
        queries in prop::collection::vec(query_strategy(), 1..4),
    ) {
        let engine = build_engine(&corpus);

        let batch = skald::process_queries(&engine, &queries).unwrap();
        prop_assert_eq!(batch.len(), queries.len());

        for (query, results) in queries.iter().zip(&batch) {
            let individual = engine.find_top_documents(ExecutionMode::Par, query).unwrap();
            let batch_ids: Vec<_> = results.iter().map(|doc| doc.id).collect();
            let individual_ids: Vec<_> = individual.iter().map(|doc| doc.id).collect();
            prop_assert_eq!(batch_ids, individual_ids);
        }
    }
}
