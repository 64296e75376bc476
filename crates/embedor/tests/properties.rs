#![allow(missing_docs)]

use embedor::{
    batching::{BatchSource, WindowOptions},
    vocab::{IndexVocab, VocabOptions},
};
use proptest::prelude::*;

type Vocab = IndexVocab<u16, u32, u64>;

fn build(
    tokens: &[u16],
    min_count: usize,
) -> Vocab {
    IndexVocab::from_tokens(tokens, VocabOptions::default().with_min_count(min_count)).unwrap()
}

fn counts_of(tokens: &[u16]) -> std::collections::HashMap<u16, usize> {
    let mut counts = std::collections::HashMap::new();
    for &t in tokens {
        *counts.entry(t).or_default() += 1;
    }
    counts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn admitted_tokens_get_unique_nonzero_ids(
        tokens in proptest::collection::vec(0u16..40, 0..200),
        min_count in 1usize..4,
    ) {
        let vocab = build(&tokens, min_count);
        let counts = counts_of(&tokens);

        let mut seen = std::collections::HashSet::new();
        for (token, count) in &counts {
            let id = vocab.lookup(token);
            if *count >= min_count {
                prop_assert!(id != 0);
                prop_assert!(seen.insert(id));
            } else {
                prop_assert_eq!(id, 0);
            }
        }
        prop_assert_eq!(vocab.len(), seen.len() + 1);

        // Never-seen tokens fall back to UNK.
        prop_assert_eq!(vocab.lookup(&1000u16), 0);
    }

    #[test]
    fn ids_are_assigned_in_admission_order(
        tokens in proptest::collection::vec(0u16..20, 0..200),
        min_count in 1usize..4,
    ) {
        let vocab = build(&tokens, min_count);

        // Replay the stream; a token's id is the rank at which it reached min_count.
        let mut running = std::collections::HashMap::new();
        let mut expected = Vec::new();
        for &t in &tokens {
            let count: &mut usize = running.entry(t).or_default();
            *count += 1;
            if *count == min_count {
                expected.push(t);
            }
        }

        prop_assert_eq!(vocab.tokens(), expected.as_slice());
        for (idx, token) in expected.iter().enumerate() {
            prop_assert_eq!(vocab.lookup(token) as usize, idx + 1);
            // Idempotent.
            prop_assert_eq!(vocab.lookup(token), vocab.lookup(token));
        }
    }

    #[test]
    fn window_count_and_batch_bounds(
        tokens in proptest::collection::vec(0u16..10, 1..150),
        left in 0usize..4,
        right in 0usize..4,
        batch_size in 1usize..8,
    ) {
        let vocab = build(&tokens, 1);
        let options = WindowOptions::new(batch_size, (left, right)).with_flush_partial(true);
        let window_size = options.window_size();

        let mut batcher = options.init_cbow(&vocab, &tokens).unwrap();
        let mut pairs = 0;
        while let Some(batch) = batcher.next_batch() {
            prop_assert!(!batch.is_empty());
            prop_assert!(batch.len() <= batch_size);
            prop_assert_eq!(batch.contexts.len(), batch.labels.len());
            for row in &batch.contexts {
                prop_assert_eq!(row.len(), window_size - 1);
            }
            pairs += batch.len();
        }

        let expected = tokens.len().saturating_sub(window_size - 1);
        prop_assert_eq!(pairs, expected);
        prop_assert_eq!(batcher.windows_seen(), expected as u64);
    }

    #[test]
    fn partial_batches_are_dropped(
        tokens in proptest::collection::vec(0u16..10, 1..150),
        left in 0usize..3,
        right in 0usize..3,
        batch_size in 1usize..8,
    ) {
        let vocab = build(&tokens, 1);
        let options = WindowOptions::new(batch_size, (left, right));
        let windows = tokens.len().saturating_sub(options.window_size() - 1);

        let batches: Vec<_> = options.init_cbow(&vocab, &tokens).unwrap().collect();
        prop_assert_eq!(batches.len(), windows / batch_size);
        prop_assert!(batches.iter().all(|b| b.len() == batch_size));
    }

    #[test]
    fn batching_is_deterministic(
        tokens in proptest::collection::vec(0u16..10, 0..100),
        batch_size in 1usize..5,
    ) {
        let vocab = build(&tokens, 1);
        let run = || {
            WindowOptions::new(batch_size, (2, 2))
                .init_cbow(&vocab, &tokens)
                .unwrap()
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn skip_gram_emits_every_context_pair(
        tokens in proptest::collection::vec(0u16..10, 1..100),
        left in 0usize..3,
        right in 0usize..3,
        per_batch in 1usize..4,
    ) {
        prop_assume!(left + right > 0);
        let vocab = build(&tokens, 1);
        let options = WindowOptions::new(per_batch * (left + right), (left, right))
            .with_flush_partial(true);
        let window_size = options.window_size();

        let pairs: usize = options
            .init_skip_gram(&vocab, &tokens)
            .unwrap()
            .map(|b| b.len())
            .sum();

        let windows = tokens.len().saturating_sub(window_size - 1);
        prop_assert_eq!(pairs, windows * (left + right));
    }
}
