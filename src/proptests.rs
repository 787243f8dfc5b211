use super::*;

use crate::encode::encode;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

fn build(dict: &BTreeSet<String>) -> Trie {
    Trie::from_bytes(encode(dict).unwrap()).unwrap()
}

/// Walk every node from the root and return the words spelled by final nodes.
fn validate_trie(t: &Trie) -> BTreeSet<String> {
    let mut stack = vec![t.root()];
    let mut visited = 0usize;
    let mut words = BTreeSet::new();
    if t.root().is_final() {
        words.insert(String::new());
    }

    while let Some(node) = stack.pop() {
        visited += 1;
        let edges = t.edges(node).expect("edge run must decode inside the blob");
        for child in edges.iter() {
            assert!(child.index() > node.index(), "children must follow their parent");
            if child.is_final() {
                words.insert(t.word(child).unwrap());
            }
            stack.push(child);
        }
    }

    assert_eq!(
        visited,
        t.blob().record_count(),
        "every record must be reachable exactly once"
    );
    words
}

fn levenshtein(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<u32> = (0..=b.len() as u32).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut cur = vec![i as u32 + 1];
        for (j, &cb) in b.iter().enumerate() {
            let sub = prev[j] + u32::from(ca != cb);
            cur.push(sub.min(prev[j + 1] + 1).min(cur[j] + 1));
        }
        prev = cur;
    }
    prev[b.len()]
}

fn dict_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[abc]{0,5}", 0..40)
}

fn query_strategy() -> impl Strategy<Value = String> {
    "[abcd]{0,6}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_edge_runs_cover_dictionary(dict in dict_strategy()) {
        let t = build(&dict);
        prop_assert_eq!(validate_trie(&t), dict);
    }

    #[test]
    fn prop_lookup_exists_consistency(dict in dict_strategy(), query in query_strategy()) {
        let t = build(&dict);
        for w in &dict {
            prop_assert!(t.exists(w).unwrap());
            prop_assert!(t.lookup_node(w).unwrap().unwrap().is_final());
        }

        let is_prefix = dict.iter().any(|w| w.starts_with(query.as_str()));
        prop_assert_eq!(t.exists(&query).unwrap(), dict.contains(&query));
        prop_assert_eq!(t.lookup_node(&query).unwrap().is_some(), is_prefix);
    }

    #[test]
    fn prop_completions_cap_and_order(dict in dict_strategy(), prefix in "[abc]{0,2}", k in 0usize..12) {
        let t = build(&dict);
        let Some(node) = t.lookup_node(&prefix).unwrap() else {
            return Ok(());
        };

        let all = t.lookup_completions(node, usize::MAX).unwrap();
        let expected: BTreeSet<String> = dict
            .iter()
            .filter(|w| w.len() > prefix.len() && w.starts_with(prefix.as_str()))
            .cloned()
            .collect();
        prop_assert_eq!(all.len(), expected.len());
        prop_assert_eq!(all.iter().cloned().collect::<BTreeSet<_>>(), expected);

        // A capped walk is a prefix of the full depth-first order.
        let capped = t.lookup_completions(node, k).unwrap();
        prop_assert!(capped.len() <= k);
        prop_assert_eq!(&capped[..], &all[..capped.len()]);
        prop_assert_eq!(capped.len(), k.min(all.len()));
    }

    #[test]
    fn prop_submatches(dict in dict_strategy(), query in "[abc]{1,3}", k in 0usize..8) {
        let t = build(&dict);
        let all = t.lookup_submatches(&query, usize::MAX).unwrap();
        let expected: BTreeSet<String> = dict
            .iter()
            .filter(|w| w.contains(query.as_str()))
            .cloned()
            .collect();
        let found: BTreeSet<String> = all.iter().cloned().collect();
        prop_assert_eq!(found.len(), all.len(), "submatches must be unique");
        prop_assert_eq!(found, expected);

        let capped = t.lookup_submatches(&query, k).unwrap();
        prop_assert_eq!(capped.len(), k.min(all.len()));
        prop_assert_eq!(&capped[..], &all[..capped.len()]);
    }

    #[test]
    fn prop_search_matches_brute_force(dict in dict_strategy(), query in query_strategy(), max_cost in 0u32..4) {
        let t = build(&dict);
        let expected: HashMap<String, u32> = dict
            .iter()
            .map(|w| (w.clone(), levenshtein(&query, w)))
            .filter(|&(_, d)| d <= max_cost)
            .collect();
        prop_assert_eq!(t.search(&query, max_cost).unwrap(), expected);
    }

    #[test]
    fn prop_search_monotonic(dict in dict_strategy(), query in query_strategy(), c1 in 0u32..4, extra in 0u32..3) {
        let t = build(&dict);
        let low = t.search(&query, c1).unwrap();
        let high = t.search(&query, c1 + extra).unwrap();
        for (word, cost) in &low {
            prop_assert_eq!(high.get(word), Some(cost));
        }
    }

    #[test]
    fn prop_search_zero_cost(dict in dict_strategy(), query in query_strategy()) {
        let t = build(&dict);
        let found = t.search(&query, 0).unwrap();
        if dict.contains(&query) {
            prop_assert_eq!(found.len(), 1);
            prop_assert_eq!(found.get(&query), Some(&0));
        } else {
            prop_assert!(found.is_empty());
        }
    }

    #[test]
    fn prop_case_insensitive_lookup(dict in dict_strategy(), query in "[abcABC]{0,5}") {
        let mut t = build(&dict);
        t.set_case_sensitive(false);
        let lower = query.to_lowercase();
        prop_assert_eq!(t.exists(&query).unwrap(), dict.contains(&lower));
        prop_assert_eq!(t.search(&query, 1).unwrap(), t.search(&lower, 1).unwrap());
    }
}

#[test]
fn levenshtein_reference() {
    assert_eq!(levenshtein("", ""), 0);
    assert_eq!(levenshtein("abc", ""), 3);
    assert_eq!(levenshtein("kitten", "sitting"), 3);
    assert_eq!(levenshtein("form", "from"), 2);
}

#[test]
fn seeded_random_dictionary() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(7);
    let mut dict = BTreeSet::new();
    for _ in 0..2000 {
        let len = rng.gen_range(1..12);
        let word: String = (0..len).map(|_| rng.gen_range(b'a'..=b'h') as char).collect();
        dict.insert(word);
    }

    let t = build(&dict);
    assert_eq!(validate_trie(&t), dict);

    for _ in 0..50 {
        let len = rng.gen_range(1..8);
        let query: String = (0..len).map(|_| rng.gen_range(b'a'..=b'i') as char).collect();
        let found = t.search(&query, 2).unwrap();
        for w in &dict {
            let d = levenshtein(&query, w);
            assert_eq!(found.get(w).copied(), (d <= 2).then_some(d), "{query} vs {w}");
        }
    }
}
