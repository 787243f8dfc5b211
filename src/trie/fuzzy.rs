//! Bounded edit-distance search.
//!
//! One Levenshtein DP row is computed per trie node on the current
//! root-to-node path. A subtree is skipped as soon as every entry of its row
//! exceeds the budget: row values never decrease along a path, so no
//! continuation of that prefix can come back under `max_cost`.

use std::collections::HashMap;

use smallvec::SmallVec;

use super::Trie;
use crate::error::Result;
use crate::node::Node;

type Row = SmallVec<[u32; 32]>;

/// A dictionary word within the edit budget of a query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Correction {
    pub word: String,
    pub cost: u32,
}

impl Trie {
    /// Every dictionary word whose Levenshtein distance to `word` is at most
    /// `max_cost`, mapped to that distance.
    ///
    /// Insertions, deletions and substitutions cost 1; transpositions are not
    /// considered.
    pub fn search(&self, word: &str, max_cost: u32) -> Result<HashMap<String, u32>> {
        let query: Vec<char> = self.fold(word).chars().collect();
        let first_row: Row = (0..=query.len() as u32).collect();

        let mut results = HashMap::new();
        // The root row is `first_row`; its last column is the cost of the empty word.
        let root_cost = first_row[first_row.len() - 1];
        if self.root.is_final() && root_cost <= max_cost {
            results.insert(String::new(), root_cost);
        }
        for child in self.edges(self.root)?.iter() {
            self.search_recursive(child, &query, &first_row, max_cost, &mut results)?;
        }

        tracing::trace!(query = word, max_cost, found = results.len(), "search");
        Ok(results)
    }

    fn search_recursive(
        &self,
        node: Node,
        query: &[char],
        previous: &[u32],
        max_cost: u32,
        results: &mut HashMap<String, u32>,
    ) -> Result<()> {
        let letter = node.letter();
        let mut current = Row::with_capacity(previous.len());
        current.push(previous[0] + 1);
        for column in 1..previous.len() {
            let insert_cost = current[column - 1] + 1;
            let delete_cost = previous[column] + 1;
            let replace_cost = previous[column - 1] + u32::from(query[column - 1] != letter);
            current.push(insert_cost.min(delete_cost).min(replace_cost));
        }

        let cost = current[current.len() - 1];
        if cost <= max_cost && node.is_final() {
            results.insert(self.word(node)?, cost);
        }

        let row_min = current.iter().copied().min().unwrap_or(u32::MAX);
        if row_min <= max_cost {
            for child in self.edges(node)?.iter() {
                self.search_recursive(child, query, &current, max_cost, results)?;
            }
        }
        Ok(())
    }

    /// [`Trie::search`] results ordered by cost, then alphabetically.
    pub fn corrections(&self, word: &str, max_cost: u32) -> Result<Vec<Correction>> {
        let mut corrections: Vec<Correction> = self
            .search(word, max_cost)?
            .into_iter()
            .map(|(word, cost)| Correction { word, cost })
            .collect();
        corrections.sort_by(|a, b| a.cost.cmp(&b.cost).then_with(|| a.word.cmp(&b.word)));
        Ok(corrections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;

    fn trie(words: &[&str]) -> Trie {
        Trie::from_bytes(encode(words).unwrap()).unwrap()
    }

    fn map(pairs: &[(&str, u32)]) -> HashMap<String, u32> {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_search_example() {
        let t = trie(&["cat", "car", "care", "dog"]);
        assert_eq!(t.search("cst", 1).unwrap(), map(&[("cat", 1)]));
        assert!(t.search("cst", 0).unwrap().is_empty());
        assert_eq!(
            t.search("cst", 2).unwrap(),
            map(&[("cat", 1), ("car", 2)])
        );
    }

    #[test]
    fn test_search_exact() {
        let t = trie(&["cat", "car", "care", "dog"]);
        assert_eq!(t.search("care", 0).unwrap(), map(&[("care", 0)]));
        assert_eq!(
            t.search("care", 1).unwrap(),
            map(&[("care", 0), ("car", 1)])
        );
    }

    #[test]
    fn test_search_insertions_and_deletions() {
        let t = trie(&["gtk_widget_show", "gtk_widget_hide"]);
        let found = t.search("gtk_wdget_show", 1).unwrap();
        assert_eq!(found, map(&[("gtk_widget_show", 1)]));
        let found = t.search("gtk_widget_shows", 1).unwrap();
        assert_eq!(found, map(&[("gtk_widget_show", 1)]));
    }

    #[test]
    fn test_search_no_transpositions() {
        let t = trie(&["form"]);
        assert!(t.search("from", 1).unwrap().is_empty());
        assert_eq!(t.search("from", 2).unwrap(), map(&[("form", 2)]));
    }

    #[test]
    fn test_search_empty_query() {
        let t = trie(&["a", "ab", "abc"]);
        assert_eq!(t.search("", 2).unwrap(), map(&[("a", 1), ("ab", 2)]));
    }

    #[test]
    fn test_search_empty_word_in_dictionary() {
        let t = trie(&["", "a"]);
        assert_eq!(t.search("", 0).unwrap(), map(&[("", 0)]));
        assert_eq!(t.search("b", 1).unwrap(), map(&[("", 1), ("a", 1)]));
        assert_eq!(t.search("bb", 1).unwrap(), HashMap::new());
    }

    #[test]
    fn test_search_folds_case() {
        let mut t = trie(&["cat"]);
        assert_eq!(t.search("CAT", 0).unwrap(), HashMap::new());
        t.set_case_sensitive(false);
        assert_eq!(t.search("CAT", 0).unwrap(), map(&[("cat", 0)]));
    }

    #[test]
    fn test_corrections_order() {
        let t = trie(&["cat", "car", "care", "cast", "dog"]);
        let got = t.corrections("cat", 2).unwrap();
        let words: Vec<(&str, u32)> = got.iter().map(|c| (c.word.as_str(), c.cost)).collect();
        assert_eq!(
            words,
            vec![("cat", 0), ("car", 1), ("cast", 1), ("care", 2)]
        );
    }
}
