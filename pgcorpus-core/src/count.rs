//! Word frequency counting
//!
//! Builds the counts table for one book. Output order is part of the
//! artifact format: descending count, and among equal counts the order in
//! which each word was first seen in the token stream.

use std::collections::HashMap;

/// Count token occurrences, most frequent first.
///
/// Ties keep first-seen order, so the result is deterministic for a given
/// token sequence (a plain sort by count over the discovery order, kept
/// stable).
pub fn count_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<(String, u64)> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(tokens.len() / 2 + 1);
    let mut table: Vec<(String, u64)> = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        match index.get(token) {
            Some(&slot) => table[slot].1 += 1,
            None => {
                index.insert(token, table.len());
                table.push((token.to_string(), 1));
            }
        }
    }

    table.sort_by(|a, b| b.1.cmp(&a.1));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn counts_with_first_seen_tie_break() {
        let tokens = ["the", "a", "the", "the", "a", "dog"];
        assert_eq!(
            count_tokens(&tokens),
            vec![
                ("the".to_string(), 3),
                ("a".to_string(), 2),
                ("dog".to_string(), 1)
            ]
        );
    }

    #[test]
    fn ties_preserve_discovery_order() {
        let tokens = ["zebra", "apple", "mango", "zebra", "apple", "mango"];
        assert_eq!(
            count_tokens(&tokens),
            vec![
                ("zebra".to_string(), 2),
                ("apple".to_string(), 2),
                ("mango".to_string(), 2)
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert!(count_tokens::<&str>(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn total_mass_preserved(tokens in proptest::collection::vec("[a-e]{1,3}", 0..200)) {
            let counts = count_tokens(&tokens);
            let mass: u64 = counts.iter().map(|(_, c)| c).sum();
            prop_assert_eq!(mass, tokens.len() as u64);
        }

        #[test]
        fn sorted_descending(tokens in proptest::collection::vec("[a-e]{1,3}", 0..200)) {
            let counts = count_tokens(&tokens);
            for pair in counts.windows(2) {
                prop_assert!(pair[0].1 >= pair[1].1);
            }
        }
    }
}
