//! Order-preserving merge and dedup of upstream result lists
//!
//! This is a stable filter, not a ranking: lists are concatenated in the
//! order given, the first occurrence of a normalized title wins, and any
//! score-based ordering is applied by the caller to the merged output.

use std::collections::HashSet;

use crate::models::Movie;

/// Merge result lists into one deduplicated sequence
///
/// `exclude` holds normalized titles (lowercased, trimmed) that must not
/// appear in the output at all.
pub fn merge(lists: &[Vec<Movie>], exclude: &HashSet<String>) -> Vec<Movie> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();

    for list in lists {
        for movie in list {
            let key = movie.normalized_title();
            if exclude.contains(&key) {
                continue;
            }
            if !seen.insert(key) {
                continue;
            }
            merged.push(movie.clone());
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str) -> Movie {
        Movie {
            title: title.to_string(),
            rating: None,
            vote_count: None,
            genres: Vec::new(),
            release_year: None,
            overview: None,
            tagline: None,
            source_id: None,
        }
    }

    #[test]
    fn test_dedup_is_case_and_whitespace_insensitive() {
        let lists = vec![
            vec![movie("Inception"), movie("Heat")],
            vec![movie("  inception "), movie("INCEPTION"), movie("Tenet")],
        ];

        let merged = merge(&lists, &HashSet::new());
        let titles: Vec<&str> = merged.iter().map(|m| m.title.as_str()).collect();

        // First occurrence wins, at its position in concatenation order
        assert_eq!(titles, vec!["Inception", "Heat", "Tenet"]);
    }

    #[test]
    fn test_exclusion_is_total() {
        let lists = vec![vec![movie("Alien"), movie("Aliens")]];
        let exclude: HashSet<String> = ["alien".to_string(), "aliens".to_string()].into();

        assert!(merge(&lists, &exclude).is_empty());
    }

    #[test]
    fn test_relative_order_preserved_across_lists() {
        let lists = vec![
            vec![movie("A"), movie("B")],
            vec![movie("C"), movie("A"), movie("D")],
        ];

        let merged = merge(&lists, &HashSet::new());
        let titles: Vec<&str> = merged.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(merge(&[], &HashSet::new()).is_empty());
        assert!(merge(&[Vec::new(), Vec::new()], &HashSet::new()).is_empty());
    }
}
