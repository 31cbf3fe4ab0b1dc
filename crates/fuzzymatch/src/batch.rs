//! Many independent queries against one candidate set
//!
//! Each query is its own call-scoped scan with its own prepared query; rayon
//! only spreads whole queries across worker threads. Output order follows the
//! order of `queries`.

use rayon::prelude::*;

use crate::matcher::{MatchResult, Matcher};

/// [`Matcher::find_best`] for every query, in parallel.
pub fn find_best_many<'c, Q, S>(
    matcher: &Matcher,
    queries: &[Q],
    candidates: &'c [S],
    cutoff: Option<f64>,
) -> Vec<Option<MatchResult<'c>>>
where
    Q: AsRef<str> + Sync,
    S: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| matcher.find_best(query.as_ref(), candidates, cutoff))
        .collect()
}

/// [`Matcher::find_all_above`] for every query, in parallel.
pub fn find_all_above_many<'c, Q, S>(
    matcher: &Matcher,
    queries: &[Q],
    candidates: &'c [S],
    cutoff: Option<f64>,
) -> Vec<Vec<MatchResult<'c>>>
where
    Q: AsRef<str> + Sync,
    S: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| matcher.find_all_above(query.as_ref(), candidates, cutoff))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANDIDATES: [&str; 5] = ["apple", "banana", "cherry", "grape", "melon"];

    #[test]
    fn test_batch_matches_sequential() {
        let matcher = Matcher::new();
        let queries = ["appel", "banan", "chery", "grap", "lemon", "kiwi"];

        let parallel = find_best_many(&matcher, &queries, &CANDIDATES, Some(50.0));
        let sequential: Vec<_> = queries
            .iter()
            .map(|q| matcher.find_best(q, &CANDIDATES, Some(50.0)))
            .collect();

        assert_eq!(parallel, sequential);
        assert_eq!(parallel[0].map(|m| m.text), Some("apple"));
        assert_eq!(parallel[1].map(|m| m.text), Some("banana"));
    }

    #[test]
    fn test_batch_all_above_keeps_query_order() {
        let matcher = Matcher::new();
        let queries: Vec<String> = CANDIDATES.iter().rev().map(|s| s.to_string()).collect();

        let results = find_all_above_many(&matcher, &queries, &CANDIDATES, Some(100.0));
        let indices: Vec<Vec<usize>> = results
            .iter()
            .map(|r| r.iter().map(|m| m.index).collect())
            .collect();
        assert_eq!(indices, vec![vec![4], vec![3], vec![2], vec![1], vec![0]]);
    }

    #[test]
    fn test_batch_empty_queries() {
        let queries: [&str; 0] = [];
        assert!(find_best_many(&Matcher::new(), &queries, &CANDIDATES, None).is_empty());
    }
}
