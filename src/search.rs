// Title search: case-insensitive substring first, fuzzy suggestions when
// nothing contains the query.

use crate::movie::Movie;

/// Suggestions must score strictly above this.
pub const FUZZY_THRESHOLD: u8 = 50;

#[derive(Debug, PartialEq)]
pub enum SearchOutcome {
    /// Titles containing the query, in store order.
    Matches(Vec<Movie>),
    /// No substring hit; close titles with their score, best first.
    Suggestions(Vec<(Movie, u8)>),
    NoResults,
}

/// Case-insensitive substring search, falling back to fuzzy suggestions.
/// `query` is expected to be trimmed already.
pub fn search(movies: Vec<Movie>, query: &str) -> SearchOutcome {
    let needle = query.to_lowercase();

    let (matches, rest): (Vec<Movie>, Vec<Movie>) = movies
        .into_iter()
        .partition(|m| m.title.to_lowercase().contains(&needle));
    if !matches.is_empty() {
        return SearchOutcome::Matches(matches);
    }

    let mut similar: Vec<(Movie, u8)> = rest
        .into_iter()
        .filter_map(|m| {
            let score = ratio(&needle, &m.title.to_lowercase());
            (score > FUZZY_THRESHOLD).then_some((m, score))
        })
        .collect();
    if similar.is_empty() {
        return SearchOutcome::NoResults;
    }
    similar.sort_by(|a, b| b.1.cmp(&a.1));
    SearchOutcome::Suggestions(similar)
}

/// Similarity in `0..=100` from the indel distance: twice the longest common
/// subsequence over the combined length, rounded half to even. Word order
/// matters.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let lcs = lcs_len(&a, &b);
    (200.0 * lcs as f64 / total as f64).round_ties_even() as u8
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                cur[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}
