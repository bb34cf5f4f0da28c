// Rating statistics, ordering and random picks over the stored movies.

use crate::movie::Movie;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Rating summary over a non-empty list of movies.
#[derive(Debug, PartialEq)]
pub struct RatingStats<'a> {
    pub average: f64,
    pub median: f64,
    /// Every movie sharing the highest rating, in store order.
    pub best: Vec<&'a Movie>,
    /// Every movie sharing the lowest rating, in store order.
    pub worst: Vec<&'a Movie>,
}

/// `None` for an empty collection.
pub fn summarize(movies: &[Movie]) -> Option<RatingStats<'_>> {
    if movies.is_empty() {
        return None;
    }

    let ratings: Vec<f64> = movies.iter().map(|m| m.rating).collect();
    let average = ratings.iter().sum::<f64>() / ratings.len() as f64;
    let median = median(&ratings);

    let max = ratings.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = ratings.iter().copied().fold(f64::INFINITY, f64::min);

    Some(RatingStats {
        average,
        median,
        best: movies.iter().filter(|m| m.rating == max).collect(),
        worst: movies.iter().filter(|m| m.rating == min).collect(),
    })
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Highest rating first. Ties keep store order.
pub fn sorted_by_rating(mut movies: Vec<Movie>) -> Vec<Movie> {
    movies.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    movies
}

/// Uniform pick over the given movies.
pub fn pick_random<'a, R: Rng + ?Sized>(movies: &'a [Movie], rng: &mut R) -> Option<&'a Movie> {
    movies.choose(rng)
}

/// Round for display to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
