//! Query Module
//!
//! Stateless predicate evaluation over an in-memory collection.
//!
//! ## Rules
//! - Every filter returns a new vector in collection order; input is untouched
//! - A record missing the field a predicate needs is excluded, never an error
//! - Id and year matches are exact; title matching is a case-insensitive
//!   substring test
//!
//! ## Argument Parsing
//! Outer surfaces hand over raw strings. `parse_year`, `parse_minutes`, and
//! `parse_rating` turn them into typed arguments or a `Validation` error; the
//! command layer maps that error to an empty result for every range and
//! threshold query alike.

use crate::error::{MovieError, Result};
use crate::model::MovieRecord;

// =============================================================================
// Lookups
// =============================================================================

/// First record whose id equals `id` exactly
pub fn find_by_id<'a>(movies: &'a [MovieRecord], id: &str) -> Option<&'a MovieRecord> {
    movies.iter().find(|m| m.id == id)
}

/// Index of the first record whose id equals `id` exactly
pub fn position_of(movies: &[MovieRecord], id: &str) -> Option<usize> {
    movies.iter().position(|m| m.id == id)
}

// =============================================================================
// Filters
// =============================================================================

pub fn filter_by_year(movies: &[MovieRecord], year: i32) -> Vec<MovieRecord> {
    select(movies, |m| m.year == Some(year))
}

/// Records with `from <= year <= to`; an inverted range matches nothing
pub fn filter_by_year_range(movies: &[MovieRecord], from: i32, to: i32) -> Vec<MovieRecord> {
    select(movies, |m| m.year.is_some_and(|y| (from..=to).contains(&y)))
}

/// Records with a known runtime of at least `min_minutes`
pub fn filter_by_min_duration(movies: &[MovieRecord], min_minutes: u32) -> Vec<MovieRecord> {
    select(movies, |m| m.runtime_minutes.is_some_and(|r| r >= min_minutes))
}

/// Title contains `title` (case-insensitive) and year equals `year`
pub fn filter_by_title_and_year(
    movies: &[MovieRecord],
    title: &str,
    year: i32,
) -> Vec<MovieRecord> {
    let needle = title.to_lowercase();
    select(movies, |m| {
        m.year == Some(year) && m.title.to_lowercase().contains(&needle)
    })
}

pub fn filter_by_min_rating(movies: &[MovieRecord], rating: f64) -> Vec<MovieRecord> {
    select(movies, |m| m.imdb_rating.is_some_and(|r| r >= rating))
}

pub fn filter_by_max_rating(movies: &[MovieRecord], rating: f64) -> Vec<MovieRecord> {
    select(movies, |m| m.imdb_rating.is_some_and(|r| r <= rating))
}

fn select<F>(movies: &[MovieRecord], predicate: F) -> Vec<MovieRecord>
where
    F: Fn(&MovieRecord) -> bool,
{
    let matched: Vec<MovieRecord> = movies.iter().filter(|m| predicate(*m)).cloned().collect();
    tracing::trace!(scanned = movies.len(), matched = matched.len(), "filter");
    matched
}

// =============================================================================
// Argument Parsing
// =============================================================================

pub fn parse_year(raw: &str) -> Result<i32> {
    raw.trim()
        .parse()
        .map_err(|_| MovieError::Validation(format!("year is not an integer: {:?}", raw)))
}

pub fn parse_minutes(raw: &str) -> Result<u32> {
    raw.trim().parse().map_err(|_| {
        MovieError::Validation(format!("duration is not a whole number of minutes: {:?}", raw))
    })
}

/// Finite decimal rating; NaN and infinities are rejected
pub fn parse_rating(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
        .ok_or_else(|| MovieError::Validation(format!("rating is not a number: {:?}", raw)))
}
