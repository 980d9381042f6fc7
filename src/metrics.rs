//! Metrics Module
//!
//! Fixed-shape summary of a collection, computed in one pass.
//!
//! ## Rules
//! - Extremes skip records without the keyed field; ties keep the first
//!   record in collection order
//! - `average_rating` is rounded to two decimals, `0` with no ratings
//! - Decades floor the year to a multiple of ten
//! - Genre buckets count records, so a label repeated inside one record's
//!   genre string counts once for that record

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::MovieRecord;

/// Summary of the whole collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieMetrics {
    pub total_movies: usize,
    pub total_genres: usize,
    pub average_rating: f64,
    pub longest_movie: Option<RuntimeSummary>,
    pub shortest_movie: Option<RuntimeSummary>,
    pub newest_movie: Option<YearSummary>,
    pub oldest_movie: Option<YearSummary>,
    pub highest_rated_movie: Option<RatingSummary>,
    pub lowest_rated_movie: Option<RatingSummary>,
    /// Decade start year → record count (JSON keys are strings, e.g. `"1990"`)
    pub movies_by_decade: BTreeMap<i64, usize>,
    /// Trimmed genre label → number of records carrying it
    pub movies_by_genre: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeSummary {
    pub id: String,
    pub title: String,
    pub runtime_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub id: String,
    pub title: String,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub id: String,
    pub title: String,
    pub rating: f64,
}

/// Compute the summary for `movies`
///
/// Never fails; an empty slice yields zero counts, `None` extremes, and
/// empty distributions.
pub fn compute(movies: &[MovieRecord]) -> MovieMetrics {
    let mut rating_sum = 0.0;
    let mut rating_count = 0usize;

    let mut runtime = Extremes::default();
    let mut year = Extremes::default();
    let mut rating = Extremes::default();

    let mut movies_by_decade = BTreeMap::new();
    let mut movies_by_genre: BTreeMap<String, usize> = BTreeMap::new();

    for movie in movies {
        if let Some(r) = movie.imdb_rating {
            rating_sum += r;
            rating_count += 1;
            rating.observe(movie, r);
        }

        if let Some(minutes) = movie.runtime_minutes {
            runtime.observe(movie, minutes);
        }

        if let Some(y) = movie.year {
            year.observe(movie, y);
            *movies_by_decade.entry(decade_of(y)).or_insert(0) += 1;
        }

        let labels: BTreeSet<&str> = movie.genres().collect();
        for label in labels {
            *movies_by_genre.entry(label.to_string()).or_insert(0) += 1;
        }
    }

    let average_rating = if rating_count > 0 {
        round2(rating_sum / rating_count as f64)
    } else {
        0.0
    };

    MovieMetrics {
        total_movies: movies.len(),
        total_genres: movies_by_genre.len(),
        average_rating,
        longest_movie: runtime.max.map(|(m, runtime_minutes)| RuntimeSummary {
            id: m.id.clone(),
            title: m.title.clone(),
            runtime_minutes,
        }),
        shortest_movie: runtime.min.map(|(m, runtime_minutes)| RuntimeSummary {
            id: m.id.clone(),
            title: m.title.clone(),
            runtime_minutes,
        }),
        newest_movie: year.max.map(|(m, year)| YearSummary {
            id: m.id.clone(),
            title: m.title.clone(),
            year,
        }),
        oldest_movie: year.min.map(|(m, year)| YearSummary {
            id: m.id.clone(),
            title: m.title.clone(),
            year,
        }),
        highest_rated_movie: rating.max.map(|(m, rating)| RatingSummary {
            id: m.id.clone(),
            title: m.title.clone(),
            rating,
        }),
        lowest_rated_movie: rating.min.map(|(m, rating)| RatingSummary {
            id: m.id.clone(),
            title: m.title.clone(),
            rating,
        }),
        movies_by_decade,
        movies_by_genre,
    }
}

/// Year floored to its decade; `1999 → 1990`, `-5 → -10`
///
/// Widened to `i64` so years near `i32::MIN` still have a decade.
pub fn decade_of(year: i32) -> i64 {
    i64::from(year).div_euclid(10) * 10
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Running max/min over one key; strict comparisons keep the first on ties
struct Extremes<'a, K> {
    max: Option<(&'a MovieRecord, K)>,
    min: Option<(&'a MovieRecord, K)>,
}

impl<K> Default for Extremes<'_, K> {
    fn default() -> Self {
        Self {
            max: None,
            min: None,
        }
    }
}

impl<'a, K: PartialOrd + Copy> Extremes<'a, K> {
    fn observe(&mut self, movie: &'a MovieRecord, key: K) {
        if self.max.map_or(true, |(_, best)| key > best) {
            self.max = Some((movie, key));
        }
        if self.min.map_or(true, |(_, best)| key < best) {
            self.min = Some((movie, key));
        }
    }
}
