//! Movie record
//!
//! Serde mapping of a single persisted movie.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient::{self, RawNumbers};
use super::MoviePatch;

/// A single movie in the collection
///
/// Absent optional fields are omitted on save, so a rating of `0.0` and a
/// missing rating stay distinguishable on disk and in memory. Numeric fields
/// hold the coerced number; the JSON they were loaded from is written back
/// unchanged while the number stays the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordRepr", into = "RecordRepr")]
pub struct MovieRecord {
    /// Caller-supplied lookup key (exact, case-sensitive)
    pub id: String,

    pub title: String,

    pub year: Option<i32>,

    /// One or more labels, e.g. `"Drama, Crime"`
    pub genre: Option<String>,

    pub director: Option<String>,

    pub actors: Option<String>,

    pub plot: Option<String>,

    pub imdb_rating: Option<f64>,

    pub runtime_minutes: Option<u32>,

    /// Fields outside the known schema, preserved verbatim
    pub extra: Map<String, Value>,

    raw: RawNumbers,
}

/// On-disk shape of a record
#[derive(Serialize, Deserialize)]
struct RecordRepr {
    id: String,

    title: String,

    #[serde(
        default,
        deserialize_with = "lenient::present",
        skip_serializing_if = "Option::is_none"
    )]
    year: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    genre: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    director: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    actors: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    plot: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::present",
        skip_serializing_if = "Option::is_none"
    )]
    imdb_rating: Option<Value>,

    #[serde(
        default,
        deserialize_with = "lenient::present",
        skip_serializing_if = "Option::is_none"
    )]
    runtime_minutes: Option<Value>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RecordRepr> for MovieRecord {
    fn from(repr: RecordRepr) -> Self {
        let (year, raw_year) = lenient::split(repr.year);
        let (imdb_rating, raw_rating) = lenient::split(repr.imdb_rating);
        let (runtime_minutes, raw_runtime) = lenient::split(repr.runtime_minutes);

        Self {
            id: repr.id,
            title: repr.title,
            year,
            genre: repr.genre,
            director: repr.director,
            actors: repr.actors,
            plot: repr.plot,
            imdb_rating,
            runtime_minutes,
            extra: repr.extra,
            raw: RawNumbers {
                year: raw_year,
                imdb_rating: raw_rating,
                runtime_minutes: raw_runtime,
            },
        }
    }
}

impl From<MovieRecord> for RecordRepr {
    fn from(movie: MovieRecord) -> Self {
        Self {
            year: lenient::join(movie.year, &movie.raw.year),
            imdb_rating: lenient::join(movie.imdb_rating, &movie.raw.imdb_rating),
            runtime_minutes: lenient::join(movie.runtime_minutes, &movie.raw.runtime_minutes),
            id: movie.id,
            title: movie.title,
            genre: movie.genre,
            director: movie.director,
            actors: movie.actors,
            plot: movie.plot,
            extra: movie.extra,
        }
    }
}

impl MovieRecord {
    /// Create a record with only the required fields set
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: None,
            genre: None,
            director: None,
            actors: None,
            plot: None,
            imdb_rating: None,
            runtime_minutes: None,
            extra: Map::new(),
            raw: RawNumbers::default(),
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self.raw.year = None;
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.imdb_rating = Some(rating);
        self.raw.imdb_rating = None;
        self
    }

    pub fn with_runtime(mut self, minutes: u32) -> Self {
        self.runtime_minutes = Some(minutes);
        self.raw.runtime_minutes = None;
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    /// Genre labels: split on commas, trimmed, empty tokens dropped
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genre
            .as_deref()
            .into_iter()
            .flat_map(|g| g.split(','))
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }

    /// Merge a patch: supplied fields overwrite, everything else is kept
    pub fn apply(&mut self, patch: MoviePatch) {
        let MoviePatch {
            id,
            title,
            year,
            genre,
            director,
            actors,
            plot,
            imdb_rating,
            runtime_minutes,
            extra,
            raw,
        } = patch;

        if let Some(id) = id {
            self.id = id;
        }
        if let Some(title) = title {
            self.title = title;
        }
        lenient::merge(&mut self.year, &mut self.raw.year, year, raw.year);
        if genre.is_some() {
            self.genre = genre;
        }
        if director.is_some() {
            self.director = director;
        }
        if actors.is_some() {
            self.actors = actors;
        }
        if plot.is_some() {
            self.plot = plot;
        }
        lenient::merge(
            &mut self.imdb_rating,
            &mut self.raw.imdb_rating,
            imdb_rating,
            raw.imdb_rating,
        );
        lenient::merge(
            &mut self.runtime_minutes,
            &mut self.raw.runtime_minutes,
            runtime_minutes,
            raw.runtime_minutes,
        );
        self.extra.extend(extra);
    }
}
