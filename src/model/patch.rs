//! Partial update payload

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient::{self, RawNumbers};

/// Fields to overwrite on an existing record
///
/// `None` means "not supplied"; a patch cannot clear a field. A supplied
/// numeric field that does not hold a canonical number is applied verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PatchRepr", into = "PatchRepr")]
pub struct MoviePatch {
    pub id: Option<String>,

    pub title: Option<String>,

    pub year: Option<i32>,

    pub genre: Option<String>,

    pub director: Option<String>,

    pub actors: Option<String>,

    pub plot: Option<String>,

    pub imdb_rating: Option<f64>,

    pub runtime_minutes: Option<u32>,

    pub extra: Map<String, Value>,

    pub(super) raw: RawNumbers,
}

#[derive(Serialize, Deserialize)]
struct PatchRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,

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

impl From<PatchRepr> for MoviePatch {
    fn from(repr: PatchRepr) -> Self {
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

impl From<MoviePatch> for PatchRepr {
    fn from(patch: MoviePatch) -> Self {
        Self {
            year: lenient::join(patch.year, &patch.raw.year),
            imdb_rating: lenient::join(patch.imdb_rating, &patch.raw.imdb_rating),
            runtime_minutes: lenient::join(patch.runtime_minutes, &patch.raw.runtime_minutes),
            id: patch.id,
            title: patch.title,
            genre: patch.genre,
            director: patch.director,
            actors: patch.actors,
            plot: patch.plot,
            extra: patch.extra,
        }
    }
}

impl MoviePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self.raw.year = None;
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.imdb_rating = Some(rating);
        self.raw.imdb_rating = None;
        self
    }

    pub fn runtime(mut self, minutes: u32) -> Self {
        self.runtime_minutes = Some(minutes);
        self.raw.runtime_minutes = None;
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// True when applying the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.title.is_none()
            && self.year.is_none()
            && self.genre.is_none()
            && self.director.is_none()
            && self.actors.is_none()
            && self.plot.is_none()
            && self.imdb_rating.is_none()
            && self.runtime_minutes.is_none()
            && self.extra.is_empty()
            && self.raw.is_empty()
    }
}
