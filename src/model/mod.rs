//! Model Module
//!
//! The unit of storage and its partial-update counterpart.
//!
//! ## Responsibilities
//! - Serde mapping of the on-disk record shape
//! - Lenient decoding of numeric fields (numbers or numeric strings), with
//!   the stored JSON written back unchanged
//! - Preserving unknown fields so payloads round-trip verbatim
//! - Field-wise merge of a patch onto a record
//!
//! ## Record Shape
//! ```text
//! {
//!   "id": "tt0111161",            required, lookup key
//!   "title": "...",               required
//!   "year": 1994,                 optional integer
//!   "genre": "Drama, Crime",      optional, comma-separated labels
//!   "director": "...",            optional
//!   "actors": "...",              optional
//!   "plot": "...",                optional
//!   "imdb_rating": 9.3,           optional float, 0 is a valid rating
//!   "runtime_minutes": 142,       optional integer
//!   ...                           any other field, kept as-is
//! }
//! ```

mod lenient;
mod patch;
mod record;

pub use patch::MoviePatch;
pub use record::MovieRecord;

/// The whole persisted state: records in insertion order
pub type Collection = Vec<MovieRecord>;
