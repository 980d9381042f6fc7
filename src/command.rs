//! Command definitions
//!
//! One variant per operation, carrying arguments the way an outer surface
//! (CLI, HTTP router) receives them: raw strings for numbers and parsed JSON
//! for record payloads. `Engine::execute` routes them.

use serde::Serialize;
use serde_json::Value;

use crate::metrics::MovieMetrics;
use crate::model::MovieRecord;

/// A parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Every record in collection order
    All,

    /// Lookup by exact id
    Get { id: String },

    ByYear { year: String },

    ByYearRange { from: String, to: String },

    ByMinDuration { minutes: String },

    ByTitleAndYear { title: String, year: String },

    ByMinRating { rating: String },

    ByMaxRating { rating: String },

    /// Ratings at or above the configured top threshold
    TopRated,

    /// Ratings at or below the configured low threshold
    LowRated,

    Metrics,

    /// Append a new record
    Create { movie: Value },

    /// Merge fields onto an existing record
    Update { id: String, patch: Value },

    /// Remove every record with this id
    Delete { id: String },
}

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Read,
    Write,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Create { .. } | Command::Update { .. } | Command::Delete { .. } => {
                CommandType::Write
            }
            _ => CommandType::Read,
        }
    }
}

/// Result of a command, serialized as the bare payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// A single record, `null` when absent
    Movie(Option<MovieRecord>),

    Movies(Vec<MovieRecord>),

    Metrics(Box<MovieMetrics>),

    Deleted { removed: usize },
}

impl Response {
    /// Records carried by the response, if it is a list
    pub fn movies(&self) -> Option<&[MovieRecord]> {
        match self {
            Response::Movies(movies) => Some(movies.as_slice()),
            _ => None,
        }
    }
}
