//! # MovieDB
//!
//! A movie catalogue persisted as one JSON array in a flat file, with:
//! - Multi-predicate queries (id, year, year range, duration, title, rating)
//! - Collection metrics (averages, extremes, distributions)
//! - Create/update/delete with atomic whole-file saves
//! - Single-writer serialization of every read-modify-write
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Outer surface (CLI, router)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                         Engine                               │
//! │            (Single Writer / Multi Reader)                    │
//! └──────┬───────────────────┬───────────────────┬──────────────┘
//!        │                   │                   │
//!        ▼                   ▼                   ▼
//!  ┌───────────┐      ┌─────────────┐     ┌─────────────┐
//!  │   Query   │      │   Metrics   │     │  Mutations  │
//!  │  (pure)   │      │   (pure)    │     │ (write lock)│
//!  └─────┬─────┘      └──────┬──────┘     └──────┬──────┘
//!        └───────────────────┼───────────────────┘
//!                            ▼
//!                    ┌───────────────┐
//!                    │ JsonFileStore │
//!                    │ (load / save) │
//!                    └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod storage;
pub mod query;
pub mod metrics;
pub mod command;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MovieError, Result};
pub use config::Config;
pub use engine::Engine;
pub use metrics::MovieMetrics;
pub use model::{MoviePatch, MovieRecord};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of MovieDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
