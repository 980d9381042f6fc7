//! Storage Module
//!
//! Durable load/save of the whole collection as one JSON document.
//!
//! ## Responsibilities
//! - Read and decode the full collection on every access
//! - Replace the full collection on every mutation
//! - Never expose a half-written file to a concurrent reader
//!
//! ## File Format
//! ```text
//! ┌────────────────────────────────────────┐
//! │ [                                      │
//! │   { "id": ..., "title": ..., ... },    │
//! │   { "id": ..., "title": ..., ... },    │
//! │   ...               (insertion order)  │
//! │ ]                                      │
//! └────────────────────────────────────────┘
//! ```
//! UTF-8, no schema version marker.
//!
//! ## Save Protocol
//! ```text
//! serialize ─► write unique temp file ─► fsync (EveryWrite) ─► rename over {file}
//! ```
//! The temp file lives in the same directory, so the rename is atomic and a
//! reader sees either the old collection or the new one.
//!
//! ## Writer Locking
//! ```text
//! handle A ─┐                       ┌─ process-local mutex (per canonical path)
//! handle B ─┼─► load/modify/save ◄──┤
//! process 2 ┘                       └─ flock on {file}.lock
//! ```

mod file;
mod lock;

pub use file::JsonFileStore;
pub(crate) use lock::writer_mutex;
