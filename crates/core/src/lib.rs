//! # StudyConnect Core
//!
//! Shared domain types for the StudyConnect client: raw store records, typed
//! models decoded from them, color tags, the error taxonomy and the
//! collaborator traits implemented by the `studyconnect-db` crate.

/// Hex color tags and the map pin palette
pub mod color;
/// Error types shared by every crate in the workspace
pub mod errors;
/// Typed models decoded from stored documents
pub mod models;
/// Raw key-value documents and stored field names
pub mod record;
/// Document store, blob storage and geocoder contracts
pub mod store;
