//! # StudyConnect Client
//!
//! The non-layout half of the StudyConnect app: everything a screen needs
//! between "the view appeared" and "render these values".
//!
//! ## Architecture
//!
//! - **Aggregator**: pure derivations from raw records (today count, next
//!   session, group cards, map pins)
//! - **Screens**: view models with explicit `activate` hooks and
//!   [`state::FetchState`] per fetch
//! - **Actions**: single-call create/update operations of the form screens
//! - **Geocode**: HTTP geocoder used for map pins
//!
//! Collaborators (document store, blob storage, geocoder) are injected as
//! trait objects or generics from `studyconnect-core`.

/// Derivations from raw store records
pub mod aggregator;
/// Form-screen operations against the store and blob storage
pub mod actions;
/// Environment configuration
pub mod config;
/// Geocoder implementations
pub mod geocode;
/// Meeting transcript summaries
pub mod meeting;
/// Screen view models
pub mod screens;
/// Fetch lifecycle state
pub mod state;
