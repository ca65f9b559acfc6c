//! Lead Scoring Pipeline Library
//!
//! This library ingests synthetic lead records, deduplicates and enriches
//! them, tags industries, scores them and exports the result for a
//! dashboard or file download.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core pipeline logic.
//! - `integrations`: Upstream source and export integrations.
//! - `cities`: Reference list of known city names.
//! - `circuit_breaker`: Circuit breaker for upstream fetches.
//! - `config`: Configuration management.
//! - `dashboard`: Ordered, filtered and paginated lead views.
//! - `enrichment`: Heuristic attribute enrichment.
//! - `errors`: Error handling types.
//! - `export`: CSV and JSON export.
//! - `filter`: Deduplication and filtering.
//! - `handlers`: HTTP request handlers.
//! - `models`: Core data models.
//! - `pipeline`: Stage composition.
//! - `scorer`: Lead scoring.
//! - `source`: Random User API client.
//! - `tagger`: Industry and high-potential tagging.

pub mod api;
pub mod core;
pub mod integrations;

pub mod cities;
pub mod circuit_breaker;
pub mod config;
pub mod dashboard;
pub mod enrichment;
pub mod errors;
pub mod export;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod scorer;
pub mod source;
pub mod tagger;
