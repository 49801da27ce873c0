//! Version decision layer
//!
//! This module holds the logic that decides whether an installed app should be
//! asked to update: fetching store metadata once per check cycle, comparing
//! versions numerically, and applying the required-version policy.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Provider   │────▶│    Cache    │────▶│   Policy    │
//! │  (fetch)    │     │ (one cycle) │     │ (evaluate)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │  Providers  │                         │   Compare   │
//! │(store, json)│                         │(version cmp)│
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: Single-fetch-per-cycle metadata cache
//! - [`compare`]: Numeric dot-segment version ordering
//! - [`error`]: Error types for fetches, configuration and flag storage
//! - [`metadata`]: `AppMetadata` and the `MetadataProvider` trait
//! - [`policy`]: Required-version policy evaluation
//! - [`providers`]: Concrete providers (App Store lookup, JSON requirement)
//! - [`requirement`]: `UpdateRequirement` and the `RequirementProvider` trait

pub mod cache;
pub mod compare;
pub mod error;
pub mod metadata;
pub mod policy;
pub mod providers;
pub mod requirement;
