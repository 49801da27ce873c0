//! Launch-time update checks for installed apps.
//!
//! On each launch a [`CheckCoordinator`](check::coordinator::CheckCoordinator)
//! runs two independent flows that share one store lookup:
//!
//! - release notes: shown once per installed version, the first time it runs
//! - required version: prompts to update when the installed version is behind
//!   the configured minimum (or behind the store, when no minimum is configured)
//!
//! Everything with side effects (network, prompts, URL opening, persistence)
//! goes through the collaborator traits in [`host`], [`launch::store`] and
//! [`version`].

pub mod check;
pub mod config;
pub mod host;
pub mod launch;
pub mod logging;
pub mod version;
