//! Multi-factor recommendation scoring and ranking for marketplace listings.
//!
//! The scoring core lives in [`services`] and is pure: a corpus snapshot, an
//! optional [`models::UserPreference`] and a [`services::ScoringConfig`] go in,
//! an ordered list of [`models::ScoredProduct`] comes out. [`api`] exposes the
//! same pipeline over a stateless HTTP surface.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
