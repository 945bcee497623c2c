//! cinefeed — movie recommendation aggregation pipeline
//!
//! Turns a raw title query into a ranked, deduplicated, visually annotated
//! feed while hiding the latency and unreliability of the two upstreams it
//! consumes: a recommendation service and a poster lookup service.
//!
//! The pipeline pieces compose as follows: [`services::search`] orchestrates
//! the upstream queries and state transitions, [`services::merge`] dedups
//! combined result lists, [`services::match_score`] derives rank badges,
//! [`cache`] memoizes poster lookups, [`services::gradient`] supplies the
//! deterministic fallback art, and [`services::feed`] paginates whatever the
//! view renders.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
