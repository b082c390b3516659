//! Derived views over benchmark observations.
//!
//! This crate turns the raw grouped statistics from `cai-db` into the
//! values behind every table and chart: per-(model, size) aggregates with
//! their efficiency score, the three efficiency rankings, the normalized
//! scorecard, overview metrics and latency views.
//!
//! Everything here is recomputed from the session database on demand;
//! nothing is cached between selections.

pub mod aggregate;
pub mod efficiency;
pub mod latency;
pub mod overview;
pub mod ranking;
pub mod report;
pub mod scorecard;
