//! The efficiency score: the primary ranking metric.
//!
//! Efficiency is the ratio of mean quality to mean energy, with a fixed
//! stabilizer added to the denominator:
//!
//! ```text
//! efficiency = avg_quality / (avg_energy + 0.01)
//! ```
//!
//! The user-facing description ([`DOCUMENTED_DESCRIPTION`]) talks about a
//! 40/20/20/20 weighted composite of normalized metrics. That is not what is
//! computed, and neither matches the unweighted `overall_score` of
//! [`crate::scorecard`]. The three are kept as they are.

/// Added to denominators so an all-zero column cannot divide by zero.
pub const STABILIZER: f64 = 0.01;

/// The formula actually used for ranking.
pub const COMPUTED_FORMULA: &str = "Efficiency = avg_quality / (avg_energy + 0.01)";

/// How the efficiency score is described to users.
pub const DOCUMENTED_DESCRIPTION: &str = "\
The Efficiency Score is a composite metric used to evaluate the overall
performance of each model, considering Quality, Latency, CO2 emissions, and
Energy consumption.

It is calculated as:

- Quality (40%): higher quality increases the score.
- Latency (20%): faster response times increase the score.
- CO2 emissions (20%): lower CO2 emissions increase the score.
- Energy consumption (20%): lower energy usage increases the score.

Formula:
Score = 0.4 * Quality_norm + 0.2 * Latency_norm + 0.2 * CO2_norm + 0.2 * Energy_norm

Each metric is normalized between 0 and 1.
A higher score indicates a better trade-off between accuracy, speed, and
environmental impact.";

/// Efficiency of a (model, size) group.
///
/// Finite and non-negative whenever both inputs are non-negative.
pub fn efficiency(avg_quality: f64, avg_energy: f64) -> f64 {
    avg_quality / (avg_energy + STABILIZER)
}
