//! Shared utility functions for Compar'AI crates.

/// Descriptive statistics over plain `f64` slices
pub mod stats {
    /// Arithmetic mean, or `None` for an empty slice.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Sample standard deviation (n - 1 denominator).
    ///
    /// Undefined for fewer than two values.
    pub fn sample_std(values: &[f64]) -> Option<f64> {
        if values.len() < 2 {
            return None;
        }
        let m = mean(values)?;
        let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
        Some((ss / (values.len() - 1) as f64).sqrt())
    }

    /// Largest value, or `None` for an empty slice.
    pub fn max(values: &[f64]) -> Option<f64> {
        values.iter().copied().reduce(f64::max)
    }

    /// Quantile `q` (0..=1) of already sorted values, interpolating linearly
    /// between the two nearest order statistics.
    pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
        if sorted.is_empty() {
            return None;
        }
        let q = q.clamp(0.0, 1.0);
        let pos = q * (sorted.len() - 1) as f64;
        let lower = pos.floor() as usize;
        let upper = pos.ceil() as usize;
        let weight = pos - lower as f64;
        Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
    }

}

/// Display formatting for tables
pub mod format {
    /// Fixed-point formatting with `decimals` digits.
    pub fn fixed(value: f64, decimals: usize) -> String {
        format!("{:.*}", decimals, value)
    }

    /// Fixed-point formatting, with "-" for missing values.
    pub fn fixed_or_dash(value: Option<f64>, decimals: usize) -> String {
        value.map_or_else(|| "-".to_string(), |v| fixed(v, decimals))
    }

    /// Podium marker for ranks 1-3, the plain rank number otherwise.
    pub fn medal(rank: usize) -> String {
        match rank {
            1 => "🥇".to_string(),
            2 => "🥈".to_string(),
            3 => "🥉".to_string(),
            n => n.to_string(),
        }
    }

}
