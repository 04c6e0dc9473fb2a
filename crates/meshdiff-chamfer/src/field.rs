//! Per-point signed distance field and derived statistics.

/// Signed distances, one per point of a source cloud.
///
/// Values are in the input meshes' units and are **not** normalized to any
/// fixed range; consumers that need a range derive it from the observed
/// values (as the colorizer's default breakpoints do).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceField {
    values: Vec<f64>,
}

impl DistanceField {
    /// Wrap a vector of signed distances.
    #[must_use]
    pub const fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the field holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The signed distances.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume the field, returning the raw values.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // destructor cannot run in const fn
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// One value, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Extrema of the positive (≥ 0) and negative (< 0) partitions.
    #[must_use]
    pub fn stats(&self) -> DistanceStats {
        let mut stats = DistanceStats::default();
        for &v in &self.values {
            if v >= 0.0 {
                stats.min_positive = Some(stats.min_positive.map_or(v, |m: f64| m.min(v)));
                stats.max_positive = Some(stats.max_positive.map_or(v, |m: f64| m.max(v)));
            } else {
                stats.min_negative = Some(stats.min_negative.map_or(v, |m: f64| m.min(v)));
                stats.max_negative = Some(stats.max_negative.map_or(v, |m: f64| m.max(v)));
            }
        }
        stats
    }

    /// Rescale the field to roughly [-1, 1] around its median absolute
    /// deviation: `(v - mad) / (max|v| - mad) * 2 - 1`.
    ///
    /// This is an opt-in presentation aid; the comparison pipeline never
    /// applies it. A degenerate spread (denominator ≈ 0) yields an all-zero
    /// field.
    #[must_use]
    pub fn normalized(&self) -> Vec<f64> {
        if self.values.is_empty() {
            return Vec::new();
        }

        let med = median(&self.values);
        let deviations: Vec<f64> = self.values.iter().map(|v| (v - med).abs()).collect();
        let mad = median(&deviations);
        let max_abs = self.values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));

        let denom = max_abs - mad;
        if denom.abs() < f64::EPSILON {
            return vec![0.0; self.values.len()];
        }

        self.values
            .iter()
            .map(|v| (v - mad) / denom * 2.0 - 1.0)
            .collect()
    }
}

impl From<Vec<f64>> for DistanceField {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(values)
    }
}

/// Extrema of a distance field, split by sign.
///
/// `None` entries mean the partition is empty (e.g. no negative distances
/// when the source lies entirely in front of the target).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistanceStats {
    /// Smallest non-negative distance.
    pub min_positive: Option<f64>,
    /// Largest non-negative distance.
    pub max_positive: Option<f64>,
    /// Smallest (most negative) distance.
    pub min_negative: Option<f64>,
    /// Largest (closest to zero) negative distance.
    pub max_negative: Option<f64>,
}

impl std::fmt::Display for DistanceStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn opt(v: Option<f64>) -> String {
            v.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
        }
        write!(
            f,
            "positive [{}, {}], negative [{}, {}]",
            opt(self.min_positive),
            opt(self.max_positive),
            opt(self.min_negative),
            opt(self.max_negative)
        )
    }
}

/// Median of a non-empty slice (mean of the two middle values for even
/// lengths, as numpy computes it).
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        f64::midpoint(sorted[mid - 1], sorted[mid])
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn stats_partition_by_sign() {
        let field = DistanceField::from_values(vec![0.5, -0.2, 0.0, 1.5, -0.9]);
        let stats = field.stats();
        assert_eq!(stats.min_positive, Some(0.0));
        assert_eq!(stats.max_positive, Some(1.5));
        assert_eq!(stats.min_negative, Some(-0.9));
        assert_eq!(stats.max_negative, Some(-0.2));
    }

    #[test]
    fn stats_with_one_empty_partition() {
        let field = DistanceField::from_values(vec![0.1, 0.2]);
        let stats = field.stats();
        assert!(stats.min_negative.is_none());
        assert!(stats.max_negative.is_none());
        assert_eq!(stats.max_positive, Some(0.2));
        assert!(format!("{stats}").contains('-'));
    }

    #[test]
    fn median_odd_and_even() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_relative_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
    }

    #[test]
    fn normalized_lands_in_unit_range() {
        let field = DistanceField::from_values(vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        let n = field.normalized();
        assert_eq!(n.len(), 5);
        assert!(n.iter().all(|v| v.is_finite()));
        // max |v| maps to +1
        assert_relative_eq!(n[4], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn normalized_degenerate_spread() {
        let field = DistanceField::from_values(vec![0.0, 0.0, 0.0]);
        assert_eq!(field.normalized(), vec![0.0, 0.0, 0.0]);
        assert!(DistanceField::default().normalized().is_empty());
    }
}
