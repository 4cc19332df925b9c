//! Feature model.

use serde::{Deserialize, Serialize};

/// A feature to be delivered by one or more teams.
///
/// Lower `priority` values are scheduled first. `total_efforts` is the
/// overall estimate across teams and is informational only; the forecast
/// works from the per-team efforts in [`Allocation`](super::Allocation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Unique feature name.
    pub name: String,
    /// Priority rank (lower = more important).
    pub priority: i64,
    /// Total estimated effort across all teams.
    pub total_efforts: f64,
}

impl Feature {
    /// Creates a feature with the given priority.
    pub fn new(name: impl Into<String>, priority: i64) -> Self {
        Self {
            name: name.into(),
            priority,
            total_efforts: 0.0,
        }
    }

    /// Sets the total effort estimate.
    pub fn with_total_efforts(mut self, total_efforts: f64) -> Self {
        self.total_efforts = total_efforts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_builder() {
        let f = Feature::new("Login", 2).with_total_efforts(30.0);
        assert_eq!(f.name, "Login");
        assert_eq!(f.priority, 2);
        assert!((f.total_efforts - 30.0).abs() < 1e-10);
    }
}
