//! Planned team/feature effort.
//!
//! An allocation records how much effort one team needs to deliver one
//! feature. Its identity is the (team, feature) pair; within a priority
//! tier allocations are ordered by effort, smallest first.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Effort required from a team to deliver a feature.
///
/// Equality and hashing use only the (team, feature) pair, so two
/// estimates for the same pair are the same allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    /// Team doing the work.
    pub team_name: String,
    /// Feature being delivered.
    pub feature_name: String,
    /// Required effort in the team's capacity units.
    pub efforts: f64,
}

impl Allocation {
    /// Creates a new allocation.
    pub fn new(
        team_name: impl Into<String>,
        feature_name: impl Into<String>,
        efforts: f64,
    ) -> Self {
        Self {
            team_name: team_name.into(),
            feature_name: feature_name.into(),
            efforts,
        }
    }

    /// Composite identity of this allocation.
    pub fn key(&self) -> (&str, &str) {
        (&self.team_name, &self.feature_name)
    }

    /// Orders by effort ascending (the intra-tier order).
    pub fn cmp_by_efforts(&self, other: &Self) -> Ordering {
        self.efforts.total_cmp(&other.efforts)
    }
}

impl PartialEq for Allocation {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Allocation {}

impl Hash for Allocation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// The part of one feature's effort consumed in one (team, week) slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Feature the effort was spent on.
    pub feature_name: String,
    /// Effort consumed in the slot.
    pub efforts: f64,
}

impl Fragment {
    /// Creates a fragment.
    pub fn new(feature_name: impl Into<String>, efforts: f64) -> Self {
        Self {
            feature_name: feature_name.into(),
            efforts,
        }
    }
}
