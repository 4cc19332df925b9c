//! Priority tier grouping.
//!
//! # Algorithm
//!
//! 1. Key every allocation by (team, feature priority).
//! 2. Collect allocations sharing a key into one tier, kept in ascending
//!    effort order by binary-search insertion. Equal efforts keep their
//!    input order.
//! 3. Order tiers by team name, then by priority.
//!
//! Sample output:
//!
//! ```text
//! Team1  P1  [Feature1 (3), Feature3 (8)]
//! Team1  P2  [Feature2 (5)]
//! Team2  P1  [Feature3 (4)]
//! ```
//!
//! # Complexity
//! O(n log n) comparisons for n allocations.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{ForecastError, Result};
use crate::models::{Allocation, Feature, PriorityOrder, TeamPriority};

/// One team's allocations at one priority, smallest effort first.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityTier {
    /// Tier key.
    pub key: TeamPriority,
    /// Allocations in ascending effort order.
    pub allocations: Vec<Allocation>,
}

impl PriorityTier {
    fn new(key: TeamPriority) -> Self {
        Self {
            key,
            allocations: Vec::new(),
        }
    }

    /// Inserts after any allocation with equal or smaller effort.
    fn insert(&mut self, allocation: Allocation) {
        let pos = self
            .allocations
            .partition_point(|a| a.cmp_by_efforts(&allocation) != Ordering::Greater);
        self.allocations.insert(pos, allocation);
    }

    /// Total effort planned in this tier.
    pub fn total_efforts(&self) -> f64 {
        self.allocations.iter().map(|a| a.efforts).sum()
    }
}

/// Groups allocations into ordered priority tiers.
///
/// # Errors
/// [`ForecastError::UnknownFeature`] if an allocation names a feature
/// missing from `features`.
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use u_forecast::forecast::group;
/// use u_forecast::models::{Allocation, Feature, PriorityOrder};
///
/// let features: HashMap<String, Feature> = [Feature::new("F1", 2), Feature::new("F2", 1)]
///     .into_iter()
///     .map(|f| (f.name.clone(), f))
///     .collect();
/// let allocations = vec![Allocation::new("A", "F1", 5.0), Allocation::new("A", "F2", 9.0)];
///
/// let tiers = group(&allocations, &features, PriorityOrder::Numeric).unwrap();
/// assert_eq!(tiers[0].key.priority, 1);
/// assert_eq!(tiers[1].allocations[0].feature_name, "F1");
/// ```
pub fn group(
    allocations: &[Allocation],
    features: &HashMap<String, Feature>,
    order: PriorityOrder,
) -> Result<Vec<PriorityTier>> {
    let mut tiers: Vec<PriorityTier> = Vec::new();
    let mut index: HashMap<TeamPriority, usize> = HashMap::new();

    for allocation in allocations {
        let feature = features.get(&allocation.feature_name).ok_or_else(|| {
            ForecastError::UnknownFeature {
                team: allocation.team_name.clone(),
                feature: allocation.feature_name.clone(),
            }
        })?;
        let key = TeamPriority::new(allocation.team_name.as_str(), feature.priority);

        let idx = *index.entry(key.clone()).or_insert_with(|| {
            tiers.push(PriorityTier::new(key));
            tiers.len() - 1
        });
        tiers[idx].insert(allocation.clone());
    }

    tiers.sort_by(|a, b| a.key.cmp_with(&b.key, order));
    Ok(tiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(list: &[(&str, i64)]) -> HashMap<String, Feature> {
        list.iter()
            .map(|&(name, priority)| (name.to_string(), Feature::new(name, priority)))
            .collect()
    }

    fn names(tier: &PriorityTier) -> Vec<&str> {
        tier.allocations
            .iter()
            .map(|a| a.feature_name.as_str())
            .collect()
    }

    #[test]
    fn test_groups_by_team_and_priority() {
        let feats = features(&[("F1", 1), ("F2", 2), ("F3", 1)]);
        let allocations = vec![
            Allocation::new("Team2", "F3", 4.0),
            Allocation::new("Team1", "F1", 3.0),
            Allocation::new("Team1", "F2", 5.0),
            Allocation::new("Team1", "F3", 8.0),
        ];

        let tiers = group(&allocations, &feats, PriorityOrder::Numeric).unwrap();
        let keys: Vec<String> = tiers.iter().map(|t| t.key.to_string()).collect();
        assert_eq!(keys, vec!["Team1 / P1", "Team1 / P2", "Team2 / P1"]);
        assert_eq!(names(&tiers[0]), vec!["F1", "F3"]);
        assert_eq!(names(&tiers[1]), vec!["F2"]);
        assert_eq!(names(&tiers[2]), vec!["F3"]);
    }

    #[test]
    fn test_ascending_effort_within_tier() {
        let feats = features(&[("Big", 1), ("Small", 1), ("Mid", 1)]);
        let allocations = vec![
            Allocation::new("A", "Big", 20.0),
            Allocation::new("A", "Small", 2.0),
            Allocation::new("A", "Mid", 7.0),
        ];

        let tiers = group(&allocations, &feats, PriorityOrder::Numeric).unwrap();
        assert_eq!(tiers.len(), 1);
        assert_eq!(names(&tiers[0]), vec!["Small", "Mid", "Big"]);
        assert!((tiers[0].total_efforts() - 29.0).abs() < 1e-10);
    }

    #[test]
    fn test_equal_efforts_keep_input_order() {
        let feats = features(&[("X", 1), ("Y", 1), ("Z", 1)]);
        let allocations = vec![
            Allocation::new("A", "Y", 5.0),
            Allocation::new("A", "X", 5.0),
            Allocation::new("A", "Z", 5.0),
        ];

        let tiers = group(&allocations, &feats, PriorityOrder::Numeric).unwrap();
        assert_eq!(names(&tiers[0]), vec!["Y", "X", "Z"]);
    }

    #[test]
    fn test_priority_order_modes() {
        let feats = features(&[("Two", 2), ("Ten", 10)]);
        let allocations = vec![
            Allocation::new("A", "Two", 1.0),
            Allocation::new("A", "Ten", 1.0),
        ];

        let numeric = group(&allocations, &feats, PriorityOrder::Numeric).unwrap();
        assert_eq!(numeric[0].key.priority, 2);

        let legacy = group(&allocations, &feats, PriorityOrder::Lexicographic).unwrap();
        assert_eq!(legacy[0].key.priority, 10);
    }

    #[test]
    fn test_unknown_feature() {
        let feats = features(&[("F1", 1)]);
        let allocations = vec![Allocation::new("A", "Ghost", 1.0)];

        let err = group(&allocations, &feats, PriorityOrder::Numeric).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::UnknownFeature { ref team, ref feature } if team == "A" && feature == "Ghost"
        ));
    }

    #[test]
    fn test_empty_input() {
        let tiers = group(&[], &HashMap::new(), PriorityOrder::Numeric).unwrap();
        assert!(tiers.is_empty());
    }
}
