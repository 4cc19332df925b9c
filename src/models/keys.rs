//! Composite keys for grouping and slot lookup.
//!
//! Both keys compare structurally as (team, number) tuples. Numbers are
//! compared numerically unless [`PriorityOrder::Lexicographic`] is requested,
//! which reproduces spreadsheet-era string ordering (`"10" < "2"`).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// How priority numbers are compared when ordering tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityOrder {
    /// 1 < 2 < 10.
    #[default]
    Numeric,
    /// Compare decimal renderings as strings: "1" < "10" < "2".
    Lexicographic,
}

impl PriorityOrder {
    /// Compares two priority numbers under this ordering.
    pub fn compare(self, a: i64, b: i64) -> Ordering {
        match self {
            PriorityOrder::Numeric => a.cmp(&b),
            PriorityOrder::Lexicographic => a.to_string().cmp(&b.to_string()),
        }
    }
}

/// A (team, priority) tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamPriority {
    /// Team name.
    pub team_name: String,
    /// Feature priority shared by every allocation in the tier.
    pub priority: i64,
}

impl TeamPriority {
    /// Creates a tier key.
    pub fn new(team_name: impl Into<String>, priority: i64) -> Self {
        Self {
            team_name: team_name.into(),
            priority,
        }
    }

    /// Orders by team name, then by priority under `order`.
    pub fn cmp_with(&self, other: &Self, order: PriorityOrder) -> Ordering {
        self.team_name
            .cmp(&other.team_name)
            .then_with(|| order.compare(self.priority, other.priority))
    }
}

impl fmt::Display for TeamPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / P{}", self.team_name, self.priority)
    }
}

/// A (team, week) slot key. Weeks are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamWeek {
    /// Team name.
    pub team_name: String,
    /// Week number.
    pub week: u32,
}

impl TeamWeek {
    /// Creates a slot key.
    pub fn new(team_name: impl Into<String>, week: u32) -> Self {
        Self {
            team_name: team_name.into(),
            week,
        }
    }

    /// Report label, e.g. `"Week 3"`.
    pub fn week_label(&self) -> String {
        format!("Week {}", self.week)
    }
}

impl fmt::Display for TeamWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.team_name, self.week_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_numeric_priority_order() {
        let p2 = TeamPriority::new("A", 2);
        let p10 = TeamPriority::new("A", 10);
        assert_eq!(p2.cmp_with(&p10, PriorityOrder::Numeric), Ordering::Less);
        assert!(p2 < p10);
    }

    #[test]
    fn test_lexicographic_priority_order() {
        let p2 = TeamPriority::new("A", 2);
        let p10 = TeamPriority::new("A", 10);
        assert_eq!(
            p2.cmp_with(&p10, PriorityOrder::Lexicographic),
            Ordering::Greater
        );
    }

    #[test]
    fn test_team_name_dominates() {
        let a9 = TeamPriority::new("A", 9);
        let b1 = TeamPriority::new("B", 1);
        assert_eq!(a9.cmp_with(&b1, PriorityOrder::Numeric), Ordering::Less);
        assert_eq!(a9.cmp_with(&b1, PriorityOrder::Lexicographic), Ordering::Less);
    }

    #[test]
    fn test_keys_do_not_collide() {
        // "A1" + 23 and "A" + 123 concatenate to the same string
        let mut set = HashSet::new();
        set.insert(TeamPriority::new("A1", 23));
        assert!(set.insert(TeamPriority::new("A", 123)));
    }

    #[test]
    fn test_team_week_numeric_order() {
        let w2 = TeamWeek::new("A", 2);
        let w10 = TeamWeek::new("A", 10);
        assert!(w2 < w10);
        assert_eq!(w10.week_label(), "Week 10");
        assert_eq!(w10.to_string(), "A / Week 10");
    }
}
