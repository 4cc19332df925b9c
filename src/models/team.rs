//! Team model.
//!
//! Teams are the entities that perform feature work. Each team has a head
//! count, a productivity factor, and a weekly capacity expressed in effort
//! units. Capacity is the only field the forecast consumes; the others are
//! carried through from the input for reporting.

use serde::{Deserialize, Serialize};

/// A team that can be allocated feature work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Unique team name.
    pub name: String,
    /// Number of people on the team.
    pub head_count: u32,
    /// Productivity multiplier (1.0 = nominal).
    pub productivity: f64,
    /// Effort units the team can deliver per week.
    pub week_capacity: f64,
}

impl Team {
    /// Creates a team with the given weekly capacity.
    pub fn new(name: impl Into<String>, week_capacity: f64) -> Self {
        Self {
            name: name.into(),
            head_count: 0,
            productivity: 1.0,
            week_capacity,
        }
    }

    /// Sets the head count.
    pub fn with_head_count(mut self, head_count: u32) -> Self {
        self.head_count = head_count;
        self
    }

    /// Sets the productivity factor.
    pub fn with_productivity(mut self, productivity: f64) -> Self {
        self.productivity = productivity;
        self
    }

    /// Smallest weekly capacity a forecast accepts.
    pub const MIN_WEEK_CAPACITY: f64 = 1e-9;

    /// Whether the weekly capacity can drive a forecast (finite and above
    /// [`MIN_WEEK_CAPACITY`](Self::MIN_WEEK_CAPACITY)).
    #[inline]
    pub fn has_usable_capacity(&self) -> bool {
        self.week_capacity.is_finite() && self.week_capacity > Self::MIN_WEEK_CAPACITY
    }
}
