//! Priority grouping, the fair-share forecast engine, and run summaries.
//!
//! # Pipeline
//!
//! `ForecastRequest` → [`validate_input`](crate::validation::validate_input)
//! → [`group`] → [`ForecastEngine::forecast`] → [`Forecast`](crate::models::Forecast)
//! → [`ForecastSummary`].
//!
//! # Algorithm
//!
//! Within one team's priority tier, every unfinished feature is assumed
//! to progress concurrently, splitting the team's weekly capacity evenly.
//! A week already partly used by an earlier feature only offers what it
//! has left. See [`engine`] for the step-by-step rules.

mod engine;
mod grouping;
mod summary;

pub use engine::{ForecastEngine, ForecastRequest};
pub use grouping::{group, PriorityTier};
pub use summary::{FeatureSpan, ForecastSummary, TeamSummary};

use serde::{Deserialize, Serialize};

use crate::models::PriorityOrder;

/// Options for a forecast run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastOptions {
    /// First week number of every team's schedule.
    pub start_week: u32,
    /// How tier priorities are ordered.
    pub priority_order: PriorityOrder,
    /// Remaining effort at or below this is treated as consumed.
    pub epsilon: f64,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            start_week: 1,
            priority_order: PriorityOrder::Numeric,
            epsilon: 1e-9,
        }
    }
}

impl ForecastOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start week.
    pub fn with_start_week(mut self, start_week: u32) -> Self {
        self.start_week = start_week;
        self
    }

    /// Sets the priority ordering.
    pub fn with_priority_order(mut self, order: PriorityOrder) -> Self {
        self.priority_order = order;
        self
    }

    /// Sets the effort tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}
