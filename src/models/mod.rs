//! Forecasting domain models.
//!
//! Provides the input records (teams, features, planned allocations) and
//! the output structure (per-slot weekly allocations) of a forecast run.
//!
//! # Domain Mappings
//!
//! | u-forecast | Product Planning | Services | Manufacturing |
//! |------------|------------------|----------|---------------|
//! | Team | Squad | Practice | Work Center |
//! | Feature | Epic | Engagement | Order |
//! | Allocation | Team Estimate | Staffing Need | Routing Load |
//! | WeeklyAllocation | Sprint Plan | Weekly Roster | Capacity Bucket |

mod allocation;
mod feature;
mod forecast;
mod keys;
mod team;

pub use allocation::{Allocation, Fragment};
pub use feature::Feature;
pub use forecast::{Forecast, WeeklyAllocation};
pub use keys::{PriorityOrder, TeamPriority, TeamWeek};
pub use team::Team;
