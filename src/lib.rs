//! Capacity-driven feature forecasting for the U-Engine ecosystem.
//!
//! Given teams with a fixed weekly capacity, prioritized features, and
//! per-team effort estimates, forecasts which week each team works on
//! which feature. Within a team's priority tier, unfinished features
//! split the weekly capacity evenly; tiers run in priority order.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Team`, `Feature`, `Allocation`,
//!   `TeamPriority`, `TeamWeek`, `WeeklyAllocation`, `Forecast`
//! - **`forecast`**: Tier grouping, the fair-share engine, run options, summaries
//! - **`validation`**: Input integrity checks (unknown references, capacity, efforts)
//! - **`io`**: Workbook reader/writer and pivot report rows
//! - **`error`**: `ForecastError` and the crate `Result`
//!
//! # Example
//!
//! ```
//! use u_forecast::forecast::{ForecastEngine, ForecastRequest};
//! use u_forecast::models::{Allocation, Feature, Team};
//!
//! let request = ForecastRequest::new(
//!     vec![Team::new("A", 10.0)],
//!     vec![Feature::new("F1", 1)],
//!     vec![Allocation::new("A", "F1", 30.0)],
//! );
//! let forecast = ForecastEngine::new().forecast_request(&request).unwrap();
//! assert_eq!(forecast.last_week("A"), Some(3));
//! ```

pub mod error;
pub mod forecast;
pub mod io;
pub mod models;
pub mod validation;

pub use error::{ForecastError, Result};
