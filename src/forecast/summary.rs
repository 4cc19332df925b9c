//! Forecast summary metrics.
//!
//! Computes delivery indicators from a finished forecast.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Last week | Latest week a team has work in |
//! | Scheduled efforts | Sum of a team's fragments |
//! | Idle efforts | Capacity left over in the weeks a team touched |
//! | Utilization | scheduled / (weeks touched x week capacity) |
//! | Feature span | First and last week a team works on a feature |

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::models::{Forecast, Team};

/// Per-team indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    /// Team name.
    pub team_name: String,
    /// Latest week with work.
    pub last_week: u32,
    /// Number of weeks touched.
    pub weeks: usize,
    /// Total effort scheduled.
    pub scheduled_efforts: f64,
    /// Capacity left unused in touched weeks.
    pub idle_efforts: f64,
    /// Fraction of touched capacity used (0.0..1.0).
    pub utilization: f64,
}

/// When a team works on a feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSpan {
    /// Team name.
    pub team_name: String,
    /// Feature name.
    pub feature_name: String,
    /// First week with a fragment.
    pub first_week: u32,
    /// Last week with a fragment (the delivery week).
    pub last_week: u32,
    /// Total effort scheduled.
    pub efforts: f64,
}

/// Forecast indicators, sorted by team (and feature).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ForecastSummary {
    /// One entry per team with at least one slot.
    pub teams: Vec<TeamSummary>,
    /// One entry per (team, feature) with at least one fragment.
    pub features: Vec<FeatureSpan>,
}

impl ForecastSummary {
    /// Computes the summary of a forecast.
    ///
    /// Utilization is measured against each team's weekly capacity in
    /// `teams`. A team missing from `teams` falls back to the capacity its
    /// slots were opened with.
    pub fn calculate(forecast: &Forecast, teams_by_name: &HashMap<String, Team>) -> Self {
        let mut teams: BTreeMap<&str, TeamSummary> = BTreeMap::new();
        let mut features: BTreeMap<(&str, &str), FeatureSpan> = BTreeMap::new();

        for slot in forecast.iter() {
            let team_name = slot.team_week.team_name.as_str();
            let week = slot.team_week.week;
            let allocated = slot.allocated_efforts();

            let team = teams.entry(team_name).or_insert_with(|| TeamSummary {
                team_name: team_name.to_string(),
                last_week: week,
                weeks: 0,
                scheduled_efforts: 0.0,
                idle_efforts: 0.0,
                utilization: 0.0,
            });
            team.last_week = team.last_week.max(week);
            team.weeks += 1;
            team.scheduled_efforts += allocated;
            team.idle_efforts += slot.remaining_efforts.max(0.0);

            for fragment in &slot.fragments {
                let span = features
                    .entry((team_name, fragment.feature_name.as_str()))
                    .or_insert_with(|| FeatureSpan {
                        team_name: team_name.to_string(),
                        feature_name: fragment.feature_name.clone(),
                        first_week: week,
                        last_week: week,
                        efforts: 0.0,
                    });
                span.first_week = span.first_week.min(week);
                span.last_week = span.last_week.max(week);
                span.efforts += fragment.efforts;
            }
        }

        let teams = teams
            .into_values()
            .map(|mut t| {
                let available = teams_by_name
                    .get(&t.team_name)
                    .map(|team| team.week_capacity * t.weeks as f64)
                    .unwrap_or(t.scheduled_efforts + t.idle_efforts);
                t.utilization = if available > 0.0 {
                    t.scheduled_efforts / available
                } else {
                    0.0
                };
                t
            })
            .collect();

        Self {
            teams,
            features: features.into_values().collect(),
        }
    }

    /// Latest week across all teams (0 for an empty forecast).
    pub fn makespan_weeks(&self) -> u32 {
        self.teams.iter().map(|t| t.last_week).max().unwrap_or(0)
    }

    /// Summary for one team.
    pub fn team(&self, team_name: &str) -> Option<&TeamSummary> {
        self.teams.iter().find(|t| t.team_name == team_name)
    }

    /// Delivery span of a feature for a team.
    pub fn feature(&self, team_name: &str, feature_name: &str) -> Option<&FeatureSpan> {
        self.features
            .iter()
            .find(|f| f.team_name == team_name && f.feature_name == feature_name)
    }
}
