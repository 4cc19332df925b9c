//! Fair-share weekly forecast engine.
//!
//! # Algorithm
//!
//! Tiers are processed in grouping order. For each tier:
//!
//! 1. Start at the week the team's previous tier ended on, or at the start
//!    week if the previous tier belonged to another team.
//! 2. Walk the tier's allocations smallest first. While an allocation has
//!    effort left, offer it `week_capacity / active` of the current week,
//!    capped at what the week still has free, where `active` counts the
//!    tier's features not yet known to have finished.
//! 3. If the allocation needs at least that share, consume it and move to
//!    the next week. Otherwise consume the remainder and stay.
//! 4. Once an allocation is done, its final week is marked as an end week
//!    for the tier. Later allocations passing through an end week drop one
//!    feature from `active`. The week cursor then restarts at the start week
//!    and skips through exhausted weeks.
//!
//! Teams never share a week counter, so each team's schedule is
//! independent of the others.
//!
//! # Complexity
//! O(n · w) for n allocations and w weeks per team.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use super::{group, ForecastOptions, PriorityTier};
use crate::error::{ForecastError, Result};
use crate::models::{Allocation, Feature, Forecast, Team, TeamWeek};
use crate::validation::validate_input;

/// Input container for a forecast run.
#[derive(Debug, Clone, Default)]
pub struct ForecastRequest {
    /// Teams by name.
    pub teams: HashMap<String, Team>,
    /// Features by name.
    pub features: HashMap<String, Feature>,
    /// Planned allocations in input order, unique per (team, feature).
    pub allocations: Vec<Allocation>,
}

impl ForecastRequest {
    /// Creates a request from plain lists.
    ///
    /// Later teams, features, or allocations with an already-seen key
    /// replace the earlier entry.
    pub fn new(teams: Vec<Team>, features: Vec<Feature>, allocations: Vec<Allocation>) -> Self {
        let mut request = Self::default();
        for team in teams {
            request = request.with_team(team);
        }
        for feature in features {
            request = request.with_feature(feature);
        }
        for allocation in allocations {
            request = request.with_allocation(allocation);
        }
        request
    }

    /// Adds or replaces a team.
    pub fn with_team(mut self, team: Team) -> Self {
        self.teams.insert(team.name.clone(), team);
        self
    }

    /// Adds or replaces a feature.
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.insert(feature.name.clone(), feature);
        self
    }

    /// Adds an allocation, replacing an existing one for the same
    /// (team, feature) in place.
    pub fn with_allocation(mut self, allocation: Allocation) -> Self {
        match self.allocations.iter_mut().find(|a| **a == allocation) {
            Some(existing) => *existing = allocation,
            None => self.allocations.push(allocation),
        }
        self
    }
}

/// Week-by-week fair-share forecaster.
///
/// # Example
///
/// ```
/// use u_forecast::forecast::{ForecastEngine, ForecastRequest};
/// use u_forecast::models::{Allocation, Feature, Team};
///
/// let request = ForecastRequest::new(
///     vec![Team::new("A", 10.0)],
///     vec![Feature::new("F1", 1), Feature::new("F2", 1)],
///     vec![Allocation::new("A", "F1", 15.0), Allocation::new("A", "F2", 5.0)],
/// );
///
/// let forecast = ForecastEngine::new().forecast_request(&request).unwrap();
/// assert_eq!(forecast.weeks_for("A", "F1"), vec![1, 2]);
/// assert_eq!(forecast.weeks_for("A", "F2"), vec![1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    options: ForecastOptions,
}

impl ForecastEngine {
    /// Creates an engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the run options.
    pub fn with_options(mut self, options: ForecastOptions) -> Self {
        self.options = options;
        self
    }

    /// Run options in effect.
    pub fn options(&self) -> &ForecastOptions {
        &self.options
    }

    /// Validates, groups, and forecasts a request.
    pub fn forecast_request(&self, request: &ForecastRequest) -> Result<Forecast> {
        validate_input(&request.teams, &request.features, &request.allocations)?;
        let tiers = group(
            &request.allocations,
            &request.features,
            self.options.priority_order,
        )?;
        let forecast = self.forecast(&tiers, &request.teams)?;

        info!(
            teams = request.teams.len(),
            features = request.features.len(),
            allocations = request.allocations.len(),
            tiers = tiers.len(),
            slots = forecast.len(),
            "forecast complete"
        );
        Ok(forecast)
    }

    /// Distributes each tier's effort across the team's weeks.
    ///
    /// # Errors
    /// - [`ForecastError::UnknownTeam`] if a tier's team is not in `teams`.
    /// - [`ForecastError::InvalidCapacity`] if that team's capacity is not
    ///   usable, or a tier's fair share is too small to reduce an effort.
    /// - [`ForecastError::NegativeEffort`] for negative or non-finite efforts.
    /// - [`ForecastError::InvalidOptions`] if `epsilon` is negative, not
    ///   finite, or not below a tier's smallest fair share.
    /// - [`ForecastError::WeekOverflow`] if a week number passes `u32::MAX`.
    pub fn forecast(
        &self,
        tiers: &[PriorityTier],
        teams: &HashMap<String, Team>,
    ) -> Result<Forecast> {
        let start_week = self.options.start_week;
        let epsilon = self.options.epsilon;
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(ForecastError::InvalidOptions(format!(
                "epsilon must be finite and not negative, got {epsilon}"
            )));
        }

        let mut forecast = Forecast::new();
        let mut last_team: Option<&str> = None;
        let mut last_week = start_week;

        for tier in tiers {
            let team_name = tier.key.team_name.as_str();
            let week_capacity = usable_capacity(teams, team_name)?;
            check_fair_share(tier, week_capacity, epsilon)?;

            let mut week = if last_team == Some(team_name) {
                last_week
            } else {
                last_team = Some(team_name);
                start_week
            };
            let first_week = week;

            let mut end_weeks: HashSet<u32> = HashSet::new();
            let mut active = tier.allocations.len();

            for allocation in &tier.allocations {
                check_efforts(allocation)?;
                let mut effort = allocation.efforts;

                while effort > epsilon {
                    let slot =
                        forecast.slot_or_insert(TeamWeek::new(team_name, week), week_capacity);

                    if end_weeks.contains(&week) && active > 1 {
                        active -= 1;
                    }

                    // Float residue left in a used week counts as exhausted
                    let can_consume = if slot.remaining_efforts <= epsilon {
                        0.0
                    } else {
                        (week_capacity / active as f64).min(slot.remaining_efforts)
                    };

                    if effort >= can_consume {
                        slot.consume(&allocation.feature_name, can_consume);
                        effort -= can_consume;
                        week = week
                            .checked_add(1)
                            .ok_or_else(|| ForecastError::WeekOverflow(team_name.to_string()))?;
                    } else {
                        slot.consume(&allocation.feature_name, effort);
                        effort = 0.0;
                    }
                }

                end_weeks.insert(week);
                last_week = week;
                week = start_week;
            }

            debug!(
                tier = %tier.key,
                features = tier.allocations.len(),
                first_week,
                last_week,
                "tier scheduled"
            );
        }

        Ok(forecast)
    }
}

fn usable_capacity(teams: &HashMap<String, Team>, team_name: &str) -> Result<f64> {
    let team = teams
        .get(team_name)
        .ok_or_else(|| ForecastError::UnknownTeam(team_name.to_string()))?;
    if !team.has_usable_capacity() {
        return Err(ForecastError::InvalidCapacity {
            team: team.name.clone(),
            capacity: team.week_capacity,
        });
    }
    Ok(team.week_capacity)
}

/// Every fresh week offers at least `week_capacity / tier size`; that share
/// must exceed `epsilon` and still reduce each allocation's effort.
fn check_fair_share(tier: &PriorityTier, week_capacity: f64, epsilon: f64) -> Result<()> {
    if tier.allocations.is_empty() {
        return Ok(());
    }
    let min_share = week_capacity / tier.allocations.len() as f64;
    if min_share <= epsilon {
        return Err(ForecastError::InvalidOptions(format!(
            "epsilon {epsilon} is not below the fair share {min_share} of tier {}",
            tier.key
        )));
    }
    for allocation in &tier.allocations {
        if allocation.efforts.is_finite() && allocation.efforts - min_share >= allocation.efforts
        {
            return Err(ForecastError::InvalidCapacity {
                team: tier.key.team_name.clone(),
                capacity: week_capacity,
            });
        }
    }
    Ok(())
}

fn check_efforts(allocation: &Allocation) -> Result<()> {
    if allocation.efforts.is_finite() && allocation.efforts >= 0.0 {
        Ok(())
    } else {
        Err(ForecastError::NegativeEffort {
            team: allocation.team_name.clone(),
            feature: allocation.feature_name.clone(),
            efforts: allocation.efforts,
        })
    }
}
