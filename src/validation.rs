//! Input validation for forecast runs.
//!
//! Checks the loaded tables for inconsistencies that would otherwise make
//! the forecast fail midway or never terminate. Detects:
//! - Allocations naming a feature that was not loaded
//! - Allocations naming a team that was not loaded
//! - Planned teams whose weekly capacity is too small, negative, or not finite
//! - Negative or non-finite efforts
//!
//! Teams with no planned work are not checked for capacity.

use std::collections::{HashMap, HashSet};

use crate::error::ForecastError;
use crate::models::{Allocation, Feature, Team};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Team the problem belongs to.
    pub team: String,
    /// Feature involved, if any.
    pub feature: Option<String>,
    /// Offending numeric value, if any.
    pub value: Option<f64>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// An allocation references a feature that doesn't exist.
    UnknownFeature,
    /// An allocation references a team that doesn't exist.
    UnknownTeam,
    /// A planned team cannot make progress with its capacity.
    InvalidCapacity,
    /// An allocation's effort is negative or not finite.
    NegativeEffort,
}

impl ValidationError {
    fn unknown_feature(allocation: &Allocation) -> Self {
        Self {
            kind: ValidationErrorKind::UnknownFeature,
            team: allocation.team_name.clone(),
            feature: Some(allocation.feature_name.clone()),
            value: None,
            message: format!(
                "Team '{}' plans unknown feature '{}'",
                allocation.team_name, allocation.feature_name
            ),
        }
    }

    fn unknown_team(allocation: &Allocation) -> Self {
        Self {
            kind: ValidationErrorKind::UnknownTeam,
            team: allocation.team_name.clone(),
            feature: Some(allocation.feature_name.clone()),
            value: None,
            message: format!(
                "Feature '{}' is planned for unknown team '{}'",
                allocation.feature_name, allocation.team_name
            ),
        }
    }

    fn invalid_capacity(team: &Team) -> Self {
        Self {
            kind: ValidationErrorKind::InvalidCapacity,
            team: team.name.clone(),
            feature: None,
            value: Some(team.week_capacity),
            message: format!(
                "Team '{}' has unusable week capacity {}",
                team.name, team.week_capacity
            ),
        }
    }

    fn negative_effort(allocation: &Allocation) -> Self {
        Self {
            kind: ValidationErrorKind::NegativeEffort,
            team: allocation.team_name.clone(),
            feature: Some(allocation.feature_name.clone()),
            value: Some(allocation.efforts),
            message: format!(
                "Team '{}' has invalid effort {} for feature '{}'",
                allocation.team_name, allocation.efforts, allocation.feature_name
            ),
        }
    }
}

impl From<ValidationError> for ForecastError {
    fn from(e: ValidationError) -> Self {
        let feature = e.feature.unwrap_or_default();
        let value = e.value.unwrap_or(f64::NAN);
        match e.kind {
            ValidationErrorKind::UnknownFeature => ForecastError::UnknownFeature {
                team: e.team,
                feature,
            },
            ValidationErrorKind::UnknownTeam => ForecastError::UnknownTeam(e.team),
            ValidationErrorKind::InvalidCapacity => ForecastError::InvalidCapacity {
                team: e.team,
                capacity: value,
            },
            ValidationErrorKind::NegativeEffort => ForecastError::NegativeEffort {
                team: e.team,
                feature,
                efforts: value,
            },
        }
    }
}

impl From<Vec<ValidationError>> for ForecastError {
    /// A single problem keeps its specific variant; several are reported together.
    fn from(mut errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            return errors.remove(0).into();
        }
        ForecastError::Invalid(errors.into_iter().map(|e| e.message).collect())
    }
}

/// Validates the loaded tables before forecasting.
///
/// Checks:
/// 1. Every allocation's feature exists
/// 2. Every allocation's team exists
/// 3. Every team with allocations has finite weekly capacity above
///    [`Team::MIN_WEEK_CAPACITY`]
/// 4. Every allocation's effort is finite and not negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    teams: &HashMap<String, Team>,
    features: &HashMap<String, Feature>,
    allocations: &[Allocation],
) -> ValidationResult {
    let mut errors = Vec::new();
    let mut checked_teams: HashSet<&str> = HashSet::new();

    for allocation in allocations {
        if !features.contains_key(&allocation.feature_name) {
            errors.push(ValidationError::unknown_feature(allocation));
        }

        match teams.get(&allocation.team_name) {
            None => errors.push(ValidationError::unknown_team(allocation)),
            Some(team) => {
                if checked_teams.insert(team.name.as_str()) && !team.has_usable_capacity() {
                    errors.push(ValidationError::invalid_capacity(team));
                }
            }
        }

        if !allocation.efforts.is_finite() || allocation.efforts < 0.0 {
            errors.push(ValidationError::negative_effort(allocation));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
