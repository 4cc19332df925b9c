//! Pivot report rows.
//!
//! One row per fragment, in forecast emission order (slot first-touch
//! order, then consumption order within the slot).

use serde::Serialize;
use std::collections::HashMap;

use crate::error::{ForecastError, Result};
use crate::models::{Feature, Forecast};

/// Column headers of the pivot sheet.
pub const PIVOT_HEADERS: [&str; 5] = ["Feature", "Rank", "Week", "Week Capacity", "Team"];

/// A single (team, week, feature) fragment ready for a pivot table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    /// Feature name.
    #[serde(rename = "Feature")]
    pub feature: String,
    /// Feature priority.
    #[serde(rename = "Rank")]
    pub rank: i64,
    /// Week label, e.g. `"Week 2"`.
    #[serde(rename = "Week")]
    pub week: String,
    /// Effort spent on the feature that week.
    #[serde(rename = "Week Capacity")]
    pub effort: f64,
    /// Team name.
    #[serde(rename = "Team")]
    pub team: String,
}

/// Flattens a forecast into pivot rows.
///
/// # Errors
/// [`ForecastError::UnknownFeature`] if a fragment's feature is not in
/// `features`.
pub fn pivot_rows(
    forecast: &Forecast,
    features: &HashMap<String, Feature>,
) -> Result<Vec<PivotRow>> {
    forecast
        .fragments()
        .map(|(team_week, fragment)| -> Result<PivotRow> {
            let feature = features.get(&fragment.feature_name).ok_or_else(|| {
                ForecastError::UnknownFeature {
                    team: team_week.team_name.clone(),
                    feature: fragment.feature_name.clone(),
                }
            })?;
            Ok(PivotRow {
                feature: fragment.feature_name.clone(),
                rank: feature.priority,
                week: team_week.week_label(),
                effort: fragment.efforts,
                team: team_week.team_name.clone(),
            })
        })
        .collect()
}

/// Renders pivot rows as a pretty-printed JSON array.
pub fn to_json(rows: &[PivotRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamWeek;

    fn features() -> HashMap<String, Feature> {
        [Feature::new("F1", 1), Feature::new("F2", 3)]
            .into_iter()
            .map(|f| (f.name.clone(), f))
            .collect()
    }

    #[test]
    fn test_rows_follow_emission_order() {
        let mut f = Forecast::new();
        f.slot_or_insert(TeamWeek::new("B", 1), 8.0).consume("F2", 8.0);
        f.slot_or_insert(TeamWeek::new("A", 1), 10.0).consume("F1", 4.0);
        f.slot_or_insert(TeamWeek::new("A", 1), 10.0).consume("F2", 6.0);

        let rows = pivot_rows(&f, &features()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            PivotRow {
                feature: "F2".into(),
                rank: 3,
                week: "Week 1".into(),
                effort: 8.0,
                team: "B".into(),
            }
        );
        assert_eq!(rows[1].feature, "F1");
        assert_eq!(rows[2].team, "A");
    }

    #[test]
    fn test_unknown_feature() {
        let mut f = Forecast::new();
        f.slot_or_insert(TeamWeek::new("A", 1), 10.0).consume("Ghost", 1.0);
        let err = pivot_rows(&f, &features()).unwrap_err();
        assert!(matches!(err, ForecastError::UnknownFeature { .. }));
    }

    #[test]
    fn test_json_uses_sheet_headers() {
        let rows = vec![PivotRow {
            feature: "F1".into(),
            rank: 1,
            week: "Week 2".into(),
            effort: 2.5,
            team: "A".into(),
        }];
        let json = to_json(&rows).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for header in PIVOT_HEADERS {
            assert!(value[0].get(header).is_some(), "missing {header}");
        }
        assert_eq!(value[0]["Week"], "Week 2");
    }
}
