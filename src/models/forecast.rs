//! Forecast (solution) model.
//!
//! A forecast maps every (team, week) slot the engine touched to the
//! effort fragments consumed in it and the capacity left over. Slots are
//! kept in first-touch order, which is also the report order.

use serde::Serialize;
use std::collections::HashMap;

use super::{Fragment, TeamWeek};

/// The work consumed in one (team, week) slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyAllocation {
    /// Slot key.
    pub team_week: TeamWeek,
    /// Fragments in consumption order.
    pub fragments: Vec<Fragment>,
    /// Capacity not yet consumed in this slot.
    pub remaining_efforts: f64,
}

impl WeeklyAllocation {
    /// Creates an empty slot with the team's full weekly capacity.
    pub fn new(team_week: TeamWeek, week_capacity: f64) -> Self {
        Self {
            team_week,
            fragments: Vec::new(),
            remaining_efforts: week_capacity,
        }
    }

    /// Consumes `efforts` from the slot on behalf of `feature_name`.
    ///
    /// Zero-size consumption leaves no fragment behind.
    pub fn consume(&mut self, feature_name: &str, efforts: f64) {
        if efforts <= 0.0 {
            return;
        }
        self.remaining_efforts -= efforts;
        self.fragments.push(Fragment::new(feature_name, efforts));
    }

    /// Total effort consumed in this slot.
    pub fn allocated_efforts(&self) -> f64 {
        self.fragments.iter().map(|f| f.efforts).sum()
    }

    /// Effort this slot spent on a given feature.
    pub fn efforts_for(&self, feature_name: &str) -> f64 {
        self.fragments
            .iter()
            .filter(|f| f.feature_name == feature_name)
            .map(|f| f.efforts)
            .sum()
    }
}

/// A complete forecast: (team, week) → [`WeeklyAllocation`], insertion-ordered.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Forecast {
    slots: Vec<WeeklyAllocation>,
    #[serde(skip)]
    index: HashMap<TeamWeek, usize>,
}

impl Forecast {
    /// Creates an empty forecast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slot for `team_week`, creating it with full capacity
    /// the first time it is touched.
    pub fn slot_or_insert(
        &mut self,
        team_week: TeamWeek,
        week_capacity: f64,
    ) -> &mut WeeklyAllocation {
        let idx = match self.index.get(&team_week) {
            Some(&idx) => idx,
            None => {
                let idx = self.slots.len();
                self.index.insert(team_week.clone(), idx);
                self.slots.push(WeeklyAllocation::new(team_week, week_capacity));
                idx
            }
        };
        &mut self.slots[idx]
    }

    /// Looks up a slot.
    pub fn get(&self, team_week: &TeamWeek) -> Option<&WeeklyAllocation> {
        self.index.get(team_week).map(|&idx| &self.slots[idx])
    }

    /// Looks up a slot by team and week.
    pub fn slot(&self, team_name: &str, week: u32) -> Option<&WeeklyAllocation> {
        self.get(&TeamWeek::new(team_name, week))
    }

    /// Slots in first-touch order.
    pub fn iter(&self) -> impl Iterator<Item = &WeeklyAllocation> {
        self.slots.iter()
    }

    /// Every fragment with its slot key, in emission order.
    pub fn fragments(&self) -> impl Iterator<Item = (&TeamWeek, &Fragment)> {
        self.slots
            .iter()
            .flat_map(|s| s.fragments.iter().map(move |f| (&s.team_week, f)))
    }

    /// Number of slots touched.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot was touched.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total effort scheduled for a (team, feature) pair.
    pub fn efforts_for(&self, team_name: &str, feature_name: &str) -> f64 {
        self.slots
            .iter()
            .filter(|s| s.team_week.team_name == team_name)
            .map(|s| s.efforts_for(feature_name))
            .sum()
    }

    /// Sorted weeks in which a (team, feature) pair received effort.
    pub fn weeks_for(&self, team_name: &str, feature_name: &str) -> Vec<u32> {
        let mut weeks: Vec<u32> = self
            .slots
            .iter()
            .filter(|s| {
                s.team_week.team_name == team_name
                    && s.fragments.iter().any(|f| f.feature_name == feature_name)
            })
            .map(|s| s.team_week.week)
            .collect();
        weeks.sort_unstable();
        weeks
    }

    /// All slots belonging to a team, sorted by week.
    pub fn slots_for_team(&self, team_name: &str) -> Vec<&WeeklyAllocation> {
        let mut slots: Vec<&WeeklyAllocation> = self
            .slots
            .iter()
            .filter(|s| s.team_week.team_name == team_name)
            .collect();
        slots.sort_by_key(|s| s.team_week.week);
        slots
    }

    /// Latest week touched for a team.
    pub fn last_week(&self, team_name: &str) -> Option<u32> {
        self.slots
            .iter()
            .filter(|s| s.team_week.team_name == team_name)
            .map(|s| s.team_week.week)
            .max()
    }

    /// Number of fragments across all slots.
    pub fn fragment_count(&self) -> usize {
        self.slots.iter().map(|s| s.fragments.len()).sum()
    }
}
