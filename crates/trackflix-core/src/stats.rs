use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use trackflix_models::WatchStatus;

/// Completion goals, checked from the highest tier down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalTier {
    Gold,
    Silver,
    Bronze,
}

impl GoalTier {
    pub const ALL: [GoalTier; 3] = [GoalTier::Gold, GoalTier::Silver, GoalTier::Bronze];

    /// Minimum completion rate, in percent.
    pub fn threshold(&self) -> f64 {
        match self {
            GoalTier::Gold => 70.0,
            GoalTier::Silver => 50.0,
            GoalTier::Bronze => 30.0,
        }
    }

    pub fn for_rate(rate: f64) -> Option<GoalTier> {
        Self::ALL.into_iter().find(|tier| rate >= tier.threshold())
    }
}

impl fmt::Display for GoalTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GoalTier::Gold => "Gold",
            GoalTier::Silver => "Silver",
            GoalTier::Bronze => "Bronze",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub movies: u64,
    pub series: u64,
    pub total: u64,
    pub completed: u64,
    pub watching: u64,
    pub planned: u64,
}

impl Statistics {
    pub fn from_counts(movies: u64, series: u64, by_status: &BTreeMap<WatchStatus, u64>) -> Self {
        let count = |status: WatchStatus| by_status.get(&status).copied().unwrap_or(0);
        Self {
            movies,
            series,
            total: movies + series,
            completed: count(WatchStatus::Completed),
            watching: count(WatchStatus::Watching),
            planned: count(WatchStatus::Planned),
        }
    }

    /// Percentage of entries completed; `None` for an empty catalog.
    pub fn completion_rate(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.completed as f64 / self.total as f64 * 100.0)
    }

    pub fn goal_tier(&self) -> Option<GoalTier> {
        self.completion_rate().and_then(GoalTier::for_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(planned: u64, watching: u64, completed: u64) -> BTreeMap<WatchStatus, u64> {
        BTreeMap::from([
            (WatchStatus::Planned, planned),
            (WatchStatus::Watching, watching),
            (WatchStatus::Completed, completed),
        ])
    }

    #[test]
    fn test_from_counts() {
        let stats = Statistics::from_counts(3, 2, &counts(1, 1, 3));
        assert_eq!(stats.total, 5);
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.completion_rate(), Some(60.0));
        assert_eq!(stats.goal_tier(), Some(GoalTier::Silver));
    }

    #[test]
    fn test_empty_catalog() {
        let stats = Statistics::from_counts(0, 0, &BTreeMap::new());
        assert_eq!(stats.completion_rate(), None);
        assert_eq!(stats.goal_tier(), None);
    }

    #[test]
    fn test_goal_tiers() {
        assert_eq!(GoalTier::for_rate(100.0), Some(GoalTier::Gold));
        assert_eq!(GoalTier::for_rate(70.0), Some(GoalTier::Gold));
        assert_eq!(GoalTier::for_rate(69.9), Some(GoalTier::Silver));
        assert_eq!(GoalTier::for_rate(30.0), Some(GoalTier::Bronze));
        assert_eq!(GoalTier::for_rate(29.9), None);
    }
}
