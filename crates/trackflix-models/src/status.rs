use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle stage of a catalog entry.
///
/// For series the status is derived from episodic progress; for movies it is
/// set explicitly or by marking the movie watched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
    /// Want to watch, not started
    #[default]
    Planned,
    /// Started but not finished
    Watching,
    /// Finished
    Completed,
}

impl WatchStatus {
    pub const ALL: [WatchStatus; 3] = [WatchStatus::Planned, WatchStatus::Watching, WatchStatus::Completed];

    /// Value stored in the data file.
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::Planned => "planned",
            WatchStatus::Watching => "watching",
            WatchStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WatchStatus::Planned => "Planned",
            WatchStatus::Watching => "Watching",
            WatchStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown watch status: '{0}' (expected planned, watching or completed)")]
pub struct ParseStatusError(pub String);

impl FromStr for WatchStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Older data files stored the Portuguese display labels
        match s.trim().to_lowercase().as_str() {
            "planned" | "plan" | "plantowatch" | "planejado" => Ok(WatchStatus::Planned),
            "watching" | "assistindo" => Ok(WatchStatus::Watching),
            "completed" | "done" | "concluído" | "concluido" => Ok(WatchStatus::Completed),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}
