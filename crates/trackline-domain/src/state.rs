//! Story state - workflow stages for stories
//!
//! Stories progress unscheduled/unstarted → started → {finished, rejected}
//! → delivered → {accepted, rejected}. The remote service is the source of
//! truth for transition legality; this client only enforces the estimate
//! precondition on start/finish/deliver.

use serde::Serialize;

/// Workflow state of a story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryState {
    /// In the icebox, not yet scheduled
    Unscheduled,
    /// Scheduled but not begun
    Unstarted,
    /// In progress
    Started,
    /// Work complete, not yet delivered
    Finished,
    /// Delivered for review
    Delivered,
    /// Accepted by the reviewer
    Accepted,
    /// Rejected by the reviewer
    Rejected,
}

impl StoryState {
    /// Get the state name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryState::Unscheduled => "unscheduled",
            StoryState::Unstarted => "unstarted",
            StoryState::Started => "started",
            StoryState::Finished => "finished",
            StoryState::Delivered => "delivered",
            StoryState::Accepted => "accepted",
            StoryState::Rejected => "rejected",
        }
    }

    /// Parse a state from its wire form
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unscheduled" => Some(StoryState::Unscheduled),
            "unstarted" => Some(StoryState::Unstarted),
            "started" => Some(StoryState::Started),
            "finished" => Some(StoryState::Finished),
            "delivered" => Some(StoryState::Delivered),
            "accepted" => Some(StoryState::Accepted),
            "rejected" => Some(StoryState::Rejected),
            _ => None,
        }
    }
}

impl std::str::FromStr for StoryState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid story state: {}", s))
    }
}

impl std::fmt::Display for StoryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
