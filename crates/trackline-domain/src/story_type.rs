//! Story type - the kind of work a story tracks

use serde::Serialize;

/// Kind of work a story tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryType {
    /// New functionality; estimated against the project's point scale
    Feature,
    /// Defect; carries no estimate
    Bug,
    /// Maintenance work; carries no estimate
    Chore,
    /// Release marker
    Release,
}

impl StoryType {
    /// Get the type name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryType::Feature => "feature",
            StoryType::Bug => "bug",
            StoryType::Chore => "chore",
            StoryType::Release => "release",
        }
    }

    /// Parse a story type from its wire form
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "feature" => Some(StoryType::Feature),
            "bug" => Some(StoryType::Bug),
            "chore" => Some(StoryType::Chore),
            "release" => Some(StoryType::Release),
            _ => None,
        }
    }
}

impl std::str::FromStr for StoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid story type: {}", s))
    }
}

impl std::fmt::Display for StoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_type_roundtrip() {
        for ty in [
            StoryType::Feature,
            StoryType::Bug,
            StoryType::Chore,
            StoryType::Release,
        ] {
            assert_eq!(StoryType::parse(ty.as_str()), Some(ty));
        }
    }

    #[test]
    fn test_story_type_invalid() {
        assert_eq!(StoryType::parse("epic"), None);
        assert!("".parse::<StoryType>().is_err());
    }

    #[test]
    fn test_story_type_serializes_to_wire_form() {
        let json = serde_json::to_string(&StoryType::Bug).unwrap();
        assert_eq!(json, "\"bug\"");
    }
}
