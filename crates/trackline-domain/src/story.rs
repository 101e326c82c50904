//! Story module - the unit of work tracked by the remote service
//!
//! A story owns its notes, tasks, and attachments exclusively; the child
//! collections have no lifecycle of their own. Everything here is a snapshot
//! built from one response node - mutations go through the SDK and never
//! patch these values in place.

use crate::parse::{parse_array, parse_bool, parse_int, parse_text, ParseError};
use crate::state::StoryState;
use crate::story_type::StoryType;
use serde_json::Value;

/// Sentinel estimate meaning "not yet estimated"
pub const UNESTIMATED: i64 = -1;

/// A comment on a story
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Identifier assigned by the remote service
    pub note_id: i64,
    /// Comment text
    pub text: String,
    /// Display name of the comment's author
    pub author: String,
}

impl Note {
    fn from_json(node: &Value) -> Result<Self, ParseError> {
        let note_id =
            parse_int(node, "id")?.ok_or_else(|| ParseError::MissingField("id".to_string()))?;
        Ok(Note {
            note_id,
            text: parse_text(node, "text"),
            author: parse_text(node, "author"),
        })
    }
}

/// A sub-checklist item within a story
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Identifier assigned by the remote service
    pub task_id: i64,
    /// What the task is
    pub description: String,
    /// Whether the task has been checked off
    pub complete: bool,
}

impl Task {
    fn from_json(node: &Value) -> Result<Self, ParseError> {
        let task_id =
            parse_int(node, "id")?.ok_or_else(|| ParseError::MissingField("id".to_string()))?;
        Ok(Task {
            task_id,
            description: parse_text(node, "description"),
            complete: parse_bool(node, "complete")?.unwrap_or(false),
        })
    }
}

/// A file attached to a story
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Identifier assigned by the remote service
    pub attachment_id: i64,
    /// Caption; the wire carries it under `text`
    pub description: String,
    /// Download URL
    pub url: String,
}

impl Attachment {
    fn from_json(node: &Value) -> Result<Self, ParseError> {
        let attachment_id =
            parse_int(node, "id")?.ok_or_else(|| ParseError::MissingField("id".to_string()))?;
        Ok(Attachment {
            attachment_id,
            description: parse_text(node, "text"),
            url: parse_text(node, "url"),
        })
    }
}

/// A unit of work tracked by the remote service
///
/// `story_id` and `project_id` are set together at construction and never
/// change. `estimate` is `None` when the type carries no estimate (bugs,
/// chores) and [`UNESTIMATED`] when a feature has not been sized yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    /// Identifier assigned by the remote service
    pub story_id: i64,
    /// Owning project, by ID only
    pub project_id: i64,
    /// Title
    pub name: String,
    /// Long-form description
    pub description: String,
    /// Display name of the current owner, empty if unowned
    pub owned_by: String,
    /// Kind of work
    pub story_type: StoryType,
    /// Point value, `Some(UNESTIMATED)` if not yet sized, `None` if absent
    pub estimate: Option<i64>,
    /// Workflow state
    pub state: StoryState,
    /// Web URL of the story
    pub url: String,
    /// Labels in wire order
    pub labels: Vec<String>,
    /// Comments, oldest first
    pub notes: Vec<Note>,
    /// Checklist items
    pub tasks: Vec<Task>,
    /// Attached files
    pub attachments: Vec<Attachment>,
}

impl Story {
    /// Build a story from a parsed JSON node, including child collections.
    /// Pure; no network access.
    ///
    /// The `notes`, `tasks`, and `attachments` sub-arrays default to empty
    /// collections when absent.
    pub fn from_json(node: &Value) -> Result<Self, ParseError> {
        let story_id =
            parse_int(node, "id")?.ok_or_else(|| ParseError::MissingField("id".to_string()))?;
        let project_id = parse_int(node, "project_id")?
            .ok_or_else(|| ParseError::MissingField("project_id".to_string()))?;

        let type_text = parse_text(node, "story_type");
        let story_type = StoryType::parse(&type_text).ok_or_else(|| ParseError::InvalidValue {
            key: "story_type".to_string(),
            value: type_text.clone(),
        })?;

        let state_text = parse_text(node, "current_state");
        let state = StoryState::parse(&state_text).ok_or_else(|| ParseError::InvalidValue {
            key: "current_state".to_string(),
            value: state_text.clone(),
        })?;

        let mut notes = Vec::new();
        if let Some(nodes) = parse_array(node, "notes") {
            for note_node in nodes {
                notes.push(Note::from_json(note_node)?);
            }
        }

        let mut tasks = Vec::new();
        if let Some(nodes) = parse_array(node, "tasks") {
            for task_node in nodes {
                tasks.push(Task::from_json(task_node)?);
            }
        }

        let mut attachments = Vec::new();
        if let Some(nodes) = parse_array(node, "attachments") {
            for attachment_node in nodes {
                attachments.push(Attachment::from_json(attachment_node)?);
            }
        }

        Ok(Story {
            story_id,
            project_id,
            name: parse_text(node, "name"),
            description: parse_text(node, "description"),
            owned_by: parse_text(node, "owned_by"),
            story_type,
            estimate: parse_int(node, "estimate")?,
            state,
            url: parse_text(node, "url"),
            labels: parse_labels(node)?,
            notes,
            tasks,
            attachments,
        })
    }

    /// The first label, if any. Used for grouping.
    pub fn first_label(&self) -> Option<&str> {
        self.labels.first().map(|s| s.as_str())
    }

    /// Whether the story still carries the [`UNESTIMATED`] sentinel
    pub fn is_unestimated(&self) -> bool {
        self.estimate == Some(UNESTIMATED)
    }
}

// The v5 schema sends labels as objects carrying a `name` key; older
// fixtures use bare strings. Both normalize to the label text.
fn parse_labels(node: &Value) -> Result<Vec<String>, ParseError> {
    let Some(values) = parse_array(node, "labels") else {
        return Ok(Vec::new());
    };

    values
        .iter()
        .map(|value| match value {
            Value::String(s) => Ok(s.trim().to_string()),
            Value::Object(_) => {
                let name = parse_text(value, "name");
                if name.is_empty() {
                    Err(ParseError::invalid("labels", value))
                } else {
                    Ok(name)
                }
            }
            other => Err(ParseError::invalid("labels", other)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn story_node() -> Value {
        json!({
            "id": 1001,
            "project_id": 99,
            "name": "Checkout flow",
            "description": "As a user I want to pay",
            "owned_by": "Ada Lovelace",
            "story_type": "feature",
            "current_state": "started",
            "estimate": 3,
            "url": "https://tracker.example/story/show/1001",
            "labels": [{"name": "payments"}, {"name": "q3"}],
            "notes": [
                {"id": 1, "text": "looks good", "author": "Grace Hopper"}
            ],
            "tasks": [
                {"id": 7, "description": "write tests", "complete": false},
                {"id": 8, "description": "ship it", "complete": true}
            ],
            "attachments": [
                {"id": 4, "text": "mockup", "url": "https://tracker.example/file/4"}
            ]
        })
    }

    #[test]
    fn test_story_from_json_roundtrip() {
        let node = story_node();
        let story = Story::from_json(&node).unwrap();

        assert_eq!(story.story_id, 1001);
        assert_eq!(story.project_id, 99);
        assert_eq!(story.name, "Checkout flow");
        assert_eq!(story.description, "As a user I want to pay");
        assert_eq!(story.owned_by, "Ada Lovelace");
        assert_eq!(story.story_type, StoryType::Feature);
        assert_eq!(story.state, StoryState::Started);
        assert_eq!(story.estimate, Some(3));
        assert_eq!(story.url, "https://tracker.example/story/show/1001");
        assert_eq!(story.labels, vec!["payments", "q3"]);
    }

    #[test]
    fn test_story_children() {
        let story = Story::from_json(&story_node()).unwrap();

        assert_eq!(story.notes.len(), 1);
        assert_eq!(story.notes[0].author, "Grace Hopper");

        assert_eq!(story.tasks.len(), 2);
        assert!(!story.tasks[0].complete);
        assert!(story.tasks[1].complete);

        assert_eq!(story.attachments.len(), 1);
        assert_eq!(story.attachments[0].description, "mockup");
    }

    #[test]
    fn test_story_children_default_empty() {
        let node = json!({
            "id": 1,
            "project_id": 2,
            "story_type": "bug",
            "current_state": "unstarted"
        });
        let story = Story::from_json(&node).unwrap();
        assert!(story.notes.is_empty());
        assert!(story.tasks.is_empty());
        assert!(story.attachments.is_empty());
        assert!(story.labels.is_empty());
        assert_eq!(story.estimate, None);
    }

    #[test]
    fn test_first_label() {
        let story = Story::from_json(&story_node()).unwrap();
        assert_eq!(story.first_label(), Some("payments"));

        let node = json!({
            "id": 1,
            "project_id": 2,
            "story_type": "chore",
            "current_state": "unscheduled"
        });
        let bare = Story::from_json(&node).unwrap();
        assert_eq!(bare.first_label(), None);
    }

    #[test]
    fn test_labels_bare_string_form() {
        let node = json!({
            "id": 1,
            "project_id": 2,
            "story_type": "feature",
            "current_state": "unstarted",
            "labels": ["alpha", "beta"]
        });
        let story = Story::from_json(&node).unwrap();
        assert_eq!(story.labels, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_unestimated_sentinel() {
        let node = json!({
            "id": 1,
            "project_id": 2,
            "story_type": "feature",
            "current_state": "unstarted",
            "estimate": -1
        });
        let story = Story::from_json(&node).unwrap();
        assert!(story.is_unestimated());
        assert_eq!(story.estimate, Some(UNESTIMATED));
    }

    #[test]
    fn test_unknown_state_rejected() {
        let node = json!({
            "id": 1,
            "project_id": 2,
            "story_type": "feature",
            "current_state": "done"
        });
        assert!(matches!(
            Story::from_json(&node),
            Err(ParseError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_missing_id_rejected() {
        let node = json!({
            "project_id": 2,
            "story_type": "feature",
            "current_state": "unstarted"
        });
        assert_eq!(
            Story::from_json(&node),
            Err(ParseError::MissingField("id".to_string()))
        );
    }
}
