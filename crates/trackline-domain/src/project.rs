//! Project module - a container of stories with an estimation point scale

use crate::parse::{parse_int, parse_text, ParseError};
use serde_json::Value;

/// A project visible to the authenticated account
///
/// Projects are immutable snapshots: they are re-fetched, never mutated in
/// place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Identifier assigned by the remote service
    pub project_id: i64,

    /// Display name
    pub name: String,

    /// Ordered set of allowed estimate values (e.g. a Fibonacci-like scale)
    pub point_scale: Vec<String>,
}

impl Project {
    /// Build a project from a parsed JSON node. Pure; no network access.
    ///
    /// The wire delivers `point_scale` as a comma-separated string
    /// ("0,1,2,3"); a JSON array of values is also accepted. Both normalize
    /// to the same ordered sequence.
    pub fn from_json(node: &Value) -> Result<Self, ParseError> {
        let project_id =
            parse_int(node, "id")?.ok_or_else(|| ParseError::MissingField("id".to_string()))?;
        let name = parse_text(node, "name");
        let point_scale = parse_point_scale(node)?;

        Ok(Project {
            project_id,
            name,
            point_scale,
        })
    }
}

fn parse_point_scale(node: &Value) -> Result<Vec<String>, ParseError> {
    match node.get("point_scale") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(s
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()),
        Some(Value::Array(values)) => values
            .iter()
            .map(|v| match v {
                Value::String(s) => Ok(s.trim().to_string()),
                Value::Number(n) => Ok(n.to_string()),
                other => Err(ParseError::invalid("point_scale", other)),
            })
            .collect(),
        Some(other) => Err(ParseError::invalid("point_scale", other)),
    }
}
