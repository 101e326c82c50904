//! Output formatting for the CLI.
//!
//! Listing formats stay fixed-width and plain so they can be piped; color
//! is layered on top and switched off wholesale with `--no-color` or the
//! config file.

use colored::Colorize;
use trackline_domain::Story;

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Bold emphasis for headings and prompts.
    pub fn bold(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Render a URL.
    pub fn link(&self, text: &str) -> String {
        if self.color_enabled {
            text.blue().underline().to_string()
        } else {
            text.to_string()
        }
    }

    /// One fixed-width line per story for the listing views.
    pub fn story_line(&self, story: &Story) -> String {
        format!(
            "{:<14}{:<4}{:<9}{:<13}{:<10} {}",
            format!("#{}", story.story_id),
            initials(&story.owned_by),
            story.story_type.to_string(),
            story.state.to_string(),
            estimate_visual(story.estimate),
            story.name
        )
    }

    /// Full detail view: header, URL, description, then child collections.
    pub fn story_details(&self, story: &Story) -> String {
        let mut out = String::new();

        out.push_str(&self.bold(&format!(
            "{:<12}{:<4}{:<9}{:<10} {}",
            format!("#{}", story.story_id),
            initials(&story.owned_by),
            story.story_type.to_string(),
            estimate_visual(story.estimate),
            story.name
        )));
        out.push('\n');

        out.push('\n');
        out.push_str(&format!("{} {}\n", self.bold("Story Url:"), self.link(&story.url)));
        out.push_str(&format!("{} {}\n", self.bold("Description:"), story.description));

        if !story.notes.is_empty() {
            out.push('\n');
            out.push_str(&self.bold("Notes:"));
            out.push('\n');
            for note in &story.notes {
                out.push_str(&format!("[{}] {}\n", initials(&note.author), note.text));
            }
        }

        if !story.tasks.is_empty() {
            out.push('\n');
            out.push_str(&self.bold("Tasks:"));
            out.push('\n');
            for task in &story.tasks {
                out.push_str(&format!(
                    "[{}] {}\n",
                    completed_mark(task.complete),
                    task.description
                ));
            }
        }

        if !story.attachments.is_empty() {
            out.push('\n');
            out.push_str(&self.bold("Attachments:"));
            out.push('\n');
            for attachment in &story.attachments {
                out.push_str(&format!(
                    "{} {}\n",
                    attachment.description,
                    self.link(&attachment.url)
                ));
            }
        }

        if !story.labels.is_empty() {
            out.push('\n');
            out.push_str(&format!(
                "{} {}\n",
                self.bold("Labels:"),
                story.labels.join(", ")
            ));
        }

        out
    }
}

/// Initials of a full name ("Ada Lovelace" -> "AL"), empty for unowned.
pub fn initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

/// Star-bar rendering of an estimate, fixed to an 8-column box.
pub fn estimate_visual(estimate: Option<i64>) -> String {
    let stars = match estimate {
        Some(points) if points > 0 => "*".repeat(points as usize),
        _ => String::new(),
    };
    format!("[{:<8}]", stars)
}

/// Checkbox mark for a task.
pub fn completed_mark(complete: bool) -> char {
    if complete {
        'X'
    } else {
        ' '
    }
}
