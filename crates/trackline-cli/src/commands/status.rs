//! Workflow transition commands (start/finish/deliver/accept/reject).

use crate::error::{CliError, Result};
use trackline_sdk::TrackerClient;

/// Which transition to apply
#[derive(Debug, Clone, Copy)]
pub enum Transition {
    /// Move to started
    Start,
    /// Move to finished
    Finish,
    /// Move to delivered
    Deliver,
    /// Move to accepted
    Accept,
    /// Move to rejected
    Reject,
}

impl Transition {
    fn past_tense(&self) -> &'static str {
        match self {
            Transition::Start => "STARTED",
            Transition::Finish => "FINISHED",
            Transition::Deliver => "DELIVERED",
            Transition::Accept => "ACCEPTED",
            Transition::Reject => "REJECTED",
        }
    }
}

/// Execute a workflow transition against a story found by ID.
pub fn execute_transition(
    transition: Transition,
    story_id: i64,
    project_index: Option<usize>,
    client: &TrackerClient,
) -> Result<()> {
    let story = client
        .find_story(story_id, project_index.map(|i| i.wrapping_sub(1)))?
        .ok_or(CliError::StoryNotFound(story_id))?;

    match transition {
        Transition::Start => client.start(&story)?,
        Transition::Finish => client.finish(&story)?,
        Transition::Deliver => client.deliver(&story)?,
        Transition::Accept => client.accept(&story)?,
        Transition::Reject => client.reject(&story)?,
    };

    println!(
        "Story: [{}] {} is {}",
        story.story_id,
        story.name,
        transition.past_tense()
    );

    Ok(())
}
