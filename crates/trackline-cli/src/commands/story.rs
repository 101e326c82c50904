//! Single-story detail command.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use trackline_sdk::TrackerClient;

/// Execute the story command: find the story across projects and print its
/// details.
pub fn execute_story(
    story_id: i64,
    project_index: Option<usize>,
    client: &TrackerClient,
    formatter: &Formatter,
) -> Result<()> {
    let story = client
        .find_story(story_id, project_index.map(|i| i.wrapping_sub(1)))?
        .ok_or(CliError::StoryNotFound(story_id))?;

    println!();
    print!("{}", formatter.story_details(&story));
    println!();

    Ok(())
}
