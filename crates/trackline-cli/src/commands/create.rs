//! Story creation command.

use crate::cli::CreateArgs;
use crate::error::Result;
use trackline_domain::{Project, StoryType};
use trackline_sdk::{NewStory, TrackerClient};

/// Execute the create command.
pub fn execute_create(
    args: &CreateArgs,
    project: &Project,
    client: &TrackerClient,
) -> Result<()> {
    let story_type: StoryType = args.story_type.into();

    let mut new_story = NewStory::new(args.title.clone()).with_story_type(story_type);
    if let Some(description) = &args.description {
        new_story = new_story.with_description(description.clone());
    }

    client.create_story(project, &new_story)?;

    println!("Created {} in {}: {}", story_type, project.name, args.title);
    Ok(())
}
