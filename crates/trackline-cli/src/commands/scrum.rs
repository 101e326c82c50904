//! Scrum command - visual aid for the daily standup.

use crate::error::Result;
use crate::output::{estimate_visual, initials, Formatter};
use trackline_domain::{Project, Story};
use trackline_sdk::TrackerClient;

/// Execute the scrum command: in-progress stories grouped by owner, then
/// open bugs.
pub fn execute_scrum(
    project: &Project,
    client: &TrackerClient,
    formatter: &Formatter,
) -> Result<()> {
    let stories = client.in_progress_stories(project)?;

    println!("{}", formatter.bold(&format!("{} SCRUM", project.name)));
    println!();

    for (owner, stories) in group_by_owner(stories) {
        println!("{}", formatter.bold(&owner));
        for story in stories {
            println!(
                "   {:<12}{:<9} {:<7} {}",
                format!("#{}", story.story_id),
                estimate_visual(story.estimate),
                story.story_type.to_string(),
                story.name
            );
        }
        println!();
    }

    println!("{}", formatter.bold("Bugs"));
    let bugs = client.open_bugs(project)?;
    if bugs.is_empty() {
        println!("Not sure that I believe it, but there are no bugs");
    }
    for bug in bugs {
        println!(
            "   {:<12} {:<4} {}",
            format!("#{}", bug.story_id),
            initials(&bug.owned_by),
            bug.name
        );
    }

    Ok(())
}

/// Group stories by owner, preserving first-seen order. Unowned stories
/// are left out.
fn group_by_owner(stories: Vec<Story>) -> Vec<(String, Vec<Story>)> {
    let mut groups: Vec<(String, Vec<Story>)> = Vec::new();

    for story in stories {
        if story.owned_by.is_empty() {
            continue;
        }
        match groups.iter_mut().find(|(owner, _)| *owner == story.owned_by) {
            Some((_, group)) => group.push(story),
            None => groups.push((story.owned_by.clone(), vec![story])),
        }
    }

    groups
}
