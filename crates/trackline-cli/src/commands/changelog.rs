//! Changelog command.
//!
//! Three sections: new features grouped by first label, bugs fixed, known
//! issues. Grouping preserves the service's ordering within each label.

use crate::error::Result;
use crate::output::Formatter;
use trackline_domain::{Project, Story};
use trackline_sdk::TrackerClient;

/// Execute the changelog command.
pub fn execute_changelog(
    project: &Project,
    client: &TrackerClient,
    formatter: &Formatter,
) -> Result<()> {
    let title = format!("Change Log {}", project.name);
    println!();
    println!("{}", formatter.bold(&title));
    println!("{}", formatter.bold(&"=".repeat(title.len())));
    println!();

    println!("{}", formatter.bold("New Features"));
    println!("{}", formatter.bold("============"));

    for (label, stories) in group_by_first_label(client.finished_features(project)?) {
        let display_label = if label.is_empty() { "Other" } else { label.as_str() };
        println!("{}", formatter.bold(display_label));
        for story in stories {
            println!("    * {:<14} {}", format!("[{}]", story.story_id), story.name);
        }
    }

    println!();
    println!("{}", formatter.bold("Bugs Fixed"));
    println!("{}", formatter.bold("=========="));
    print_story_section(&client.finished_bugs(project)?);

    println!();
    println!("{}", formatter.bold("Known Issues"));
    println!("{}", formatter.bold("============"));
    print_story_section(&client.known_issues(project)?);

    println!();
    Ok(())
}

fn print_story_section(stories: &[Story]) {
    if stories.is_empty() {
        println!("None");
        println!();
        return;
    }

    for story in stories {
        let mut line = String::new();
        if !story.labels.is_empty() {
            line.push_str(&format!("[{}] ", story.labels.join(", ")));
        }
        line.push_str(&story.name);
        println!("* {:<14} {}", format!("[{}]", story.story_id), line);
    }
}

/// Group stories by their first label, preserving first-seen label order.
fn group_by_first_label(stories: Vec<Story>) -> Vec<(String, Vec<Story>)> {
    let mut groups: Vec<(String, Vec<Story>)> = Vec::new();

    for story in stories {
        let label = story.first_label().unwrap_or("").to_string();
        match groups.iter_mut().find(|(l, _)| *l == label) {
            Some((_, group)) => group.push(story),
            None => groups.push((label, vec![story])),
        }
    }

    groups
}
