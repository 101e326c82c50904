//! Poker command - interactive planning session.
//!
//! Walks every unestimated story, shows its details, and prompts for a
//! point value from the project's scale.

use super::prompt;
use crate::error::Result;
use crate::output::Formatter;
use trackline_domain::Project;
use trackline_sdk::TrackerClient;

/// Execute the poker command.
pub fn execute_poker(
    project: &Project,
    client: &TrackerClient,
    formatter: &Formatter,
) -> Result<()> {
    let stories = client.unestimated_stories(project)?;
    let total = stories.len();

    for (idx, story) in stories.iter().enumerate() {
        println!();
        println!(
            "{} PLANNING POKER SESSION [{}]",
            project.name.to_uppercase(),
            formatter.bold(&format!("{}/{} Stories Estimated", idx + 1, total))
        );
        println!();
        print!("{}", formatter.story_details(story));

        let quit = prompt_estimation(project, story, client, formatter)?;
        if quit {
            return Ok(());
        }
    }

    println!("KaBoom!!! Nice Work Team");
    Ok(())
}

/// Prompt until the story is estimated, skipped, or the session quits.
/// Returns true when the user asked to quit.
fn prompt_estimation(
    project: &Project,
    story: &trackline_domain::Story,
    client: &TrackerClient,
    formatter: &Formatter,
) -> Result<bool> {
    loop {
        println!();
        println!(
            "{}",
            formatter.bold(&format!(
                "Estimate: [{}, (s)kip, (u)rl, (q)uit]",
                project.point_scale.join(",")
            ))
        );

        let input = prompt(&formatter.bold(">> "))?;
        let choice = input.trim();

        match choice {
            "s" | "S" => return Ok(false),
            "q" | "Q" => return Ok(true),
            "u" | "U" => {
                println!("{}", formatter.link(&story.url));
            }
            _ if project.point_scale.iter().any(|p| p == choice) => {
                if let Ok(value) = choice.parse::<i64>() {
                    client.assign_estimate(story, value)?;
                    return Ok(false);
                }
                println!("Invalid input, try again");
            }
            _ => println!("Invalid input, try again"),
        }
    }
}
