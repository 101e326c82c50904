//! Stories listing command.

use crate::cli::StoriesArgs;
use crate::error::Result;
use crate::output::Formatter;
use trackline_domain::Project;
use trackline_sdk::TrackerClient;

/// Every state a story can sit in while still being worth a look
const DEFAULT_SEARCH: &str = "state:unscheduled,unstarted,rejected,started";

/// Execute the stories command: list the top stories for a project.
pub fn execute_stories(
    args: &StoriesArgs,
    project: &Project,
    client: &TrackerClient,
    formatter: &Formatter,
    default_limit: usize,
) -> Result<()> {
    let mut search = DEFAULT_SEARCH.to_string();
    if let Some(filter) = &args.filter {
        search.push(' ');
        search.push_str(filter);
    }
    if let Some(owner) = &args.owner {
        search.push_str(&format!(" owner:{}", owner));
    }

    let stories = client.stories(project, &search)?;

    let limit = match args.number {
        Some(n) => n,
        None => {
            println!();
            println!(
                "Showing the top {} stories; use --number to show more",
                default_limit
            );
            println!();
            default_limit
        }
    };

    if stories.is_empty() {
        println!("None");
    } else {
        for story in stories.iter().take(limit) {
            println!("{}", formatter.story_line(story));
        }
    }

    Ok(())
}
