//! Command implementations.

pub mod changelog;
pub mod create;
pub mod poker;
pub mod scrum;
pub mod status;
pub mod stories;
pub mod story;

pub use changelog::execute_changelog;
pub use create::execute_create;
pub use poker::execute_poker;
pub use scrum::execute_scrum;
pub use status::{execute_transition, Transition};
pub use stories::execute_stories;
pub use story::execute_story;

use crate::error::{CliError, Result};
use std::io::Write as _;
use trackline_domain::Project;
use trackline_sdk::TrackerClient;

/// Pick the project to operate on.
///
/// A single-project account selects itself. `--project-index` (1-based)
/// selects without prompting; otherwise the user is prompted against the
/// projects listing.
pub fn select_project(
    client: &TrackerClient,
    project_index: Option<usize>,
) -> Result<Project> {
    let projects = client.projects()?;

    if projects.is_empty() {
        return Err(CliError::NoProjects);
    }

    if projects.len() == 1 {
        return Ok(projects.into_iter().next().unwrap());
    }

    if let Some(index) = project_index {
        return projects
            .get(index.wrapping_sub(1))
            .cloned()
            .ok_or_else(|| CliError::InvalidInput(format!("no project at index {}", index)));
    }

    loop {
        println!("Select a project:");
        for (idx, project) in projects.iter().enumerate() {
            println!("[{}] {}", idx + 1, project.name);
        }

        let choice = prompt(">> ")?;
        if let Ok(n) = choice.trim().parse::<usize>() {
            if let Some(project) = projects.get(n.wrapping_sub(1)) {
                return Ok(project.clone());
            }
        }
        println!("Hmmm, that did not work -- try again?");
    }
}

/// Print `label` and read one line from stdin.
pub(crate) fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line)
}
