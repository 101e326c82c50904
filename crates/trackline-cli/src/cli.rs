//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use trackline_domain::StoryType;

/// Trackline - everyday tracker workflow from the terminal.
#[derive(Debug, Parser)]
#[command(name = "trackline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// 1-based project position from the projects listing; skips the
    /// project prompt (useful when piping output)
    #[arg(short, long, global = true)]
    pub project_index: Option<usize>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List open stories
    Stories(StoriesArgs),

    /// Show one story's details
    Story(StoryArgs),

    /// Create a story
    Create(CreateArgs),

    /// Start a story (must be estimated)
    Start(StoryArgs),

    /// Finish a story (must be estimated)
    Finish(StoryArgs),

    /// Deliver a story (must be estimated)
    Deliver(StoryArgs),

    /// Accept a delivered story
    Accept(StoryArgs),

    /// Reject a delivered story
    Reject(StoryArgs),

    /// Finished work grouped into changelog sections
    Changelog,

    /// In-progress stories grouped by owner, then open bugs
    Scrum,

    /// Interactive estimation session over unestimated stories
    Poker,
}

/// Arguments for the stories listing.
#[derive(Debug, Args)]
pub struct StoriesArgs {
    /// Extra filter terms appended to the default search
    pub filter: Option<String>,

    /// Only stories owned by this user name or initials
    #[arg(long = "for", value_name = "OWNER")]
    pub owner: Option<String>,

    /// How many stories to show
    #[arg(short, long)]
    pub number: Option<usize>,
}

/// Arguments naming a single story.
#[derive(Debug, Args)]
pub struct StoryArgs {
    /// Story identifier
    pub story_id: i64,
}

/// Arguments for story creation.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Kind of story to create
    #[arg(value_enum)]
    pub story_type: CreateType,

    /// Title
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Story kinds that can be created from the CLI.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CreateType {
    /// New functionality
    Feature,
    /// Defect
    Bug,
    /// Maintenance work
    Chore,
}

impl From<CreateType> for StoryType {
    fn from(value: CreateType) -> Self {
        match value {
            CreateType::Feature => StoryType::Feature,
            CreateType::Bug => StoryType::Bug,
            CreateType::Chore => StoryType::Chore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_stories_args() {
        let cli = Cli::try_parse_from([
            "trackline",
            "stories",
            "--for",
            "AL",
            "--number",
            "5",
            "label:payments",
        ])
        .unwrap();

        match cli.command {
            Command::Stories(args) => {
                assert_eq!(args.owner.as_deref(), Some("AL"));
                assert_eq!(args.number, Some(5));
                assert_eq!(args.filter.as_deref(), Some("label:payments"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_project_index() {
        let cli = Cli::try_parse_from(["trackline", "start", "42", "--project-index", "2"]).unwrap();
        assert_eq!(cli.project_index, Some(2));
        match cli.command {
            Command::Start(args) => assert_eq!(args.story_id, 42),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
