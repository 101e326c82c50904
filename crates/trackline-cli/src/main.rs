//! Trackline CLI - everyday tracker workflow from the terminal.

use clap::Parser;
use trackline_cli::commands::{self, Transition};
use trackline_cli::{Cli, CliError, Command, Config, Formatter};
use trackline_sdk::{TrackerClient, TOKEN_ENV_VAR};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> trackline_cli::Result<()> {
    let cli = Cli::parse();

    // Log to stderr so listings stay pipeable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let config = Config::load().unwrap_or_default();
    let formatter = Formatter::new(!cli.no_color && config.settings.color);
    let client = build_client(&config)?;

    match &cli.command {
        Command::Stories(args) => {
            let project = commands::select_project(&client, cli.project_index)?;
            commands::execute_stories(
                args,
                &project,
                &client,
                &formatter,
                config.settings.story_limit,
            )?;
        }
        Command::Story(args) => {
            commands::execute_story(args.story_id, cli.project_index, &client, &formatter)?;
        }
        Command::Create(args) => {
            let project = commands::select_project(&client, cli.project_index)?;
            commands::execute_create(args, &project, &client)?;
        }
        Command::Start(args) => {
            commands::execute_transition(Transition::Start, args.story_id, cli.project_index, &client)?;
        }
        Command::Finish(args) => {
            commands::execute_transition(Transition::Finish, args.story_id, cli.project_index, &client)?;
        }
        Command::Deliver(args) => {
            commands::execute_transition(Transition::Deliver, args.story_id, cli.project_index, &client)?;
        }
        Command::Accept(args) => {
            commands::execute_transition(Transition::Accept, args.story_id, cli.project_index, &client)?;
        }
        Command::Reject(args) => {
            commands::execute_transition(Transition::Reject, args.story_id, cli.project_index, &client)?;
        }
        Command::Changelog => {
            let project = commands::select_project(&client, cli.project_index)?;
            commands::execute_changelog(&project, &client, &formatter)?;
        }
        Command::Scrum => {
            let project = commands::select_project(&client, cli.project_index)?;
            commands::execute_scrum(&project, &client, &formatter)?;
        }
        Command::Poker => {
            let project = commands::select_project(&client, cli.project_index)?;
            commands::execute_poker(&project, &client, &formatter)?;
        }
    }

    Ok(())
}

fn build_client(config: &Config) -> trackline_cli::Result<TrackerClient> {
    let token = config.resolve_token().ok_or_else(|| {
        let config_path = Config::path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "~/.trackline/config.toml".to_string());
        CliError::Config(format!(
            "No API token found. Set {} or put `token = \"...\"` in {}.\n\
             Your token is at the bottom of your tracker profile page.",
            TOKEN_ENV_VAR, config_path
        ))
    })?;

    let mut client = TrackerClient::new(token);
    if let Some(base_url) = &config.base_url {
        client = client.with_base_url(base_url.clone());
    }
    Ok(client)
}
