//! CLI entry point
//!
//! Wires the run in sequence: resolve configuration, resolve the milestone
//! title, collect closed issues, render, print. Only the rendered changelog
//! reaches stdout; every diagnostic and log line goes to stderr.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use milestone_changelog::config::{self, PartialConfig, TOKEN_ENV_VAR};
use milestone_changelog::formatter::changelog_markdown;
use milestone_changelog::github::GitHubClient;
use milestone_changelog::services::{
    MilestoneLookupError, collect_closed_issues, resolve_milestone_title,
};

#[derive(Parser)]
#[command(name = "milestone-changelog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate a markdown changelog from the closed issues of a GitHub milestone")]
struct Cli {
    /// Configuration file containing base (or all) configuration options
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// GitHub API token (falls back to the GITHUB_TOKEN environment variable)
    #[arg(short, long)]
    token: Option<String>,
    /// GitHub user/organization name
    #[arg(short, long)]
    user: Option<String>,
    /// GitHub repository name
    #[arg(short, long)]
    repo: Option<String>,
    /// Milestone identifier
    #[arg(short, long)]
    milestone: Option<u64>,
    /// Safety cap on the number of search pages to fetch
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // invoked bare: show usage and succeed, same as --help
    if env::args().len() == 1 {
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            // clap writes usage errors to stderr
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("milestone_changelog=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli).await
}

async fn run(cli: Cli) -> ExitCode {
    let overrides = PartialConfig {
        token: cli.token,
        user: cli.user,
        repo: cli.repo,
        milestone: cli.milestone,
        max_pages: cli.max_pages,
    };

    let config = match config::resolve(
        cli.config.as_deref(),
        overrides,
        env::var(TOKEN_ENV_VAR).ok(),
    ) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let client = match GitHubClient::new(&config.token, None) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{:#}", err);
            return ExitCode::FAILURE;
        }
    };

    let milestone_title = match resolve_milestone_title(
        &client,
        &config.repository_id,
        config.milestone,
    )
    .await
    {
        Ok(title) => title,
        Err(err) => {
            report_milestone_failure(&err);
            return ExitCode::FAILURE;
        }
    };

    let issues = match collect_closed_issues(
        &client,
        &config.repository_id,
        &milestone_title,
        config.max_pages,
    )
    .await
    {
        Ok(issues) => issues,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    print!("{}", changelog_markdown(&issues));
    ExitCode::SUCCESS
}

fn report_milestone_failure(err: &MilestoneLookupError) {
    eprintln!("{}", err);
    if let MilestoneLookupError::NotFound { available, .. } = err {
        eprintln!("Existing milestone IDs are:");
        for milestone in available {
            eprintln!(
                "id: {}; title: {}; description: {}",
                milestone.id,
                milestone.title,
                milestone.description.as_deref().unwrap_or("")
            );
        }
    }
}
