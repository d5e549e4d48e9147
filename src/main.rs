use anyhow::Result;
use clap::Parser;

use git_promote::cli::orchestration::{run_promote_workflow, PromoteWorkflowArgs};
use git_promote::config;
use git_promote::git::Git2Repository;
use git_promote::hosting::GhCli;
use git_promote::ui::{self, TerminalConfirmation};

#[derive(clap::Parser)]
#[command(
    name = "git-promote",
    about = "Create four-tier feature branches and promote one change across them"
)]
struct Args {
    #[arg(help = "Feature name the tier branches are derived from")]
    feature: String,

    #[arg(
        short = 'c',
        long,
        help = "Only create branches; skip propagation, push and pull requests"
    )]
    create_only: bool,

    #[arg(short = 'p', long, help = "Push the tier branches to the remote")]
    push: bool,

    #[arg(
        short = 'a',
        long,
        requires = "message",
        help = "Commit pending changes and cherry-pick them across all tiers"
    )]
    apply_changes: bool,

    #[arg(short = 'm', long, help = "Commit message for the propagated change")]
    message: Option<String>,

    #[arg(
        long = "create-pr",
        alias = "pr",
        value_name = "TITLE",
        help = "Open a pull request per branch with the given title (implies --push)"
    )]
    create_pr: Option<String>,

    #[arg(short = 'b', long = "pr-body", help = "Pull request body")]
    pr_body: Option<String>,

    #[arg(long, help = "Custom configuration file path")]
    config: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    // Bind the workflow to the repository the tool was started in
    let repo = match Git2Repository::open(".", config.remote.as_str()) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    if let Err(e) = repo.require_remote() {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    let workflow_args = PromoteWorkflowArgs {
        feature: args.feature,
        create_only: args.create_only,
        push: args.push,
        apply_message: if args.apply_changes { args.message } else { None },
        pr_title: args.create_pr,
        pr_body: args.pr_body,
    };

    let hosting = GhCli::new();
    match run_promote_workflow(
        &workflow_args,
        &config,
        &repo,
        &hosting,
        &TerminalConfirmation,
    ) {
        Ok(_) => Ok(()),
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
