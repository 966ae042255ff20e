use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use git_version::cli::{run_bump_workflow, BumpWorkflowArgs};
use git_version::config::load_config;
use git_version::domain::{BumpRequest, VersionBump};
use git_version::session::SessionState;
use git_version::ui;

#[derive(Parser)]
#[command(
    name = "git-version",
    version,
    about = "Git Version Commands",
    long_about = "Commands for interacting with a Git Repo and managing version tags\n\n\
                  While prompting for the annotation, Esc or Ctrl+C cancels ('q' is typed as text), \
                  → on an empty line fills in the HEAD commit message and Enter creates the tag."
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging on stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Increment the last version number
    #[command(long_about = "Create a new tag with the last version number incremented by 1")]
    Patch(BumpArgs),

    /// Increment the middle/minor version number
    #[command(
        long_about = "Create a new tag with the middle/minor version number incremented by 1 and the last version number reset to 0"
    )]
    Minor(BumpArgs),

    /// Increment the first/major version number
    #[command(
        long_about = "Create a new tag with the first/major version number incremented by 1 and the rest of the version numbers reset to 0"
    )]
    Major(BumpArgs),
}

#[derive(clap::Args)]
struct BumpArgs {
    #[arg(short, long, help = "Repository path [default: current directory]")]
    path: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "Label appended to the new version (patch only unless bump.label_policy = \"all-kinds\")"
    )]
    label: Option<String>,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("git_version=debug")
    } else {
        EnvFilter::try_from_env("GIT_VERSION_LOG").unwrap_or_else(|_| "git_version=warn".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let (kind, bump_args) = match args.command {
        Command::Patch(bump_args) => (VersionBump::Patch, bump_args),
        Command::Minor(bump_args) => (VersionBump::Minor, bump_args),
        Command::Major(bump_args) => (VersionBump::Major, bump_args),
    };

    let repo_path = match bump_args.path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let config = match load_config(args.config.as_deref(), &repo_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = BumpWorkflowArgs {
        repo_path,
        request: BumpRequest::new(kind, bump_args.label),
    };

    let term = Term::stdout();
    match run_bump_workflow(workflow_args, config, &term) {
        Ok(result) => {
            // Cancelled and failed sessions were already shown in the final frame
            if result.state == SessionState::Confirmed {
                ui::display_success(&format!("Created tag {}", result.proposed));
            }
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }

    Ok(())
}
