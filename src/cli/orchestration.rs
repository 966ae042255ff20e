//! Main workflow orchestration logic
//!
//! Keeps the bump workflow out of main.rs: clap parsing stays there, the
//! steps below can be called programmatically and tested without a terminal.

use std::path::PathBuf;

use console::Term;
use tracing::info;

use crate::analyzer::latest_version;
use crate::config::{Config, SessionConfig};
use crate::domain::{BumpRequest, Version};
use crate::error::{GitVersionError, Result};
use crate::git::{Git2Repository, HeadCommit, Repository};
use crate::session::{run_interactive, AnnotationSession, RepositoryTagger, SessionState};

/// Arguments for the bump workflow
///
/// Mirrors the CLI arguments without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// Repository root
    pub repo_path: PathBuf,

    /// Requested bump and label
    pub request: BumpRequest,
}

/// Everything resolved before the interactive session starts
#[derive(Debug, Clone, PartialEq)]
pub struct BumpPlan {
    /// Highest version found among the annotated tags
    pub current: Version,

    /// Version the new tag will carry
    pub proposed: Version,

    /// Commit the new tag will point at
    pub head: HeadCommit,
}

impl BumpPlan {
    /// Start the annotation session for this plan
    pub fn session(&self, config: &SessionConfig) -> AnnotationSession {
        AnnotationSession::new(
            self.current.clone(),
            self.proposed.clone(),
            self.head.message.clone(),
        )
        .with_char_limit(config.char_limit)
        .with_autofill(config.autofill)
    }
}

/// Outcome of a bump workflow that reached the session
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Version before the bump
    pub previous: Version,

    /// Proposed version (the tag name when confirmed)
    pub proposed: Version,

    /// How the session ended
    pub state: SessionState,
}

/// Resolve the current version and compute the proposed one
///
/// Fails before any interaction on invalid labels, malformed version tags or
/// an unreadable HEAD.
pub fn plan_bump<R: Repository>(
    repo: &R,
    request: &BumpRequest,
    config: &Config,
) -> Result<BumpPlan> {
    let policy = config.bump.label_policy;
    request.validate(policy)?;

    let current = latest_version(repo)?;
    let head = repo.head_commit()?;
    let proposed = current.bump(request, policy);
    info!(current = %current, proposed = %proposed, bump = %request.kind, "planned version bump");

    Ok(BumpPlan {
        current,
        proposed,
        head,
    })
}

/// Main bump workflow
///
/// 1. Open the repository at `args.repo_path`
/// 2. Resolve the latest version and compute the next one
/// 3. Run the annotation session on `term`
///
/// # Returns
///
/// The session outcome, or an error if anything failed before the session
/// started.
pub fn run_bump_workflow(
    args: BumpWorkflowArgs,
    config: Config,
    term: &Term,
) -> Result<WorkflowResult> {
    let repo = Git2Repository::open(&args.repo_path)?;
    let plan = plan_bump(&repo, &args.request, &config)?;

    if !term.is_term() {
        return Err(GitVersionError::NotATerminal);
    }

    let mut session = plan.session(&config.session);
    let tagger = RepositoryTagger::new(&repo, plan.head.oid);
    run_interactive(term, &mut session, &tagger)?;

    Ok(WorkflowResult {
        previous: plan.current,
        proposed: plan.proposed,
        state: session.state().clone(),
    })
}
