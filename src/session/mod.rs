//! Interactive annotation session
//!
//! The session shows the current and the proposed version, collects a tag
//! annotation and creates the tag when the operator confirms:
//!
//! - `Editing` is the initial state; keys are applied one at a time
//! - `Enter` creates the tag, leading to `Confirmed` or `Failed`
//! - `Esc` / `Ctrl+C` lead to `Cancelled` without touching the repository
//! - `→` on an empty buffer fills in the HEAD commit message
//!
//! [terminal] drives a session from real key presses.

pub mod input;
pub mod terminal;

pub use input::{InputKey, LineInput, DEFAULT_CHAR_LIMIT};
pub use terminal::{drive, run_interactive, KeySource, TerminalKeys};

use crate::domain::Version;
use crate::error::Result;
use crate::git::Repository;
use git2::Oid;
use tracing::{info, warn};

/// Lifecycle of an annotation session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Editing,
    /// Tag created
    Confirmed,
    /// Operator aborted, nothing written
    Cancelled,
    /// Tag creation failed with the contained message
    Failed(String),
}

/// Creates the tag for a confirmed session
pub trait TagCreator {
    fn create_tag(&self, version: &Version, annotation: &str) -> Result<()>;
}

/// [TagCreator] writing an annotated tag on a fixed commit of a repository
pub struct RepositoryTagger<'r, R: Repository> {
    repo: &'r R,
    target: Oid,
}

impl<'r, R: Repository> RepositoryTagger<'r, R> {
    pub fn new(repo: &'r R, target: Oid) -> Self {
        RepositoryTagger { repo, target }
    }
}

impl<R: Repository> TagCreator for RepositoryTagger<'_, R> {
    fn create_tag(&self, version: &Version, annotation: &str) -> Result<()> {
        self.repo
            .create_annotated_tag(&version.to_string(), self.target, annotation)?;
        Ok(())
    }
}

/// State of one interactive annotation session
#[derive(Debug, Clone)]
pub struct AnnotationSession {
    current: Version,
    proposed: Version,
    input: LineInput,
    placeholder: String,
    autofill: bool,
    state: SessionState,
}

impl AnnotationSession {
    /// Start a session with an empty annotation
    ///
    /// `placeholder` is normally the HEAD commit message.
    pub fn new(current: Version, proposed: Version, placeholder: impl Into<String>) -> Self {
        AnnotationSession {
            current,
            proposed,
            input: LineInput::default(),
            placeholder: placeholder.into(),
            autofill: true,
            state: SessionState::Editing,
        }
    }

    /// Limit the annotation length; 0 means unlimited
    pub fn with_char_limit(mut self, char_limit: usize) -> Self {
        self.input = LineInput::new(char_limit);
        self
    }

    /// Enable or disable filling in the placeholder with `→`
    pub fn with_autofill(mut self, autofill: bool) -> Self {
        self.autofill = autofill;
        self
    }

    pub fn current(&self) -> &Version {
        &self.current
    }

    pub fn proposed(&self) -> &Version {
        &self.proposed
    }

    pub fn input(&self) -> &LineInput {
        &self.input
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// True once the session left `Editing`
    pub fn is_finished(&self) -> bool {
        self.state != SessionState::Editing
    }

    /// True when the tag was created
    pub fn is_confirmed(&self) -> bool {
        self.state == SessionState::Confirmed
    }

    /// Process one key
    ///
    /// Keys arriving after the session finished are ignored. A failed tag
    /// creation ends the session; it is not retried.
    pub fn handle_key<C: TagCreator>(&mut self, key: InputKey, creator: &C) -> &SessionState {
        if self.is_finished() {
            return &self.state;
        }

        match key {
            InputKey::Escape | InputKey::Interrupt => {
                info!(version = %self.proposed, "tag creation cancelled");
                self.state = SessionState::Cancelled;
            }
            InputKey::Enter => {
                let annotation = self.input.value();
                self.state = match creator.create_tag(&self.proposed, &annotation) {
                    Ok(()) => SessionState::Confirmed,
                    Err(e) => {
                        warn!(version = %self.proposed, error = %e, "tag creation failed");
                        SessionState::Failed(e.to_string())
                    }
                };
            }
            InputKey::Right if self.autofill && self.input.is_empty() => {
                self.input.set_value(&self.placeholder);
            }
            other => self.input.apply(other),
        }

        &self.state
    }
}
