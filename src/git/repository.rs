use crate::domain::TagRef;
use crate::error::{GitVersionError, Result};
use crate::git::{HeadCommit, TagIter};
use git2::{ErrorCode, Oid, Reference, Repository as Git2Repo};
use std::path::Path;
use tracing::{debug, info};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository at exactly `path`
    ///
    /// Parent directories are not searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::open(path).map_err(|e| {
            GitVersionError::not_a_repository(format!("{}: {}", path.display(), e.message()))
        })?;
        debug!(path = %path.display(), "opened repository");

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn tag_ref(&self, reference: &Reference<'_>) -> Result<TagRef> {
        let short_name = reference.shorthand().unwrap_or_default().to_string();

        // Symbolic references under refs/tags never point at a tag object
        let Some(oid) = reference.target() else {
            return Ok(TagRef::lightweight(short_name));
        };

        let object = match self.repo.find_object(oid, None) {
            Ok(object) => object,
            Err(e) if e.code() == ErrorCode::NotFound => {
                debug!(tag = %short_name, "tag reference points at a missing object");
                return Ok(TagRef::lightweight(short_name));
            }
            Err(e) => return Err(e.into()),
        };

        match object.into_tag() {
            Ok(tag) => {
                let name = tag.name().map(str::to_string).unwrap_or(short_name);
                let message = tag.message().unwrap_or_default().to_string();
                Ok(TagRef::annotated(name, message))
            }
            Err(_) => Ok(TagRef::lightweight(short_name)),
        }
    }
}

impl super::Repository for Git2Repository {
    fn tags(&self) -> Result<TagIter<'_>> {
        let references = self.repo.references_glob("refs/tags/*")?;

        Ok(Box::new(references.map(move |reference| {
            let reference = reference?;
            self.tag_ref(&reference)
        })))
    }

    fn head_commit(&self) -> Result<HeadCommit> {
        let commit = self.repo.head()?.peel_to_commit()?;
        let message = commit.message().unwrap_or_default().trim_end().to_string();

        Ok(HeadCommit {
            oid: commit.id(),
            message,
        })
    }

    fn create_annotated_tag(&self, name: &str, target: Oid, message: &str) -> Result<Oid> {
        if message.trim().is_empty() {
            return Err(GitVersionError::MissingMessage);
        }

        let message = if message.ends_with('\n') {
            message.to_string()
        } else {
            format!("{}\n", message)
        };

        let object = self.repo.find_object(target, None)?;
        let tagger = self.repo.signature()?;

        let oid = self
            .repo
            .tag(name, &object, &tagger, &message, false)
            .map_err(|e| match e.code() {
                ErrorCode::Exists => GitVersionError::TagExists(name.to_string()),
                _ => GitVersionError::Git(e),
            })?;
        info!(tag = name, target = %target, "created annotated tag");

        Ok(oid)
    }
}
