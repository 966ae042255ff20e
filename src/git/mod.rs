//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the few git operations
//! git-version needs: enumerating tags, reading HEAD and writing an annotated
//! tag.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! Version resolution and the annotation session depend on the [Repository]
//! trait only, and receive the handle explicitly.
//!
//! ```rust
//! # use git_version::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_version::Result<()> {
//! for tag in repo.tags()? {
//!     let tag = tag?;
//!     println!("{} annotated={}", tag.name, tag.is_annotated());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::TagRef;
use crate::error::Result;
use git2::Oid;

/// The commit HEAD points at
#[derive(Debug, Clone, PartialEq)]
pub struct HeadCommit {
    /// Object ID of the commit
    pub oid: Oid,
    /// Full commit message
    pub message: String,
}

/// Lazy sequence of tag references
pub type TagIter<'a> = Box<dyn Iterator<Item = Result<TagRef>> + 'a>;

/// Common git operation trait for abstraction
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// backend errors (like `git2::Error`) to the matching
/// [crate::error::GitVersionError] variants.
pub trait Repository {
    /// Enumerate all tag references
    ///
    /// Each item reports whether the reference resolves to an annotated tag
    /// object. An `Err` item aborts whatever consumes the sequence.
    fn tags(&self) -> Result<TagIter<'_>>;

    /// Get the commit HEAD points at, with its message
    ///
    /// # Returns
    /// * `Ok(HeadCommit)` - Commit id and message
    /// * `Err` - If HEAD is unborn or cannot be peeled to a commit
    fn head_commit(&self) -> Result<HeadCommit>;

    /// Create an annotated tag
    ///
    /// # Arguments
    /// * `name` - Tag name (e.g., "v1.2.4")
    /// * `target` - Commit to tag
    /// * `message` - Annotation message; must not be empty
    ///
    /// # Returns
    /// * `Ok(Oid)` - Object ID of the new tag object
    /// * `Err` - If the tag already exists, the message is empty or the write fails
    ///
    /// # Example
    /// ```rust
    /// # use git_version::git::Repository;
    /// # fn example<R: Repository>(repo: &R) -> git_version::Result<()> {
    /// let head = repo.head_commit()?;
    /// repo.create_annotated_tag("v1.0.0", head.oid, "First release")?;
    /// # Ok(())
    /// # }
    /// ```
    fn create_annotated_tag(&self, name: &str, target: Oid, message: &str) -> Result<Oid>;
}
