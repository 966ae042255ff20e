use crate::domain::TagRef;
use crate::error::{GitVersionError, Result};
use crate::git::{HeadCommit, Repository, TagIter};
use git2::Oid;
use std::cell::RefCell;

/// An annotated tag written through [MockRepository]
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedTag {
    pub name: String,
    pub target: Oid,
    pub message: String,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    tags: Vec<TagRef>,
    head: Option<HeadCommit>,
    enumeration_error: Option<String>,
    created: RefCell<Vec<CreatedTag>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: Vec::new(),
            head: None,
            enumeration_error: None,
            created: RefCell::new(Vec::new()),
        }
    }

    /// Add an annotated tag
    pub fn add_annotated_tag(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.tags.push(TagRef::annotated(name, message));
    }

    /// Add a lightweight tag
    pub fn add_lightweight_tag(&mut self, name: impl Into<String>) {
        self.tags.push(TagRef::lightweight(name));
    }

    /// Set the HEAD commit
    pub fn set_head(&mut self, oid: Oid, message: impl Into<String>) {
        self.head = Some(HeadCommit {
            oid,
            message: message.into(),
        });
    }

    /// Make tag enumeration fail after yielding the configured tags
    pub fn fail_enumeration(&mut self, message: impl Into<String>) {
        self.enumeration_error = Some(message.into());
    }

    /// Tags written through [Repository::create_annotated_tag]
    pub fn created_tags(&self) -> Vec<CreatedTag> {
        self.created.borrow().clone()
    }

    fn tag_exists(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
            || self.created.borrow().iter().any(|t| t.name == name)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn tags(&self) -> Result<TagIter<'_>> {
        let error = self
            .enumeration_error
            .clone()
            .map(|msg| Err(GitVersionError::Git(git2::Error::from_str(&msg))));

        Ok(Box::new(self.tags.iter().cloned().map(Ok).chain(error)))
    }

    fn head_commit(&self) -> Result<HeadCommit> {
        self.head.clone().ok_or_else(|| {
            GitVersionError::Git(git2::Error::from_str("reference 'refs/heads/main' not found"))
        })
    }

    fn create_annotated_tag(&self, name: &str, target: Oid, message: &str) -> Result<Oid> {
        if message.trim().is_empty() {
            return Err(GitVersionError::MissingMessage);
        }
        if self.tag_exists(name) {
            return Err(GitVersionError::TagExists(name.to_string()));
        }

        let mut created = self.created.borrow_mut();
        created.push(CreatedTag {
            name: name.to_string(),
            target,
            message: message.to_string(),
        });

        let mut bytes = [0u8; 20];
        bytes[..4].copy_from_slice(&(created.len() as u32).to_be_bytes());
        Ok(Oid::from_bytes(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_tags() {
        let mut repo = MockRepository::new();
        repo.add_annotated_tag("v1.0.0", "first");
        repo.add_lightweight_tag("wip");

        let tags: Vec<TagRef> = repo.tags().unwrap().map(|t| t.unwrap()).collect();
        assert_eq!(tags.len(), 2);
        assert!(tags[0].is_annotated());
        assert!(!tags[1].is_annotated());
    }

    #[test]
    fn test_mock_repository_enumeration_error() {
        let mut repo = MockRepository::new();
        repo.add_annotated_tag("v1.0.0", "first");
        repo.fail_enumeration("corrupt ref");

        let items: Vec<_> = repo.tags().unwrap().collect();
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
    }

    #[test]
    fn test_mock_repository_head() {
        let mut repo = MockRepository::new();
        assert!(repo.head_commit().is_err());

        let oid = Oid::from_bytes(&[1; 20]).unwrap();
        repo.set_head(oid, "Initial commit");
        assert_eq!(repo.head_commit().unwrap().message, "Initial commit");
    }

    #[test]
    fn test_mock_repository_create_tag() {
        let mut repo = MockRepository::new();
        repo.add_annotated_tag("v1.0.0", "first");
        let oid = Oid::from_bytes(&[1; 20]).unwrap();

        repo.create_annotated_tag("v1.0.1", oid, "fix").unwrap();
        assert_eq!(repo.created_tags().len(), 1);

        assert!(matches!(
            repo.create_annotated_tag("v1.0.0", oid, "again"),
            Err(GitVersionError::TagExists(_))
        ));
        assert!(matches!(
            repo.create_annotated_tag("v1.0.2", oid, "  "),
            Err(GitVersionError::MissingMessage)
        ));
    }

    #[test]
    fn test_mock_repository_tag_ids_are_unique() {
        let repo = MockRepository::new();
        let target = Oid::from_bytes(&[1; 20]).unwrap();

        let ids: std::collections::HashSet<Oid> = (0..300)
            .map(|n| {
                repo.create_annotated_tag(&format!("v0.0.{}", n), target, "release")
                    .unwrap()
            })
            .collect();
        assert_eq!(ids.len(), 300);
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert_eq!(repo.tags().unwrap().count(), 0);
    }
}
