use crate::domain::version::{ParseVersionError, Version};

/// A tag reference as seen by version resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    /// Tag name; for annotated tags this is the name stored in the tag object
    pub name: String,
    /// Tag message for annotated tags, `None` for lightweight tags
    pub annotation: Option<String>,
}

impl TagRef {
    /// Create an annotated tag reference
    pub fn annotated(name: impl Into<String>, message: impl Into<String>) -> Self {
        TagRef {
            name: name.into(),
            annotation: Some(message.into()),
        }
    }

    /// Create a lightweight tag reference
    pub fn lightweight(name: impl Into<String>) -> Self {
        TagRef {
            name: name.into(),
            annotation: None,
        }
    }

    pub fn is_annotated(&self) -> bool {
        self.annotation.is_some()
    }

    /// Read the tag name as a version
    pub fn version(&self) -> Result<Version, ParseVersionError> {
        Version::parse(&self.name)
    }
}
