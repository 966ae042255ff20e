//! Domain logic - pure version rules independent of git operations

pub mod tag;
pub mod version;

pub use tag::TagRef;
pub use version::{BumpRequest, LabelPolicy, ParseVersionError, Version, VersionBump};
