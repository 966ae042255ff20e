//! Tag analysis: resolving the latest released version

pub mod latest_version;

pub use latest_version::{latest_version, resolve_latest};
