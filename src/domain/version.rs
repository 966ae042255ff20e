use crate::error::{GitVersionError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Characters allowed in an operator supplied label. Dots would split the tag
/// name into more than three segments.
const LABEL_PATTERN: &str = r"^[0-9A-Za-z][0-9A-Za-z-]*$";

/// Semantic version `major.minor.patch` with an optional opaque label
///
/// Ordering is numeric on the triple first. Among equal triples the version
/// without a label ranks highest. Labels that are valid semver pre-releases
/// compare by pre-release precedence and rank below any other label, which
/// compare by plain string order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub label: Option<String>,
}

/// Why a tag name could not be read as a version
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseVersionError {
    /// The name does not have three dot separated segments. Not an error for
    /// tag resolution, such tags are simply not version tags.
    #[error("expected three dot separated segments, found {segments}")]
    NotAVersion { segments: usize },

    #[error("invalid major version '{0}'")]
    InvalidMajor(String),

    #[error("invalid minor version '{0}'")]
    InvalidMinor(String),

    #[error("invalid patch version '{0}'")]
    InvalidPatch(String),
}

impl Version {
    /// Create a new version without label
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
            label: None,
        }
    }

    /// Attach a label; an empty label means no label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.label = if label.is_empty() { None } else { Some(label) };
        self
    }

    /// Parse a tag name such as `v1.2.3` or `v2.1.0-rc1`
    ///
    /// The third segment is split on its first `-`: the part before is the
    /// numeric patch, the rest is the label.
    pub fn parse(tag: &str) -> std::result::Result<Self, ParseVersionError> {
        let parts: Vec<&str> = tag.split('.').collect();
        if parts.len() != 3 {
            return Err(ParseVersionError::NotAVersion {
                segments: parts.len(),
            });
        }

        let major_part = parts[0].strip_prefix('v').unwrap_or(parts[0]);
        let major = major_part
            .parse::<u32>()
            .map_err(|_| ParseVersionError::InvalidMajor(parts[0].to_string()))?;
        let minor = parts[1]
            .parse::<u32>()
            .map_err(|_| ParseVersionError::InvalidMinor(parts[1].to_string()))?;

        let (patch_part, label) = match parts[2].split_once('-') {
            Some((patch, label)) => (patch, label),
            None => (parts[2], ""),
        };
        let patch = patch_part
            .parse::<u32>()
            .map_err(|_| ParseVersionError::InvalidPatch(parts[2].to_string()))?;

        Ok(Version::new(major, minor, patch).with_label(label))
    }

    /// Compare the numeric triple only, ignoring labels
    pub fn cmp_numeric(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }

    /// Derive the next version for a bump request
    ///
    /// Lower order fields reset to zero. The request label is kept on patch
    /// bumps, and on minor/major bumps only under [`LabelPolicy::AllKinds`].
    pub fn bump(&self, request: &BumpRequest, policy: LabelPolicy) -> Self {
        let label = match (request.kind, policy) {
            (VersionBump::Patch, _) | (_, LabelPolicy::AllKinds) => request.label.clone(),
            _ => None,
        };

        let next = match request.kind {
            VersionBump::Major => Version::new(self.major.saturating_add(1), 0, 0),
            VersionBump::Minor => Version::new(self.major, self.minor.saturating_add(1), 0),
            VersionBump::Patch => {
                Version::new(self.major, self.minor, self.patch.saturating_add(1))
            }
        };

        Version { label, ..next }
    }

    /// Git reference name of the tag for this version
    pub fn tag_ref(&self) -> String {
        format!("refs/tags/{}", self)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)?;
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => write!(f, "-{}", label),
            _ => Ok(()),
        }
    }
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_numeric(other)
            .then_with(|| match (&self.label, &other.label) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => compare_labels(a, b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Labels that are valid semver pre-releases rank below all other labels.
/// Within each group the order is semver precedence and string order
/// respectively, which keeps the relation transitive.
fn compare_labels(a: &str, b: &str) -> Ordering {
    match (semver::Prerelease::new(a), semver::Prerelease::new(b)) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Version bump type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionBump::Major => write!(f, "major"),
            VersionBump::Minor => write!(f, "minor"),
            VersionBump::Patch => write!(f, "patch"),
        }
    }
}

/// Which bump kinds carry the requested label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelPolicy {
    #[default]
    PatchOnly,
    AllKinds,
}

/// A requested bump, produced once from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpRequest {
    pub kind: VersionBump,
    pub label: Option<String>,
}

impl BumpRequest {
    /// Create a request; an empty label means no label
    pub fn new(kind: VersionBump, label: Option<String>) -> Self {
        BumpRequest {
            kind,
            label: label.filter(|l| !l.is_empty()),
        }
    }

    /// Check that the label can be written into a tag name and that the
    /// policy allows it for this bump kind
    pub fn validate(&self, policy: LabelPolicy) -> Result<()> {
        let Some(label) = self.label.as_deref() else {
            return Ok(());
        };

        if self.kind != VersionBump::Patch && policy == LabelPolicy::PatchOnly {
            return Err(GitVersionError::label(format!(
                "label '{}' is only applied to patch bumps; set bump.label_policy = \"all-kinds\" to label {} bumps",
                label, self.kind
            )));
        }

        let re = Regex::new(LABEL_PATTERN)
            .map_err(|e| GitVersionError::label(format!("Invalid label pattern: {}", e)))?;
        if !re.is_match(label) {
            return Err(GitVersionError::label(format!(
                "label '{}' may only contain ASCII letters, digits and '-'",
                label
            )));
        }

        Ok(())
    }
}
