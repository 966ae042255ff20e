use crate::domain::{ParseVersionError, TagRef, Version};
use crate::error::{GitVersionError, Result};
use crate::git::Repository;
use tracing::debug;

/// Find the highest version among the annotated tags of a repository
///
/// Returns `v0.0.0` when no annotated tag carries a version.
pub fn latest_version<R: Repository>(repo: &R) -> Result<Version> {
    resolve_latest(repo.tags()?)
}

/// Reduce a sequence of tags to the highest version
///
/// Lightweight tags and names without three dot separated segments are
/// skipped. An annotated tag shaped like a version whose numbers do not parse
/// fails the whole resolution. The result does not depend on the order of
/// `tags`.
pub fn resolve_latest<I>(tags: I) -> Result<Version>
where
    I: IntoIterator<Item = Result<TagRef>>,
{
    let mut latest = Version::default();

    for tag in tags {
        let tag = tag?;
        if !tag.is_annotated() {
            debug!(tag = %tag.name, "skipping lightweight tag");
            continue;
        }

        let version = match tag.version() {
            Ok(version) => version,
            Err(ParseVersionError::NotAVersion { .. }) => {
                debug!(tag = %tag.name, "skipping non-version tag");
                continue;
            }
            Err(source) => {
                return Err(GitVersionError::MalformedTag {
                    tag: tag.name,
                    source,
                })
            }
        };

        if version > latest {
            latest = version;
        }
    }

    debug!(latest = %latest, "resolved latest version");
    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    fn annotated(names: &[&str]) -> Vec<Result<TagRef>> {
        names
            .iter()
            .map(|name| Ok(TagRef::annotated(*name, "release")))
            .collect()
    }

    #[test]
    fn test_resolve_empty_is_zero() {
        assert_eq!(resolve_latest(Vec::new()).unwrap(), Version::new(0, 0, 0));
    }

    #[test]
    fn test_resolve_picks_maximum() {
        let tags = annotated(&["v1.2.3", "v1.10.0", "v0.9.9", "v1.9.12"]);
        assert_eq!(resolve_latest(tags).unwrap(), Version::new(1, 10, 0));
    }

    #[test]
    fn test_resolve_is_order_independent() {
        let names = ["v2.0.0-rc1", "v2.0.0", "v1.4.2", "v2.0.0-rc2"];
        let forward = resolve_latest(annotated(&names)).unwrap();

        let mut reversed = names;
        reversed.reverse();
        let backward = resolve_latest(annotated(&reversed)).unwrap();

        assert_eq!(forward, Version::new(2, 0, 0));
        assert_eq!(forward, backward);
    }

    fn permutations(names: &[&'static str]) -> Vec<Vec<&'static str>> {
        if names.len() <= 1 {
            return vec![names.to_vec()];
        }
        let mut result = Vec::new();
        for i in 0..names.len() {
            let mut rest = names.to_vec();
            let first = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, first);
                result.push(tail);
            }
        }
        result
    }

    #[test]
    fn test_resolve_mixed_labels_in_any_order() {
        let names = ["v1.0.0-2", "v1.0.0-10", "v1.0.0-1_", "v1.0.0-rc1"];
        let orders = permutations(&names);
        assert_eq!(orders.len(), 24);

        for order in orders {
            assert_eq!(
                resolve_latest(annotated(&order)).unwrap().to_string(),
                "v1.0.0-1_",
                "order {:?}",
                order
            );
        }
    }

    #[test]
    fn test_resolve_skips_non_version_tags() {
        let tags = annotated(&["release-candidate", "v1.2", "v3.0.0.1", "v0.1.0"]);
        assert_eq!(resolve_latest(tags).unwrap(), Version::new(0, 1, 0));
    }

    #[test]
    fn test_resolve_skips_lightweight_tags() {
        let tags = vec![
            Ok(TagRef::lightweight("v9.9.9")),
            Ok(TagRef::lightweight("vx.y.z")),
            Ok(TagRef::annotated("v1.0.0", "release")),
        ];
        assert_eq!(resolve_latest(tags).unwrap(), Version::new(1, 0, 0));
    }

    #[test]
    fn test_resolve_fails_on_malformed_tag() {
        let tags = annotated(&["v1.0.0", "v1.x.0", "v2.0.0"]);
        let err = resolve_latest(tags).unwrap_err();
        assert!(matches!(
            err,
            GitVersionError::MalformedTag { ref tag, .. } if tag == "v1.x.0"
        ));
    }

    #[test]
    fn test_resolve_keeps_label() {
        let tags = annotated(&["v1.0.0", "v1.0.1-rc1"]);
        assert_eq!(
            resolve_latest(tags).unwrap(),
            Version::new(1, 0, 1).with_label("rc1")
        );
    }

    #[test]
    fn test_resolve_propagates_enumeration_error() {
        let mut repo = MockRepository::new();
        repo.add_annotated_tag("v1.0.0", "release");
        repo.fail_enumeration("broken ref");
        assert!(matches!(
            latest_version(&repo),
            Err(GitVersionError::Git(_))
        ));
    }

    #[test]
    fn test_latest_version_from_repository() {
        let mut repo = MockRepository::new();
        repo.add_annotated_tag("v0.3.1", "fix");
        repo.add_annotated_tag("v0.4.0", "feature");
        repo.add_lightweight_tag("v5.0.0");
        assert_eq!(latest_version(&repo).unwrap(), Version::new(0, 4, 0));
    }
}
