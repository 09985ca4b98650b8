//! Parser for `git describe --tags --dirty --always` output.
//!
//! The accepted forms are:
//!   * `hash[-dirty]` when there is no release tag yet
//!   * `[v]major.minor[.patch][-pre-release][-N-ghash][-dirty]`
//!
//! The pre-release part may itself contain `-` and `.`; only the trailing
//! `N-ghash` pair is split off it.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::version::{Commit, Version};

const SEGMENT_SEPARATOR: char = '-';
const TAG_SEPARATOR: char = '.';
const DIRTY_MARKER: &str = "dirty";

// Git prefixes the abbreviated hash with "g" when it follows a tag.
static COMMIT_HASH: Lazy<Regex> =
    Lazy::new(|| Regex::new("^g(?P<hash>[0-9a-fA-F]+)$").unwrap());

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TagDefect {
    #[error("expected 2 or 3 components, found {0}")]
    ComponentCount(usize),
    #[error("component {0:?} is not a non-negative integer")]
    NotNumeric(String),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid describe output: {reason}")]
    InvalidInput { reason: &'static str },
    #[error("Invalid version tag {tag:?}: {defect}")]
    InvalidTag { tag: String, defect: TagDefect },
    #[error(
        "Invalid commit count {} before commit hash \"g{hash}\"",
        show_distance(.distance)
    )]
    InvalidCommitDistance {
        distance: Option<String>,
        hash: String,
    },
}

fn show_distance(distance: &Option<String>) -> String {
    match distance {
        Some(distance) => format!("{:?}", distance),
        None => "<missing>".into(),
    }
}

/// Splits describe output into a [`Version`].
pub fn parse(input: &str) -> Result<Version, ParseError> {
    if input.is_empty() {
        return Err(ParseError::InvalidInput {
            reason: "empty string",
        });
    }

    let mut segments: Vec<&str> = input.split(SEGMENT_SEPARATOR).collect();

    let dirty = segments.last() == Some(&DIRTY_MARKER);
    if dirty {
        segments.pop();
    }

    let head = match segments.first() {
        Some(head) if !head.is_empty() => *head,
        _ => {
            return Err(ParseError::InvalidInput {
                reason: "no tag or commit hash",
            })
        }
    };

    if !head.contains(TAG_SEPARATOR) {
        // No release tag yet, so `--always` fell back on a bare hash.
        return Ok(Version::default().with_commit(head, 0).with_dirty(dirty));
    }

    let (major, minor, patch) = parse_tag(head)?;
    let mut version = Version::new(major, minor, patch).with_dirty(dirty);
    let mut rest = &segments[1..];

    if let Some((last, init)) = rest.split_last() {
        if let Some(captures) = COMMIT_HASH.captures(last) {
            let hash = &captures["hash"];
            let (distance, init) = match init.split_last() {
                Some((distance, init)) => (Some(*distance), init),
                None => (None, init),
            };
            let commits_since =
                distance.and_then(parse_decimal).ok_or_else(|| {
                    ParseError::InvalidCommitDistance {
                        distance: distance.map(Into::into),
                        hash: hash.into(),
                    }
                })?;
            version.commit = Some(Commit {
                hash: hash.into(),
                commits_since,
            });
            rest = init;
        }
    }

    if !rest.is_empty() {
        version.pre_release = Some(rest.join("-"));
    }

    Ok(version)
}

fn parse_tag(tag: &str) -> Result<(u64, u64, u64), ParseError> {
    let invalid = |defect| ParseError::InvalidTag {
        tag: tag.into(),
        defect,
    };

    let codes = tag
        .strip_prefix('v')
        .unwrap_or(tag)
        .split(TAG_SEPARATOR)
        .map(|code| {
            parse_decimal(code)
                .ok_or_else(|| invalid(TagDefect::NotNumeric(code.into())))
        })
        .collect::<Result<Vec<_>, _>>();

    match codes.as_deref() {
        Ok([major, minor]) => Ok((*major, *minor, 0)),
        Ok([major, minor, patch]) => Ok((*major, *minor, *patch)),
        Ok(codes) => Err(invalid(TagDefect::ComponentCount(codes.len()))),
        Err(err) => Err(err.clone()),
    }
}

/// Plain decimal only: `str::parse` would also accept a leading `+`.
fn parse_decimal(text: &str) -> Option<u64> {
    if text.bytes().all(|byte| byte.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

#[cfg(test)]
mod test {
    use super::{parse, ParseError, TagDefect};
    use crate::version::Version;

    #[test]
    fn test_empty_string() {
        assert!(matches!(parse(""), Err(ParseError::InvalidInput { .. })));
    }

    #[test]
    fn test_dirty_marker_only() {
        assert!(matches!(
            parse("dirty"),
            Err(ParseError::InvalidInput { .. })
        ));
        assert!(matches!(
            parse("-dirty"),
            Err(ParseError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_hash_only() {
        assert_eq!(
            parse("abcdefg"),
            Ok(Version::default().with_commit("abcdefg", 0))
        );
    }

    #[test]
    fn test_hash_only_dirty() {
        assert_eq!(
            parse("abcdefg-dirty"),
            Ok(Version::default().with_commit("abcdefg", 0).with_dirty(true))
        );
    }

    #[test]
    fn test_hash_only_ignores_rest() {
        let expected = Version::default().with_commit("abc", 0);
        assert_eq!(parse("abc-def"), Ok(expected.clone()));
        assert_eq!(parse("abc-def-dirty"), Ok(expected.with_dirty(true)));
    }

    #[test]
    fn test_empty_leading_segment() {
        assert_eq!(
            parse("-abc"),
            Err(ParseError::InvalidInput {
                reason: "no tag or commit hash",
            })
        );
    }

    #[test]
    fn test_hash_only_keeps_prefix() {
        // Without a tag git doesn't add "g", so nothing is stripped.
        assert_eq!(parse("g296cf8b").unwrap().commit_hash(), Some("g296cf8b"));
    }

    #[test]
    fn test_tag_only() {
        assert_eq!(parse("v1.2.3"), Ok(Version::new(1, 2, 3)));
        assert_eq!(parse("1.2.3"), Ok(Version::new(1, 2, 3)));
    }

    #[test]
    fn test_tag_only_dirty() {
        let expected = Version::new(1, 2, 3).with_dirty(true);
        assert_eq!(parse("v1.2.3-dirty"), Ok(expected.clone()));
        assert_eq!(parse("1.2.3-dirty"), Ok(expected));
    }

    #[test]
    fn test_tag_only_no_patch() {
        assert_eq!(parse("v1.2"), Ok(Version::new(1, 2, 0)));
        assert_eq!(parse("1.2"), Ok(Version::new(1, 2, 0)));
    }

    #[test]
    fn test_tag_only_no_patch_dirty() {
        let expected = Version::new(1, 2, 0).with_dirty(true);
        assert_eq!(parse("v1.2-dirty"), Ok(expected.clone()));
        assert_eq!(parse("1.2-dirty"), Ok(expected));
    }

    #[test]
    fn test_commits_since() {
        let expected = Version::new(1, 2, 0).with_commit("296cf8b", 12);
        assert_eq!(parse("v1.2.0-12-g296cf8b"), Ok(expected.clone()));
        assert_eq!(
            parse("v1.2.0-12-g296cf8b-dirty"),
            Ok(expected.with_dirty(true))
        );
    }

    #[test]
    fn test_pre_release() {
        assert_eq!(
            parse("1.2.3-alpha.3-special"),
            Ok(Version::new(1, 2, 3).with_pre_release("alpha.3-special"))
        );
    }

    #[test]
    fn test_pre_release_with_commits_since() {
        assert_eq!(
            parse("v1.2.3-alpha.3-special-12-g296cf8b-dirty"),
            Ok(Version::new(1, 2, 3)
                .with_pre_release("alpha.3-special")
                .with_commit("296cf8b", 12)
                .with_dirty(true))
        );
    }

    #[test]
    fn test_only_one_v_stripped() {
        assert_eq!(
            parse("vv1.2"),
            Err(ParseError::InvalidTag {
                tag: "vv1.2".into(),
                defect: TagDefect::NotNumeric("v1".into()),
            })
        );
    }

    #[test]
    fn test_too_many_components() {
        assert_eq!(
            parse("v1.2.3.1.1.1.1"),
            Err(ParseError::InvalidTag {
                tag: "v1.2.3.1.1.1.1".into(),
                defect: TagDefect::ComponentCount(7),
            })
        );
    }

    #[test]
    fn test_non_numeric_component() {
        assert_eq!(
            parse("v1.x.3-4-gabc"),
            Err(ParseError::InvalidTag {
                tag: "v1.x.3".into(),
                defect: TagDefect::NotNumeric("x".into()),
            })
        );
        assert!(matches!(
            parse("1.+2"),
            Err(ParseError::InvalidTag { .. })
        ));
        assert!(matches!(
            parse("1..2"),
            Err(ParseError::InvalidTag { .. })
        ));
    }

    #[test]
    fn test_hash_without_distance() {
        assert_eq!(
            parse("v1.2.3-g296cf8b"),
            Err(ParseError::InvalidCommitDistance {
                distance: None,
                hash: "296cf8b".into(),
            })
        );
    }

    #[test]
    fn test_hash_after_non_numeric_distance() {
        let err = parse("1.2.3-beta-gadd").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidCommitDistance {
                distance: Some("beta".into()),
                hash: "add".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            r#"Invalid commit count "beta" before commit hash "gadd""#
        );
    }

    #[test]
    fn test_non_hex_suffix_is_pre_release() {
        assert_eq!(
            parse("1.2.3-12-gxyz"),
            Ok(Version::new(1, 2, 3).with_pre_release("12-gxyz"))
        );
    }

    #[test]
    fn test_from_str() {
        let version: Version = "v0.4-1-gdeadbee".parse().unwrap();
        assert_eq!(version, Version::new(0, 4, 0).with_commit("deadbee", 1));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            parse("v1.2.3.4").unwrap_err().to_string(),
            r#"Invalid version tag "v1.2.3.4": expected 2 or 3 components, found 4"#
        );
        assert_eq!(
            parse("v1.2.3-g1").unwrap_err().to_string(),
            r#"Invalid commit count <missing> before commit hash "g1""#
        );
    }
}
