use std::fmt;

use semver::{BuildMetadata, Prerelease, Version};

use crate::error::{GateError, Result};

/// Version assigned when no release tag exists yet
pub const BOOTSTRAP_VERSION: &str = "1.0.0";

/// Semantic version component to increment.
///
/// Ordered by impact, so the largest recommendation of a set is its `max()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReleaseType {
    None,
    Patch,
    Minor,
    Major,
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReleaseType::None => "none",
            ReleaseType::Patch => "patch",
            ReleaseType::Minor => "minor",
            ReleaseType::Major => "major",
        };
        f.write_str(name)
    }
}

/// Last released version and the version the recommendation leads to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// `None` when no release tag exists yet
    pub last_version: Option<String>,
    pub next_version: String,
}

impl VersionInfo {
    /// Combine the latest release tag with a release type
    pub fn resolve(last_tag: Option<&str>, release: ReleaseType) -> Result<Self> {
        let last_version = last_tag
            .map(parse_tag_version)
            .transpose()?
            .map(|v| v.to_string());
        let next_version = next_version(last_version.as_deref(), release)?;

        Ok(VersionInfo {
            last_version,
            next_version,
        })
    }

    /// True when the recommendation leaves the version where it is
    pub fn is_unchanged(&self) -> bool {
        self.last_version.as_deref() == Some(self.next_version.as_str())
    }
}

/// Parse a version out of a tag name such as `v1.2.3` or `1.2.3-rc.1`
pub fn parse_tag_version(tag: &str) -> Result<Version> {
    let clean_tag = tag
        .trim()
        .trim_start_matches('v')
        .trim_start_matches('V');

    Version::parse(clean_tag).map_err(|e| {
        GateError::invalid_version(format!("'{}' - expected X.Y.Z ({})", tag, e))
    })
}

/// Compute the version that follows `last` for the given release type.
///
/// Without a previous version the result is always [`BOOTSTRAP_VERSION`].
pub fn next_version(last: Option<&str>, release: ReleaseType) -> Result<String> {
    let Some(last) = last else {
        return Ok(BOOTSTRAP_VERSION.to_string());
    };

    let version = parse_tag_version(last)?;
    Ok(bump(&version, release).to_string())
}

/// Increment a version, resetting lower components.
///
/// A pre-release is promoted to its release when that already satisfies the bump,
/// e.g. `2.0.0-rc.1` bumped by major gives `2.0.0`.
pub fn bump(version: &Version, release: ReleaseType) -> Version {
    if release == ReleaseType::None {
        return version.clone();
    }

    let is_pre = !version.pre.is_empty();
    let mut next = version.clone();
    next.pre = Prerelease::EMPTY;
    next.build = BuildMetadata::EMPTY;

    match release {
        ReleaseType::Major => {
            if !(is_pre && version.minor == 0 && version.patch == 0) {
                next.major += 1;
            }
            next.minor = 0;
            next.patch = 0;
        }
        ReleaseType::Minor => {
            if !(is_pre && version.patch == 0) {
                next.minor += 1;
            }
            next.patch = 0;
        }
        ReleaseType::Patch => {
            if !is_pre {
                next.patch += 1;
            }
        }
        ReleaseType::None => {}
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_ignores_release_type() {
        for release in [
            ReleaseType::None,
            ReleaseType::Patch,
            ReleaseType::Minor,
            ReleaseType::Major,
        ] {
            assert_eq!(next_version(None, release).unwrap(), "1.0.0");
        }
    }

    #[test]
    fn test_next_version_bumps() {
        assert_eq!(next_version(Some("1.2.3"), ReleaseType::Patch).unwrap(), "1.2.4");
        assert_eq!(next_version(Some("1.2.3"), ReleaseType::Minor).unwrap(), "1.3.0");
        assert_eq!(next_version(Some("1.2.3"), ReleaseType::Major).unwrap(), "2.0.0");
        assert_eq!(next_version(Some("1.2.3"), ReleaseType::None).unwrap(), "1.2.3");
    }

    #[test]
    fn test_next_version_accepts_prefix() {
        assert_eq!(next_version(Some("v2.1.0"), ReleaseType::Minor).unwrap(), "2.2.0");
        assert_eq!(next_version(Some("V0.1.9"), ReleaseType::Patch).unwrap(), "0.1.10");
    }

    #[test]
    fn test_next_version_invalid() {
        for bad in ["1.2", "v1.2.3.4", "release", ""] {
            let err = next_version(Some(bad), ReleaseType::Patch).unwrap_err();
            assert!(matches!(err, GateError::InvalidVersionFormat(_)), "{}", bad);
        }
    }

    #[test]
    fn test_prerelease_promotion() {
        let v = parse_tag_version("1.2.3-rc.1").unwrap();
        assert_eq!(bump(&v, ReleaseType::Patch).to_string(), "1.2.3");
        assert_eq!(bump(&v, ReleaseType::Minor).to_string(), "1.3.0");
        assert_eq!(bump(&v, ReleaseType::Major).to_string(), "2.0.0");

        let v = parse_tag_version("1.3.0-beta.2").unwrap();
        assert_eq!(bump(&v, ReleaseType::Minor).to_string(), "1.3.0");

        let v = parse_tag_version("2.0.0-alpha").unwrap();
        assert_eq!(bump(&v, ReleaseType::Major).to_string(), "2.0.0");
    }

    #[test]
    fn test_bump_drops_build_metadata() {
        let v = parse_tag_version("1.0.0+build.5").unwrap();
        assert_eq!(bump(&v, ReleaseType::Patch).to_string(), "1.0.1");
    }

    #[test]
    fn test_version_info_resolve() {
        let info = VersionInfo::resolve(Some("v2.1.0"), ReleaseType::Minor).unwrap();
        assert_eq!(info.last_version.as_deref(), Some("2.1.0"));
        assert_eq!(info.next_version, "2.2.0");
        assert!(!info.is_unchanged());

        let info = VersionInfo::resolve(Some("2.1.0"), ReleaseType::None).unwrap();
        assert!(info.is_unchanged());

        let info = VersionInfo::resolve(None, ReleaseType::Major).unwrap();
        assert_eq!(info.last_version, None);
        assert_eq!(info.next_version, "1.0.0");
        assert!(!info.is_unchanged());
    }

    #[test]
    fn test_release_type_ordering() {
        assert!(ReleaseType::Major > ReleaseType::Minor);
        assert!(ReleaseType::Minor > ReleaseType::Patch);
        assert!(ReleaseType::Patch > ReleaseType::None);
        assert_eq!(ReleaseType::Minor.to_string(), "minor");
    }
}
