use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse version from a tag string (e.g., "v1.2.3" -> Version(1,2,3))
    ///
    /// Missing trailing components default to 0, so "v1.2" parses as 1.2.0.
    pub fn parse(tag: &str) -> Result<Self> {
        // At most one 'v' or 'V' prefix
        let trimmed = tag.trim();
        let clean_tag = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        if clean_tag.is_empty() {
            return Err(ReleaseError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                tag
            )));
        }

        let parts: Vec<&str> = clean_tag.split('.').collect();
        if parts.len() > 3 {
            return Err(ReleaseError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                tag
            )));
        }

        let mut components = [0u32; 3];
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = part.parse::<u32>().map_err(|_| {
                ReleaseError::version(format!("Invalid version component '{}' in '{}'", part, tag))
            })?;
        }

        Ok(Version::new(components[0], components[1], components[2]))
    }

    /// Tag name for this version ("1.2.3" -> "v1.2.3")
    pub fn tag_name(&self) -> String {
        format!("v{}", self)
    }

    /// Increment according to a release type.
    ///
    /// Explicit versions are not increments; callers resolve them with
    /// [`next_version`] instead.
    pub fn increment(&self, release_type: &ReleaseType) -> Result<Self> {
        match release_type {
            ReleaseType::Major => Ok(Version::new(bump(self.major, "major", self)?, 0, 0)),
            ReleaseType::Minor => Ok(Version::new(self.major, bump(self.minor, "minor", self)?, 0)),
            ReleaseType::Patch => Ok(Version::new(
                self.major,
                self.minor,
                bump(self.patch, "patch", self)?,
            )),
            ReleaseType::Explicit(literal) => {
                Err(ReleaseError::InvalidReleaseType(literal.clone()))
            }
        }
    }
}

fn bump(component: u32, name: &str, version: &Version) -> Result<u32> {
    component.checked_add(1).ok_or_else(|| {
        ReleaseError::version(format!("{} component of {} overflows", name, version))
    })
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

fn explicit_version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^v?\d+\.\d+\.\d+$").expect("explicit version regex is valid"))
}

/// Which version component a release bumps, or an explicit target version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
    /// Literal as given on the command line, e.g. "v2.0.0" or "2.0.0"
    Explicit(String),
}

impl ReleaseType {
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    /// Name used in logs and titles ("major", "minor", "patch" or the literal)
    pub fn as_str(&self) -> &str {
        match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
            ReleaseType::Explicit(literal) => literal,
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, ReleaseType::Explicit(_))
    }
}

impl FromStr for ReleaseType {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(ReleaseType::Major),
            "minor" => Ok(ReleaseType::Minor),
            "patch" => Ok(ReleaseType::Patch),
            literal if explicit_version_regex().is_match(literal) => {
                Ok(ReleaseType::Explicit(literal.to_string()))
            }
            other => Err(ReleaseError::InvalidReleaseType(other.to_string())),
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the version a release will publish.
///
/// An explicit literal is taken as-is regardless of `current`; the bump
/// types go through [`Version::increment`].
pub fn next_version(current: &Version, release_type: &ReleaseType) -> Result<Version> {
    match release_type {
        ReleaseType::Explicit(literal) => Version::parse(literal),
        bump => current.increment(bump),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("v1.2.3").unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
    }

    #[test]
    fn test_version_parse_without_v() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_uppercase_v() {
        let v = Version::parse("V1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_missing_components_default_to_zero() {
        assert_eq!(Version::parse("v1.2").unwrap(), Version::new(1, 2, 0));
        assert_eq!(Version::parse("v7").unwrap(), Version::new(7, 0, 0));
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(Version::parse("").is_err());
        assert!(Version::parse("v").is_err());
        assert!(Version::parse("v1.2.3.4").is_err());
        assert!(Version::parse("v1.x.3").is_err());
        assert!(Version::parse("release-1.2.3").is_err());
    }

    #[test]
    fn test_increment_major() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.increment(&ReleaseType::Major).unwrap(), Version::new(2, 0, 0));
    }

    #[test]
    fn test_increment_minor() {
        let v = Version::new(1, 4, 9);
        assert_eq!(v.increment(&ReleaseType::Minor).unwrap(), Version::new(1, 5, 0));
    }

    #[test]
    fn test_increment_patch() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.increment(&ReleaseType::Patch).unwrap(), Version::new(1, 2, 4));
    }

    #[test]
    fn test_increment_from_zero() {
        let v = Version::default();
        assert_eq!(v.increment(&ReleaseType::Patch).unwrap(), Version::new(0, 0, 1));
        assert_eq!(v.increment(&ReleaseType::Minor).unwrap(), Version::new(0, 1, 0));
        assert_eq!(v.increment(&ReleaseType::Major).unwrap(), Version::new(1, 0, 0));
    }

    #[test]
    fn test_increment_rejects_explicit() {
        let v = Version::new(1, 0, 0);
        let err = v
            .increment(&ReleaseType::Explicit("v2.0.0".to_string()))
            .unwrap_err();
        assert!(matches!(err, ReleaseError::InvalidReleaseType(_)));
    }

    #[test]
    fn test_increment_resets_lower_components() {
        for (major, minor, patch) in [(0, 0, 0), (3, 7, 11), (10, 0, 99)] {
            let v = Version::new(major, minor, patch);
            assert_eq!(
                v.increment(&ReleaseType::Major).unwrap(),
                Version::new(major + 1, 0, 0)
            );
            assert_eq!(
                v.increment(&ReleaseType::Minor).unwrap(),
                Version::new(major, minor + 1, 0)
            );
            assert_eq!(
                v.increment(&ReleaseType::Patch).unwrap(),
                Version::new(major, minor, patch + 1)
            );
        }
    }

    #[test]
    fn test_release_type_parse() {
        assert_eq!(ReleaseType::parse("major").unwrap(), ReleaseType::Major);
        assert_eq!(ReleaseType::parse("minor").unwrap(), ReleaseType::Minor);
        assert_eq!(ReleaseType::parse("patch").unwrap(), ReleaseType::Patch);
        assert_eq!(
            ReleaseType::parse("v2.0.0").unwrap(),
            ReleaseType::Explicit("v2.0.0".to_string())
        );
        assert_eq!(
            ReleaseType::parse("2.0.0").unwrap(),
            ReleaseType::Explicit("2.0.0".to_string())
        );
    }

    #[test]
    fn test_release_type_parse_invalid() {
        for input in ["", "Major", "huge", "v2.0", "2.0.0-rc1", "vv2.0.0", " patch"] {
            let err = ReleaseType::parse(input).unwrap_err();
            assert!(
                matches!(err, ReleaseError::InvalidReleaseType(_)),
                "'{}' should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_next_version_explicit_bypasses_increment() {
        let current = Version::new(5, 3, 1);
        let explicit = ReleaseType::Explicit("2.0.0".to_string());
        assert_eq!(next_version(&current, &explicit).unwrap(), Version::new(2, 0, 0));

        let with_prefix = ReleaseType::Explicit("v2.0.0".to_string());
        assert_eq!(
            next_version(&current, &with_prefix).unwrap(),
            Version::new(2, 0, 0)
        );
    }

    #[test]
    fn test_next_version_bumps() {
        let current = Version::new(1, 4, 9);
        assert_eq!(
            next_version(&current, &ReleaseType::Minor).unwrap(),
            Version::new(1, 5, 0)
        );
    }

    #[test]
    fn test_version_display_and_tag_name() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.to_string(), "1.2.3");
        assert_eq!(v.tag_name(), "v1.2.3");
    }

    #[test]
    fn test_increment_overflow_is_error() {
        let max = Version::new(u32::MAX, u32::MAX, u32::MAX);
        for release_type in [ReleaseType::Major, ReleaseType::Minor, ReleaseType::Patch] {
            let err = max.increment(&release_type).unwrap_err();
            assert!(matches!(err, ReleaseError::Version(_)));
            assert!(err.to_string().contains("overflows"), "got: {}", err);
        }

        // Only the bumped component matters
        let v = Version::new(1, u32::MAX, u32::MAX);
        assert_eq!(v.increment(&ReleaseType::Major).unwrap(), Version::new(2, 0, 0));
    }

    #[test]
    fn test_version_parse_single_prefix_only() {
        assert!(Version::parse("vv1.2.3").is_err());
        assert!(Version::parse("vV1.2.3").is_err());
        assert_eq!(Version::parse("V1.2.3").unwrap(), Version::new(1, 2, 3));
    }
}
