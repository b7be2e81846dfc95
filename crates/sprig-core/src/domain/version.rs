//! Platform versions and version ranges.
//!
//! Platform versions are semantic versions. Besides plain `MAJOR.MINOR.PATCH`
//! they accept the dotted qualifier form used by JVM platforms
//! (`2.1.0.RELEASE`, `2.2.0.M1`, `2.2.0.BUILD-SNAPSHOT`). `RELEASE`, `FINAL`
//! and `GA` denote a release; any other qualifier becomes a pre-release, so
//! `2.2.0.M1 < 2.2.0.RC1 < 2.2.0`.
//!
//! Ranges use interval notation: `[2.0.0,3.0.0)` includes 2.0.0 and excludes
//! 3.0.0. A bare version `2.0.0` means "2.0.0 or later". Either side of an
//! interval may be left empty to leave it unbounded.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use semver::{Prerelease, Version};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

const RELEASE_QUALIFIERS: [&str; 3] = ["RELEASE", "FINAL", "GA"];

// ── PlatformVersion ──────────────────────────────────────────────────────────

/// The platform version a project is generated against.
///
/// Comparison, ordering and hashing use the semantic version only, so
/// `2.1.0.RELEASE == 2.1.0`. The text the version was parsed from is kept
/// and is what [`Display`](fmt::Display) and [`Self::as_declared`] return:
/// generated builds must reference the artifact exactly as requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlatformVersion {
    version: Version,
    /// `None` for versions built from numbers, which are declared as semver.
    declared: Option<String>,
}

impl PlatformVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            version: Version::new(major, minor, patch),
            declared: None,
        }
    }

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(invalid_version(input, "version is empty"));
        }

        let version = match Version::parse(text) {
            Ok(version) => version,
            Err(_) => parse_dotted(input, text)?,
        };

        Ok(Self {
            version,
            declared: Some(text.to_string()),
        })
    }

    pub fn as_semver(&self) -> &Version {
        &self.version
    }

    /// The version as the caller wrote it, e.g. `2.1.0.RELEASE`.
    pub fn as_declared(&self) -> Cow<'_, str> {
        match &self.declared {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(self.version.to_string()),
        }
    }

    pub fn is_prerelease(&self) -> bool {
        !self.version.pre.is_empty()
    }
}

/// `MAJOR.MINOR` and `MAJOR.MINOR.PATCH.QUALIFIER` forms.
fn parse_dotted(input: &str, text: &str) -> Result<Version, DomainError> {
    let parts: Vec<&str> = text.split('.').collect();
    match parts.len() {
        2 => Version::parse(&format!("{text}.0")),
        n if n >= 4 => {
            let core = parts[..3].join(".");
            let qualifier = parts[3..].join(".");
            let mut version =
                Version::parse(&core).map_err(|e| invalid_version(input, e.to_string()))?;
            if !RELEASE_QUALIFIERS.contains(&qualifier.to_ascii_uppercase().as_str()) {
                version.pre = Prerelease::new(&qualifier)
                    .map_err(|e| invalid_version(input, e.to_string()))?;
            }
            Ok(version)
        }
        _ => Version::parse(text),
    }
    .map_err(|e| invalid_version(input, e.to_string()))
}

impl PartialEq for PlatformVersion {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for PlatformVersion {}

impl Hash for PlatformVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.version.hash(state);
    }
}

impl PartialOrd for PlatformVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PlatformVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version.cmp(&other.version)
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_declared())
    }
}

impl FromStr for PlatformVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PlatformVersion {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PlatformVersion> for String {
    fn from(value: PlatformVersion) -> Self {
        value.to_string()
    }
}

fn invalid_version(input: &str, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidVersion {
        input: input.to_string(),
        reason: reason.into(),
    }
}

// ── VersionRange ─────────────────────────────────────────────────────────────

/// One end of a [`VersionRange`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bound {
    pub version: PlatformVersion,
    pub inclusive: bool,
}

/// A set of platform versions bounded below and/or above.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionRange {
    lower: Option<Bound>,
    upper: Option<Bound>,
}

impl VersionRange {
    /// Every version.
    pub fn any() -> Self {
        Self::default()
    }

    /// `version` or later.
    pub fn at_least(version: PlatformVersion) -> Self {
        Self {
            lower: Some(Bound {
                version,
                inclusive: true,
            }),
            upper: None,
        }
    }

    /// Anything strictly before `version`.
    pub fn below(version: PlatformVersion) -> Self {
        Self {
            lower: None,
            upper: Some(Bound {
                version,
                inclusive: false,
            }),
        }
    }

    /// Build an interval, rejecting empty ones.
    pub fn between(lower: Bound, upper: Bound) -> Result<Self, DomainError> {
        let range = Self {
            lower: Some(lower),
            upper: Some(upper),
        };
        range.check_not_empty()?;
        Ok(range)
    }

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(invalid_range(input, "range is empty"));
        }
        if text == "*" {
            return Ok(Self::any());
        }

        let open = text.chars().next().unwrap_or_default();
        if open != '[' && open != '(' {
            let version = PlatformVersion::parse(text)?;
            return Ok(Self::at_least(version));
        }

        let close = text.chars().last().unwrap_or_default();
        if close != ']' && close != ')' {
            return Err(invalid_range(input, "missing closing ']' or ')'"));
        }

        let inner = &text[1..text.len() - 1];
        let Some((low, high)) = inner.split_once(',') else {
            return Err(invalid_range(input, "expected 'lower,upper'"));
        };
        if high.contains(',') {
            return Err(invalid_range(input, "too many ',' separators"));
        }

        let bound = |raw: &str, inclusive: bool| -> Result<Option<Bound>, DomainError> {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            Ok(Some(Bound {
                version: PlatformVersion::parse(raw)?,
                inclusive,
            }))
        };

        let range = Self {
            lower: bound(low, open == '[')?,
            upper: bound(high, close == ']')?,
        };
        range.check_not_empty().map_err(|_| {
            invalid_range(input, "lower bound is above the upper bound")
        })?;
        Ok(range)
    }

    pub fn lower(&self) -> Option<&Bound> {
        self.lower.as_ref()
    }

    pub fn upper(&self) -> Option<&Bound> {
        self.upper.as_ref()
    }

    pub fn is_unbounded(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    pub fn contains(&self, version: &PlatformVersion) -> bool {
        let above_lower = self.lower.as_ref().is_none_or(|b| {
            match version.cmp(&b.version) {
                Ordering::Greater => true,
                Ordering::Equal => b.inclusive,
                Ordering::Less => false,
            }
        });
        let below_upper = self.upper.as_ref().is_none_or(|b| {
            match version.cmp(&b.version) {
                Ordering::Less => true,
                Ordering::Equal => b.inclusive,
                Ordering::Greater => false,
            }
        });
        above_lower && below_upper
    }

    fn check_not_empty(&self) -> Result<(), DomainError> {
        if let (Some(low), Some(high)) = (&self.lower, &self.upper) {
            let empty = match low.version.cmp(&high.version) {
                Ordering::Greater => true,
                Ordering::Equal => !(low.inclusive && high.inclusive),
                Ordering::Less => false,
            };
            if empty {
                return Err(invalid_range(&self.to_string(), "range is empty"));
            }
        }
        Ok(())
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.lower, &self.upper) {
            (None, None) => f.write_str("*"),
            (Some(low), None) if low.inclusive => write!(f, "{}", low.version),
            (low, high) => {
                match low {
                    Some(b) => write!(f, "{}{}", if b.inclusive { '[' } else { '(' }, b.version)?,
                    None => f.write_str("(")?,
                }
                f.write_str(",")?;
                match high {
                    Some(b) => write!(f, "{}{}", b.version, if b.inclusive { ']' } else { ')' }),
                    None => f.write_str(")"),
                }
            }
        }
    }
}

impl FromStr for VersionRange {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionRange {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VersionRange> for String {
    fn from(value: VersionRange) -> Self {
        value.to_string()
    }
}

fn invalid_range(input: &str, reason: &str) -> DomainError {
    DomainError::InvalidVersionRange {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> PlatformVersion {
        PlatformVersion::parse(s).unwrap()
    }

    #[test]
    fn release_qualifier_is_a_release() {
        assert_eq!(v("2.1.0.RELEASE"), PlatformVersion::new(2, 1, 0));
        assert!(!v("2.1.0.RELEASE").is_prerelease());
    }

    #[test]
    fn declared_spelling_is_kept() {
        assert_eq!(v("2.1.0.RELEASE").to_string(), "2.1.0.RELEASE");
        assert_eq!(v(" 2.2.0.M1 ").as_declared(), "2.2.0.M1");
        assert_eq!(v("3.3.0-M1").to_string(), "3.3.0-M1");
        assert_eq!(PlatformVersion::new(3, 2, 0).to_string(), "3.2.0");
    }

    #[test]
    fn equal_versions_hash_alike() {
        use std::collections::HashSet;

        let set: HashSet<PlatformVersion> = [v("2.1.0.RELEASE"), v("2.1.0")].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn milestone_qualifiers_order_before_release() {
        assert!(v("2.2.0.BUILD-SNAPSHOT") < v("2.2.0.M1"));
        assert!(v("2.2.0.M1") < v("2.2.0.RC1"));
        assert!(v("2.2.0.RC1") < v("2.2.0"));
        assert!(v("2.2.0.M1").is_prerelease());
    }

    #[test]
    fn two_part_versions_get_a_zero_patch() {
        assert_eq!(v("3.2"), PlatformVersion::new(3, 2, 0));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(PlatformVersion::parse("").is_err());
        assert!(PlatformVersion::parse("three").is_err());
        assert!(PlatformVersion::parse("1.x.0").is_err());
    }

    #[test]
    fn half_open_range_excludes_upper() {
        let range = VersionRange::parse("[2.0.0,3.0.0)").unwrap();
        assert!(range.contains(&v("2.0.0")));
        assert!(range.contains(&v("2.7.18")));
        assert!(!range.contains(&v("3.0.0")));
        assert!(!range.contains(&v("1.5.22.RELEASE")));
    }

    #[test]
    fn exclusive_lower_bound() {
        let range = VersionRange::parse("(2.0.0,]").unwrap();
        assert!(!range.contains(&v("2.0.0")));
        assert!(range.contains(&v("9.9.9")));
        assert!(range.upper().is_none());
    }

    #[test]
    fn bare_version_means_at_least() {
        let range = VersionRange::parse("2.0.0.M1").unwrap();
        assert!(range.contains(&v("2.0.0.M1")));
        assert!(range.contains(&v("2.0.0")));
        assert!(!range.contains(&v("1.9.0")));
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(VersionRange::parse("[3.0.0,2.0.0]").is_err());
        assert!(VersionRange::parse("[2.0.0,2.0.0)").is_err());
        assert!(VersionRange::parse("[2.0.0,2.0.0]").is_ok());
    }

    #[test]
    fn malformed_ranges_are_rejected() {
        assert!(VersionRange::parse("[2.0.0").is_err());
        assert!(VersionRange::parse("[2.0.0)").is_err());
        assert!(VersionRange::parse("[1.0.0,2.0.0,3.0.0)").is_err());
    }

    #[test]
    fn display_round_trips() {
        for text in ["[2.0.0,3.0.0)", "(1.0.0,2.0.0]", "2.0.0", "(,3.0.0)", "*"] {
            let range = VersionRange::parse(text).unwrap();
            assert_eq!(VersionRange::parse(&range.to_string()).unwrap(), range);
        }
    }

    #[test]
    fn any_range_parses_from_its_display() {
        let any: VersionRange = VersionRange::any().to_string().parse().unwrap();
        assert!(any.is_unbounded());
        assert!(any.contains(&v("1.0.0")));
    }

    #[test]
    fn serde_uses_string_form() {
        let range: VersionRange = serde_json::from_str("\"[2.0.0,3.0.0)\"").unwrap();
        assert!(range.contains(&v("2.5.0")));
        let any: VersionRange = serde_json::from_str("\"*\"").unwrap();
        assert!(any.is_unbounded());
    }
}
