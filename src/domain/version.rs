use semver::Version;
use std::cmp::Ordering;

const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Parse a version from a tag name (e.g., "v1.2.3" -> 1.2.3)
///
/// Full semantic versions are parsed as such, pre-release and build metadata
/// included. Otherwise a leading `major[.minor[.patch]]` run of numbers is
/// accepted, with missing components read as zero ("v2.1-hotfix" -> 2.1.0).
pub fn parse_tag_version(tag: &str) -> Option<Version> {
    let clean_tag = tag
        .strip_prefix('v')
        .or_else(|| tag.strip_prefix('V'))
        .unwrap_or(tag);

    if let Ok(version) = Version::parse(clean_tag) {
        return Some(version);
    }

    let parts = numeric_parts(clean_tag);
    let major = *parts.first()?;
    let minor = parts.get(1).copied().unwrap_or(0);
    let patch = parts.get(2).copied().unwrap_or(0);

    Some(Version::new(major, minor, patch))
}

/// Order two tag names by version precedence.
///
/// Names carrying a version rank above names without one. Equal versions
/// (and two unversioned names) fall back to plain string order.
pub fn compare_tag_versions(a: &str, b: &str) -> Ordering {
    let precedence = match (parse_tag_version(a), parse_tag_version(b)) {
        (Some(va), Some(vb)) => va.cmp_precedence(&vb),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    };

    precedence.then_with(|| a.cmp(b))
}

/// Declared version without a trailing `-SNAPSHOT` suffix
pub fn release_version(version: &str) -> &str {
    version.strip_suffix(SNAPSHOT_SUFFIX).unwrap_or(version)
}

/// Leading numeric components of a version string, at most three.
///
/// Returns an empty vector when the string does not start with a digit.
pub fn numeric_parts(version: &str) -> Vec<u64> {
    let mut parts = Vec::new();

    for component in version.split('.') {
        let digits: &str = &component[..component
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(component.len())];
        let Ok(number) = digits.parse::<u64>() else {
            break;
        };
        parts.push(number);
        // a component with trailing text ends the numeric run
        if parts.len() == 3 || digits.len() != component.len() {
            break;
        }
    }

    parts
}
