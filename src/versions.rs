//! OpenShift version comparisons.
//!
//! OpenShift versions are dotted numeric strings ("4.12", "4.16.3") and may
//! carry a pre-release or build suffix ("4.16.0-rc0", "4.14.0+okd"). A
//! pre-release of version N counts as N for all gating decisions, so the
//! suffix is stripped per component before comparison.

/// Numeric value of one dot-separated component, with any pre-release or
/// build suffix removed. Returns None when the remaining text is not a
/// number.
fn component(part: &str) -> Option<u64> {
    let end = part.find(['-', '+']).unwrap_or(part.len());
    let digits = &part[..end];
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Parse a version string into (major, minor, patch). Missing components
/// default to zero.
fn parse(version: &str) -> Option<(u64, u64, u64)> {
    let mut parts = version.split('.');
    let major = component(parts.next()?)?;
    let minor = match parts.next() {
        Some(p) => component(p)?,
        None => 0,
    };
    let patch = match parts.next() {
        Some(p) => component(p)?,
        None => 0,
    };
    Some((major, minor, patch))
}

/// True when `version` is greater than or equal to `minimum`.
/// Unparsable versions never satisfy a minimum.
pub fn at_least(version: &str, minimum: &str) -> bool {
    match (parse(version), parse(minimum)) {
        (Some(a), Some(b)) => a >= b,
        _ => false,
    }
}

/// True when `version` is strictly below `maximum`.
/// An unparsable or empty version is treated as older than everything.
pub fn less_than(version: &str, maximum: &str) -> bool {
    match (parse(version), parse(maximum)) {
        (Some(a), Some(b)) => a < b,
        _ => true,
    }
}

/// The "major.minor" prefix of a version, used as a requirements table key.
pub fn major_minor(version: &str) -> Option<String> {
    let (major, minor, _) = parse(version)?;
    Some(format!("{}.{}", major, minor))
}
