//! Peer version range parsing and selection.
//!
//! Peer ranges are free-form: they mix real versions with workspace
//! references, wildcards and git URLs. Selection never fails; when nothing
//! numeric survives, [`LATEST`] is returned instead.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Sentinel returned when a range holds no usable version token.
pub const LATEST: &str = "latest";

static VERSION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+|\*)(\.(\d+|\*)(\.(\d+|\*))?)?(-.+)?$").unwrap()
});

/// Clean a raw range string down to bare version tokens.
///
/// Removes all whitespace, strips a leading `>=` and drops every caret.
/// Disjunctions stay joined by `||`.
///
/// ```
/// use peerfill::reconcile::normalize;
///
/// assert_eq!(normalize(">=1.2.3"), "1.2.3");
/// assert_eq!(normalize("^1.0.0 || ^2.0.0"), "1.0.0||2.0.0");
/// ```
pub fn normalize(range: &str) -> String {
    let compact: String = range.chars().filter(|c| !c.is_whitespace()).collect();
    let stripped = compact.strip_prefix(">=").unwrap_or(&compact);
    stripped.replace('^', "")
}

/// Check whether `token` looks like `major[.minor[.patch]][-prerelease]`.
///
/// Each numeric component may be a literal `*`.
pub fn is_valid_version_token(token: &str) -> bool {
    VERSION_TOKEN.is_match(token)
}

/// Compare two version tokens numerically, component by component.
///
/// Only the leading run of digits and dots is considered, so pre-release
/// suffixes do not take part. Missing components count as 0.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = numeric_components(a);
    let right = numeric_components(b);
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

fn numeric_components(token: &str) -> Vec<u64> {
    let run: String = token
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    run.split('.')
        .map(|part| part.parse().unwrap_or(0))
        .collect()
}

/// Pick one version out of a peer range.
///
/// Every `||` alternative is normalized and validated; the highest valid
/// token wins. Returns [`LATEST`] when no alternative is valid.
///
/// ```
/// use peerfill::reconcile::select_version;
///
/// assert_eq!(select_version("9.0.0 || 10.0.0"), "10.0.0");
/// assert_eq!(select_version("workspace:*"), "latest");
/// ```
pub fn select_version(range: &str) -> String {
    let normalized = normalize(range);

    let mut best: Option<String> = None;
    for alternative in normalized.split("||") {
        let token = normalize(alternative);
        if !is_valid_version_token(&token) {
            continue;
        }

        best = match best {
            Some(current) if compare_versions(&token, &current) != Ordering::Greater => {
                Some(current)
            }
            _ => Some(token),
        };
    }

    best.unwrap_or_else(|| LATEST.to_string())
}
