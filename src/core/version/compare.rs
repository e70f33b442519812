// ─── Version Comparison ───
// Two policies that must not be mixed up:
//   * `compare_tokenized` backs the required-launcher and required-runtime
//     checks. Loose, numeric-aware, accepts any version-ish string.
//   * `compare_semver` backs the minimum-launcher check only. Strict
//     semantic versions, pre-release and build metadata ignored.

use std::cmp::Ordering;

use crate::core::error::{LauncherError, LauncherResult};

fn tokens(version: &str) -> impl Iterator<Item = &str> {
    version
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
}

fn compare_token(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()),
    }
}

/// Compare two version strings token by token.
///
/// Tokens are the runs of ASCII alphanumerics. Integer pairs compare
/// numerically, anything else compares case-insensitively as text. When one
/// token list is a prefix of the other, the shorter one is lesser.
pub fn compare_tokenized(a: &str, b: &str) -> Ordering {
    let mut left = tokens(a);
    let mut right = tokens(b);

    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) => match compare_token(x, y) {
                Ordering::Equal => continue,
                other => return other,
            },
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        }
    }
}

fn parse_release(raw: &str) -> LauncherResult<(u64, u64, u64)> {
    let version = semver::Version::parse(raw.trim())
        .map_err(|e| LauncherError::Parse(format!("invalid semantic version {raw:?}: {e}")))?;
    Ok((version.major, version.minor, version.patch))
}

/// Strict semantic-version comparison on `major.minor.patch` only.
pub fn compare_semver(a: &str, b: &str) -> LauncherResult<Ordering> {
    Ok(parse_release(a)?.cmp(&parse_release(b)?))
}
