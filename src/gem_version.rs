//! Gem version values and the artefact-to-gem version mapping.
//!
//! Gem registries order versions by dotted segments: numeric segments
//! compare by value, alphabetic segments compare lexically, an alphabetic
//! segment sorts before any number, and missing trailing segments count as
//! zero. [`GemVersion`] implements exactly that ordering, so `1.0` equals
//! `1.0.0` and `1.0.rc.1` sorts before `1.0`.
//!
//! [`GemVersion::from_artifact_version`] maps artefact repository versions
//! into this grammar. The mapping is total and preserves the repository's
//! ordering for the common version families:
//!
//! - dotted numeric versions pass through unchanged;
//! - pre-release qualifiers become dotted segments (`1.0-RC1` to
//!   `1.0.rc.1`, `1.0-SNAPSHOT` to `1.0.snapshot`), with the short aliases
//!   `a`, `b`, `m` and `cr` expanded so lexical ordering matches the
//!   repository's qualifier ordering;
//! - `ga`, `final` and `release` markers are dropped entirely;
//! - a numeric build qualifier sorts just after its release (`1.0-1` to
//!   `1.0.0.1`), and a service pack sorts between the two (`1.0-sp1` to
//!   `1.0.0.1.sp.1`);
//! - meta versions such as `LATEST` and `RELEASE`, and anything else not
//!   starting with a digit, become the [`DUMMY_VERSION`] sentinel.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Sentinel gem version for meta versions that name no concrete release.
pub const DUMMY_VERSION: &str = "999.0.0";

/// One dotted segment of a gem version.
///
/// `Text` precedes `Number` so that pre-release segments sort before the
/// zero padding of a shorter release version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Segment {
    Text(String),
    Number(u64),
}

const PAD: Segment = Segment::Number(0);

/// A gem version ordered by registry comparison rules.
#[derive(Debug, Clone)]
pub struct GemVersion {
    raw: String,
    segments: Vec<Segment>,
}

impl GemVersion {
    /// Create a gem version from a registry-style version string.
    ///
    /// Any string is accepted; digits group into numeric segments, letters
    /// into lowercased alphabetic segments, and separators are dropped.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let owned = raw.into();
        let segments = parse_segments(&owned);
        Self {
            raw: owned,
            segments,
        }
    }

    /// Map an artefact repository version into the gem version grammar.
    ///
    /// The mapping is total; see the module documentation for the families
    /// it preserves ordering for.
    ///
    /// # Examples
    ///
    /// ```
    /// use gemify::gem_version::{DUMMY_VERSION, GemVersion};
    ///
    /// assert_eq!(GemVersion::from_artifact_version("1.2.3").as_str(), "1.2.3");
    /// assert_eq!(GemVersion::from_artifact_version("1.0-SNAPSHOT").as_str(), "1.0.snapshot");
    /// assert_eq!(GemVersion::from_artifact_version("1.0-RC1").as_str(), "1.0.rc.1");
    /// assert_eq!(GemVersion::from_artifact_version("1.0-ga").as_str(), "1.0");
    /// assert_eq!(GemVersion::from_artifact_version("LATEST").as_str(), DUMMY_VERSION);
    /// ```
    #[must_use]
    pub fn from_artifact_version(artifact_version: &str) -> Self {
        Self::new(convert_artifact_version(artifact_version))
    }

    /// Get the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.raw
    }

    /// True when any segment is alphabetic.
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Text(_)))
    }

    /// The leading numeric segment, when the version starts with one.
    #[must_use]
    pub fn major(&self) -> Option<u64> {
        self.segments.first().and_then(|segment| match segment {
            Segment::Number(value) => Some(*value),
            Segment::Text(_) => None,
        })
    }
}

impl Ord for GemVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let longest = self.segments.len().max(other.segments.len());
        for index in 0..longest {
            let ordering = match (self.segments.get(index), other.segments.get(index)) {
                (Some(left), Some(right)) => left.cmp(right),
                (Some(left), None) => left.cmp(&PAD),
                (None, Some(right)) => PAD.cmp(right),
                (None, None) => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for GemVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GemVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GemVersion {}

impl Hash for GemVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Trailing zero segments are invisible to Eq, so they must be
        // invisible to Hash as well.
        for segment in trim_trailing_zeros(&self.segments) {
            segment.hash(state);
        }
    }
}

impl fmt::Display for GemVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

fn trim_trailing_zeros(segments: &[Segment]) -> &[Segment] {
    let mut end = segments.len();
    while end > 0 && matches!(segments.get(end - 1), Some(&Segment::Number(0))) {
        end -= 1;
    }
    segments.get(..end).unwrap_or(segments)
}

fn parse_segments(raw: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut number: Option<u64> = None;
    let mut text = String::new();
    for character in raw.chars() {
        match character.to_digit(10) {
            Some(digit) => {
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                // Saturating keeps absurdly long digit runs comparable
                // instead of panicking.
                let current = number.unwrap_or(0);
                number = Some(current.saturating_mul(10).saturating_add(u64::from(digit)));
            }
            None if character.is_ascii_alphabetic() => {
                if let Some(value) = number.take() {
                    segments.push(Segment::Number(value));
                }
                text.push(character.to_ascii_lowercase());
            }
            None => {
                if let Some(value) = number.take() {
                    segments.push(Segment::Number(value));
                }
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
            }
        }
    }
    if let Some(value) = number.take() {
        segments.push(Segment::Number(value));
    }
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    segments
}

fn convert_artifact_version(artifact_version: &str) -> String {
    let trimmed = artifact_version.trim();
    let starts_numeric = trimmed
        .chars()
        .next()
        .is_some_and(|character| character.is_ascii_digit());
    if !starts_numeric {
        return DUMMY_VERSION.to_owned();
    }

    let (numeric_head, qualifier) = split_numeric_head(trimmed);
    let tokens = normalise_qualifier_tokens(qualifier);
    let Some(first) = tokens.first() else {
        return numeric_head;
    };

    let rendered = render_tokens(&tokens);
    match first {
        // A bare build number sorts just after its release.
        Segment::Number(_) => format!("{numeric_head}.0.{rendered}"),
        // Service packs sort after the release but before any build number.
        Segment::Text(token) if token == "sp" => format!("{numeric_head}.0.1.{rendered}"),
        Segment::Text(_) => format!("{numeric_head}.{rendered}"),
    }
}

/// Split a version into its leading dotted-numeric part and the remainder.
fn split_numeric_head(version: &str) -> (String, &str) {
    let mut head_end = 0;
    for (offset, character) in version.char_indices() {
        if character.is_ascii_digit() || character == '.' {
            head_end = offset + character.len_utf8();
        } else {
            break;
        }
    }
    let (head, rest) = version.split_at(head_end);
    (head.trim_end_matches('.').to_owned(), rest)
}

fn normalise_qualifier_tokens(qualifier: &str) -> Vec<Segment> {
    parse_segments(qualifier)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Text(token) => normalise_text_token(&token).map(Segment::Text),
            number => Some(number),
        })
        .collect()
}

/// Expand short qualifier aliases and drop release markers.
fn normalise_text_token(token: &str) -> Option<String> {
    match token {
        "ga" | "final" | "release" => None,
        "a" => Some("alpha".to_owned()),
        "b" => Some("beta".to_owned()),
        "m" => Some("milestone".to_owned()),
        "cr" => Some("rc".to_owned()),
        other => Some(other.to_owned()),
    }
}

fn render_tokens(tokens: &[Segment]) -> String {
    let rendered: Vec<String> = tokens
        .iter()
        .map(|token| match token {
            Segment::Number(value) => value.to_string(),
            Segment::Text(text) => text.clone(),
        })
        .collect();
    rendered.join(".")
}

#[cfg(test)]
#[path = "gem_version_tests.rs"]
mod tests;
