//! Path templates and segment matching.
//!
//! Syntax:
//! - `/admin/doctors` static segments, compared ASCII case-insensitively
//! - `:id` captures exactly one non-empty segment
//! - `*rest` (last segment only) captures the remainder, possibly empty
//!
//! Query strings and fragments are ignored and a single trailing slash is
//! tolerated, so `/admin/doctors/?tab=1` matches `/admin/doctors`.

#[cfg(test)]
#[path = "pattern_test.rs"]
mod pattern_test;

use std::fmt;

/// Error returned by [`RoutePattern::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("route pattern must start with '/': {0}")]
    MissingLeadingSlash(String),
    #[error("empty parameter name in route pattern: {0}")]
    EmptyParamName(String),
    #[error("duplicate parameter '{name}' in route pattern: {pattern}")]
    DuplicateParam { pattern: String, name: String },
    #[error("wildcard must be the last segment of route pattern: {0}")]
    WildcardNotLast(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    Wildcard(String),
}

/// Captured parameter values in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn push(&mut self, name: &str, value: String) {
        self.0.push((name.to_owned(), value));
    }
}

/// A compiled route path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not absolute, has an empty or
    /// repeated parameter name, or places a wildcard before the last segment.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(PatternError::MissingLeadingSlash(pattern.to_owned()));
        };

        let raw: Vec<&str> = split_segments(rest).collect();
        let mut segments = Vec::with_capacity(raw.len());
        let mut names: Vec<&str> = Vec::new();

        for (i, seg) in raw.iter().enumerate() {
            let compiled = if let Some(name) = seg.strip_prefix(':') {
                Segment::Param(checked_name(pattern, name, &mut names)?)
            } else if let Some(name) = seg.strip_prefix('*') {
                if i + 1 != raw.len() {
                    return Err(PatternError::WildcardNotLast(pattern.to_owned()));
                }
                Segment::Wildcard(checked_name(pattern, name, &mut names)?)
            } else {
                Segment::Static(seg.to_ascii_lowercase())
            };
            segments.push(compiled);
        }

        Ok(Self { source: pattern.to_owned(), segments })
    }

    /// The pattern text this was compiled from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match `path`, returning captured parameters on success.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Params> {
        let path = strip_query_and_fragment(path);
        let path = path.strip_prefix('/').unwrap_or(path);
        let parts: Vec<&str> = split_segments(path).collect();

        let mut params = Params::new();
        let mut idx = 0;
        for seg in &self.segments {
            match seg {
                Segment::Static(expected) => {
                    let part = parts.get(idx)?;
                    if !part.eq_ignore_ascii_case(expected) {
                        return None;
                    }
                    idx += 1;
                }
                Segment::Param(name) => {
                    let part = parts.get(idx).filter(|p| !p.is_empty())?;
                    params.push(name, decode(part));
                    idx += 1;
                }
                Segment::Wildcard(name) => {
                    let rest = parts[idx..].iter().map(|p| decode(p)).collect::<Vec<_>>();
                    params.push(name, rest.join("/"));
                    return Some(params);
                }
            }
        }

        (idx == parts.len()).then_some(params)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn checked_name<'a>(
    pattern: &str,
    name: &'a str,
    seen: &mut Vec<&'a str>,
) -> Result<String, PatternError> {
    if name.is_empty() {
        return Err(PatternError::EmptyParamName(pattern.to_owned()));
    }
    if seen.contains(&name) {
        return Err(PatternError::DuplicateParam {
            pattern: pattern.to_owned(),
            name: name.to_owned(),
        });
    }
    seen.push(name);
    Ok(name.to_owned())
}

/// Split on `/`, ignoring one trailing slash. `""` yields no segments.
///
/// A lone `/` is not a trailing slash: it splits into two empty segments, so
/// `"//"` never matches the root pattern.
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let path = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    };
    path.split('/').filter(move |_| !path.is_empty())
}

fn strip_query_and_fragment(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// Percent-decode a captured segment, keeping the raw text if it is not valid UTF-8.
fn decode(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_owned(),
    }
}
