//! Translation between browser URLs and app-relative paths when the app is
//! served under a sub-path (e.g. `/clinic`).

#[cfg(test)]
#[path = "base_test.rs"]
mod base_test;

/// Strip `base` from a browser pathname. Paths outside `base` are returned
/// unchanged, which sends them through the catch-all route.
#[must_use]
pub fn strip_base<'a>(base: &str, pathname: &'a str) -> &'a str {
    if base == "/" || base.is_empty() {
        return pathname;
    }
    match pathname.strip_prefix(base) {
        Some("") => "/",
        Some(rest) if rest.starts_with(['/', '?', '#']) => rest,
        _ => pathname,
    }
}

/// Prefix an app-relative `path` with `base` for use in links and history.
#[must_use]
pub fn join_base(base: &str, path: &str) -> String {
    if base == "/" || base.is_empty() {
        return path.to_owned();
    }
    if path == "/" { base.to_owned() } else { format!("{base}{path}") }
}
