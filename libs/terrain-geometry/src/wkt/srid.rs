//! # SRID Prefix
//!
//! Extended WKT may carry a spatial reference prefix: `SRID=4326;POLYGON(...)`.

/// Removes a leading `SRID=<id>;` prefix if present.
///
/// # Example
///
/// ```rust
/// use terrain_geometry::wkt::strip_srid;
///
/// assert_eq!(strip_srid("SRID=4326;POINT(1 2)"), "POINT(1 2)");
/// assert_eq!(strip_srid("POINT(1 2)"), "POINT(1 2)");
/// ```
pub fn strip_srid(text: &str) -> &str {
    extract_srid(text).1
}

/// Splits a `SRID=<id>;` prefix from the WKT body.
///
/// Returns `(None, text)` when no prefix is present.
pub fn extract_srid(text: &str) -> (Option<&str>, &str) {
    let trimmed = text.trim_start();
    let has_prefix = trimmed
        .get(..4)
        .is_some_and(|head| head.eq_ignore_ascii_case("SRID"));
    if !has_prefix {
        return (None, text);
    }
    match trimmed.split_once(';') {
        Some((prefix, body)) => {
            let srid = prefix
                .split_once('=')
                .map(|(_, id)| id.trim())
                .filter(|id| !id.is_empty());
            (srid, body)
        }
        None => (None, text),
    }
}

/// Prefixes WKT with `SRID=<id>;` when an id is given.
///
/// # Example
///
/// ```rust
/// use terrain_geometry::wkt::with_srid;
///
/// assert_eq!(with_srid(Some("4326"), "POINT(1 2)"), "SRID=4326;POINT(1 2)");
/// assert_eq!(with_srid(None, "POINT(1 2)"), "POINT(1 2)");
/// ```
pub fn with_srid(srid: Option<&str>, wkt: &str) -> String {
    match srid {
        Some(id) => format!("SRID={};{}", id, wkt),
        None => wkt.to_string(),
    }
}
