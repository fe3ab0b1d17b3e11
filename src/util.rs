use url::Url;

use crate::error::{Error, Result};

/// Resolves `path` against `base` the way a browser resolves a link:
/// an absolute path replaces the base path, a relative one is appended to
/// the base's last directory.
pub(crate) fn urljoin(base: &str, path: &str) -> Result<Url> {
    let base = Url::parse(base)?;
    if base.cannot_be_a_base() {
        return Err(Error::InvalidArgument(format!(
            "base uri cannot carry a path: {}",
            base
        )));
    }
    Ok(base.join(path)?)
}

/// Returns a copy of `base` with `segments` appended to its path and `query`
/// as its query string. `base` itself is never modified.
pub(crate) fn endpoint(base: &Url, segments: &[&str], query: &[(&str, &str)]) -> Url {
    let mut url = base.clone();
    if !segments.is_empty() {
        // Checked in urljoin, every catalog url can be a base.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
    }
    if query.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(query);
    }
    url
}
