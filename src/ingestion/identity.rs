//! Canonical source identities.
//!
//! The identity string is the sole cache key and the fallback citation
//! label, so the same rule has to hold everywhere: http(s) URLs are
//! normalized through [`url::Url`], everything else is treated as a
//! filesystem path and made absolute. Canonicalization happens once, when a
//! batch enters the ingest pipeline; downstream code only ever sees the
//! canonical form.

use url::Url;

/// Canonicalizes a user-supplied source string.
///
/// Paths are made absolute lexically (`std::path::absolute`): no filesystem
/// access, no existence requirement. Whether the file exists is the
/// loader's concern. Inputs that fail to canonicalize are passed through
/// trimmed, with a diagnostic, rather than rejected; the loader will report
/// the real problem.
pub fn canonical_identity(source: &str) -> String {
    let trimmed = source.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        match Url::parse(trimmed) {
            Ok(url) => url.to_string(),
            Err(err) => {
                tracing::warn!(source = trimmed, error = %err, "unparsable URL; keeping raw identity");
                trimmed.to_string()
            }
        }
    } else {
        match std::path::absolute(trimmed) {
            Ok(path) => path.to_string_lossy().into_owned(),
            Err(err) => {
                tracing::warn!(source = trimmed, error = %err, "path did not canonicalize; keeping raw identity");
                trimmed.to_string()
            }
        }
    }
}
