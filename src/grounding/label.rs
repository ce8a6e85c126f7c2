//! The shared label rule for passages and citations.

use crate::types::SourceMetadata;

/// Derives the human-readable label for a passage.
///
/// Precedence: a loader-provided file name wins, with `, page {p}` appended
/// when a page is known; otherwise an http(s) identity is used verbatim
/// (same page suffix); otherwise the final path segment of the identity.
/// Degenerate metadata resolves to `"unknown"`; this function has no
/// failure mode.
pub fn resolve_label(metadata: &SourceMetadata) -> String {
    let page_suffix = metadata
        .page
        .map(|page| format!(", page {page}"))
        .unwrap_or_default();

    if let Some(file_name) = metadata.file_name.as_deref() {
        let file_name = file_name.trim();
        if !file_name.is_empty() {
            return format!("{file_name}{page_suffix}");
        }
    }

    let source = metadata.source.trim();
    if source.starts_with("http://") || source.starts_with("https://") {
        return format!("{source}{page_suffix}");
    }

    source
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceKind;

    #[test]
    fn file_name_wins_over_identity() {
        let metadata = SourceMetadata::new("/data/docs/handbook.pdf", SourceKind::Pdf)
            .with_file_name("handbook.pdf");
        assert_eq!(resolve_label(&metadata), "handbook.pdf");
    }

    #[test]
    fn page_suffix_is_appended_to_file_names() {
        let metadata = SourceMetadata::new("/data/docs/handbook.pdf", SourceKind::Pdf)
            .with_file_name("handbook.pdf")
            .with_page(12);
        assert_eq!(resolve_label(&metadata), "handbook.pdf, page 12");
    }

    #[test]
    fn url_identities_are_used_verbatim() {
        let metadata = SourceMetadata::new("https://example.com/post", SourceKind::Web);
        assert_eq!(resolve_label(&metadata), "https://example.com/post");
    }

    #[test]
    fn url_identities_also_take_a_page_suffix() {
        let metadata = SourceMetadata::new("https://example.com/report", SourceKind::Web).with_page(2);
        assert_eq!(resolve_label(&metadata), "https://example.com/report, page 2");
    }

    #[test]
    fn path_identities_reduce_to_their_final_segment() {
        let metadata = SourceMetadata::new("/var/data/notes/summary.md", SourceKind::Markdown);
        assert_eq!(resolve_label(&metadata), "summary.md");
    }

    #[test]
    fn backslash_paths_also_reduce() {
        let metadata = SourceMetadata::new(r"C:\data\summary.docx", SourceKind::Docx);
        assert_eq!(resolve_label(&metadata), "summary.docx");
    }

    #[test]
    fn degenerate_metadata_degrades_to_unknown() {
        let metadata = SourceMetadata::new("", SourceKind::Txt);
        assert_eq!(resolve_label(&metadata), "unknown");

        let slashes_only = SourceMetadata::new("///", SourceKind::Txt);
        assert_eq!(resolve_label(&slashes_only), "unknown");

        let blank_file_name = SourceMetadata::new("", SourceKind::Txt).with_file_name("   ");
        assert_eq!(resolve_label(&blank_file_name), "unknown");
    }
}
