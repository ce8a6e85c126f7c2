//! Property tests for the splitter's contracts: size bound, exact overlap,
//! offset coverage, and slice fidelity over arbitrary text and settings.

use proptest::prelude::*;

use citesmith::chunking::{ChunkConfig, split_documents};
use citesmith::types::{SourceDocument, SourceKind, SourceMetadata};

/// Text with word, sentence, line, and paragraph boundaries mixed in, and
/// at least one non-whitespace character so the split cannot come up empty.
fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z\\. \n]{1,400}")
        .unwrap()
        .prop_filter("needs printable content", |s| {
            s.chars().any(|c| !c.is_whitespace())
        })
}

fn settings_strategy() -> impl Strategy<Value = (usize, usize)> {
    (2usize..80).prop_flat_map(|size| (Just(size), 0usize..size))
}

fn split(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<citesmith::Chunk> {
    let document = SourceDocument::new(
        text,
        SourceMetadata::new("/corpus/input.txt", SourceKind::Txt),
    );
    split_documents(&[document], &ChunkConfig::new(chunk_size, chunk_overlap))
        .expect("settings are valid and text is non-empty")
}

proptest! {
    #[test]
    fn chunks_never_exceed_the_size_budget(
        text in text_strategy(),
        (size, overlap) in settings_strategy(),
    ) {
        for chunk in split(&text, size, overlap) {
            prop_assert!(chunk.content.chars().count() <= size);
        }
    }

    #[test]
    fn consecutive_chunks_share_exactly_the_overlap(
        text in text_strategy(),
        (size, overlap) in settings_strategy(),
    ) {
        let chunks = split(&text, size, overlap);
        for pair in chunks.windows(2) {
            let prev_end = pair[0].start_offset + pair[0].content.chars().count();
            prop_assert_eq!(pair[1].start_offset, prev_end - overlap);
        }
    }

    #[test]
    fn offsets_cover_the_document(
        text in text_strategy(),
        (size, overlap) in settings_strategy(),
    ) {
        let total = text.chars().count();
        let chunks = split(&text, size, overlap);

        prop_assert_eq!(chunks[0].start_offset, 0);
        let last = chunks.last().unwrap();
        prop_assert_eq!(last.start_offset + last.content.chars().count(), total);

        for pair in chunks.windows(2) {
            prop_assert!(pair[1].start_offset >= pair[0].start_offset);
        }
    }

    #[test]
    fn chunks_are_faithful_slices_of_the_source(
        text in text_strategy(),
        (size, overlap) in settings_strategy(),
    ) {
        let chars: Vec<char> = text.chars().collect();
        for chunk in split(&text, size, overlap) {
            let expected: String = chars
                .iter()
                .skip(chunk.start_offset)
                .take(chunk.content.chars().count())
                .collect();
            prop_assert_eq!(&chunk.content, &expected);
        }
    }

    #[test]
    fn chunk_indexes_are_sequential(
        text in text_strategy(),
        (size, overlap) in settings_strategy(),
    ) {
        for (position, chunk) in split(&text, size, overlap).iter().enumerate() {
            prop_assert_eq!(chunk.chunk_index, position);
        }
    }
}
