//! Citation validation and grounding enforcement.
//!
//! The validator holds a generated answer to account against the passages
//! actually retrieved for its query: extract the `[n]` markers, check them
//! against the retrieved range, repair the one case that is safely
//! repairable, and rebuild the sources section. Nothing in here returns an
//! error: a best-effort answer always reaches the caller, and every
//! diagnostic travels as data in the [`ValidationReport`].

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::grounding::label::resolve_label;
use crate::types::{RetrievedPassage, ValidationReport};

static CITATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]").expect("citation marker pattern"));

/// The marker that separates answer body from the sources listing.
pub const SOURCES_MARKER: &str = "Sources:";

/// Extracts the distinct citation numbers from an answer.
///
/// Matches integers in square brackets anywhere in the text. Numbers too
/// large for `usize` are dropped; they could never reference a passage.
pub fn extract_citations(answer: &str) -> BTreeSet<usize> {
    CITATION_MARKER
        .captures_iter(answer)
        .filter_map(|capture| capture[1].parse::<usize>().ok())
        .collect()
}

/// Checks an answer's citations against the retrieved passage set.
///
/// An empty citation set is invalid ("no citations"). Every cited number
/// outside `[1, passages.len()]` produces its own diagnostic, in ascending
/// order; all offenders are reported, not just the first. Always returns
/// a report; never fails.
pub fn validate_citations(answer: &str, passages: &[RetrievedPassage]) -> ValidationReport {
    let cited = extract_citations(answer);

    if cited.is_empty() {
        return ValidationReport {
            is_valid: false,
            cited,
            errors: vec!["no citations found in answer".to_string()],
        };
    }

    let available = passages.len();
    let errors: Vec<String> = cited
        .iter()
        .filter(|&&number| number < 1 || number > available)
        .map(|number| {
            format!("citation [{number}] is out of range (only {available} passage(s) retrieved)")
        })
        .collect();

    ValidationReport {
        is_valid: errors.is_empty(),
        cited,
        errors,
    }
}

/// Validates an answer and enforces grounding, returning the possibly
/// repaired answer together with the pre-repair report.
///
/// The repair policy is asymmetric. An answer with no citations at all gets
/// ` [1]` appended, attributing it to the top-ranked passage. Out-of-range
/// citations are left untouched in the body and the call stays reported
/// invalid; only the empty-set case is repaired.
///
/// A sources section is appended only when the answer does not already
/// contain one; an existing section is left exactly as the model wrote it.
/// The report reflects the answer as generated, so `is_valid == false`
/// alongside a repaired answer is an expected, successful outcome.
pub fn ensure_grounded(
    answer: &str,
    passages: &[RetrievedPassage],
) -> (String, ValidationReport) {
    let report = validate_citations(answer, passages);

    let mut final_answer = answer.to_string();
    let mut cited = report.cited.clone();

    if !report.is_valid {
        tracing::warn!(errors = ?report.errors, "citation validation failed");
        if cited.is_empty() {
            tracing::warn!("no citations found; attributing answer to top-ranked passage [1]");
            final_answer = format!("{} [1]", final_answer.trim_end());
            cited.insert(1);
        }
    }

    if !final_answer.contains(SOURCES_MARKER) {
        let sources = build_sources_section(&cited, passages);
        final_answer = format!("{}\n\n{}", final_answer.trim_end(), sources);
    }

    (final_answer, report)
}

/// Builds a sources listing for the given citation numbers, ascending, one
/// `- [n] label` line per number that actually references a retrieved
/// passage.
pub fn build_sources_section(cited: &BTreeSet<usize>, passages: &[RetrievedPassage]) -> String {
    if cited.is_empty() {
        return "Sources: None".to_string();
    }

    let mut section = String::from(SOURCES_MARKER);
    for &number in cited {
        let Some(passage) = number
            .checked_sub(1)
            .and_then(|position| passages.get(position))
        else {
            continue;
        };
        section.push_str("\n- [");
        section.push_str(&number.to_string());
        section.push_str("] ");
        section.push_str(&resolve_label(&passage.metadata));
    }
    section
}
