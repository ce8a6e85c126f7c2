//! Citation grounding: turning ranked passages into an LLM-readable
//! context block and holding generated answers to account against it.
//!
//! Within one query the sequence is strictly ordered: similarity search →
//! [`format_passages`] → (external generation) → [`ensure_grounded`].
//! Validation needs the complete answer text. When a caller streams tokens
//! straight to the client, raw tokens are forwarded as produced and
//! grounding is skipped for that delivery mode; that is the documented
//! trade-off of streaming, not a missing step.
//!
//! All three components share one label rule ([`resolve_label`]), so the
//! label printed in the context block and the label printed in the sources
//! section can never disagree for the same passage.

pub mod format;
pub mod label;
pub mod validate;

pub use format::{format_passages, grounding_system_prompt};
pub use label::resolve_label;
pub use validate::{
    SOURCES_MARKER, build_sources_section, ensure_grounded, extract_citations, validate_citations,
};
