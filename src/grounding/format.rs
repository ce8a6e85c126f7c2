//! Rendering retrieved passages for the generation step.

use crate::grounding::label::resolve_label;
use crate::types::RetrievedPassage;

/// Renders ranked passages into the numbered context block handed to the
/// model.
///
/// The citation number is the rank: the most similar passage is `[1]`.
/// Zero passages render as an empty string, a valid "no knowledge" state
/// rather than an error; callers distinguish that from a failed search by
/// the `Result` of the search itself.
pub fn format_passages(passages: &[RetrievedPassage]) -> String {
    passages
        .iter()
        .enumerate()
        .map(|(position, passage)| {
            format!(
                "[{}] {}\nContent: {}",
                position + 1,
                resolve_label(&passage.metadata),
                passage.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders the system prompt that instructs the model to answer from the
/// numbered context and cite it inline.
pub fn grounding_system_prompt(context: &str) -> String {
    format!(
        "You are an AI assistant that helps people find information.\n\
         \n\
         You are given extracted parts of documents and a question. Provide a \
         conversational answer based on the context provided.\n\
         If you don't know the answer from the context, just say you don't \
         know. Don't try to make up an answer.\n\
         \n\
         CITATIONS:\n\
         - Use the numbered sources in the context (e.g., [1], [2]) for inline citations.\n\
         - Include a \"Sources\" section at the end listing each cited source number.\n\
         \n\
         Use the following format:\n\
         \n\
         Question: <question here>\n\
         Answer: <answer here with inline citations like [1]>\n\
         Sources:\n\
         - [1] <source>\n\
         - [2] <source>\n\
         =========\n\
         {context}\n\
         ========="
    )
}
