//! Grounded prompt assembly.
//!
//! The assembler quotes every retrieved document verbatim, in rank order,
//! under fixed instruction text that restricts the answer to the listed
//! context. It performs no filtering or summarization of its own.

use crate::service::ScoredDocument;

/// System instruction for the downstream chat model.
pub const SYSTEM_INSTRUCTION: &str = "Answer strictly from provided context; never guess.";

/// Fixed sentence the model must emit when the answer is absent from the
/// retrieved context.
pub const NOT_FOUND_ANSWER: &str = "Not found in the retrieved dataset rows.";

/// Build the grounded user prompt for a question and its retrieved evidence.
pub fn build_prompt(question: &str, hits: &[ScoredDocument]) -> String {
    let context: Vec<String> = hits.iter().map(|h| format!("- {}", h.document)).collect();
    let context = context.join("\n");

    format!(
        "You are a dataset Q&A assistant.\n\
         \n\
         RULES (follow strictly):\n\
         1) ONLY use facts from the CONTEXT below.\n\
         2) If the answer is not explicitly in the CONTEXT, respond: \"{NOT_FOUND_ANSWER}\"\n\
         3) Do NOT invent departments, names, or numbers.\n\
         4) When listing results, quote employee names exactly as shown in CONTEXT.\n\
         \n\
         CONTEXT:\n\
         {context}\n\
         \n\
         QUESTION:\n\
         {question}\n\
         \n\
         Now answer:\n"
    )
}
