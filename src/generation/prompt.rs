//! Prompt assembly for grounded answers

use crate::types::{PromptContext, ScoredChunk};

/// Deterministic separator between context passages
const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// The decline phrase the generator is instructed to use when the context
/// does not contain the answer. This directive is the primary hallucination
/// mitigation, not cosmetics.
pub const DECLINE_PHRASE: &str = "I do not know based on the provided documents.";

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Assemble the prompt context from retrieved chunks, in result order
    pub fn build(results: &[ScoredChunk], question: &str) -> PromptContext {
        let context_text = results
            .iter()
            .enumerate()
            .map(|(i, r)| format!("[{}] {}\n{}", i + 1, r.chunk.source, r.chunk.text))
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);

        PromptContext {
            context_text,
            question: question.to_string(),
        }
    }

    /// Render the fixed instruction template around context and question
    pub fn render(context: &PromptContext) -> String {
        format!(
            r#"You are an assistant that answers questions using ONLY the context below.

Rules:
1. Only use information explicitly stated in the context.
2. If the context does not contain the answer, respond exactly with: "{decline}"
3. Never use outside knowledge and never guess.

Context:
{context}

Question: {question}

Answer:"#,
            decline = DECLINE_PHRASE,
            context = context.context_text,
            question = context.question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chunk, Document};

    fn scored(text: &str, source: &str, score: f32) -> ScoredChunk {
        let doc = Document::new(text.to_string(), source.to_string());
        ScoredChunk {
            chunk: Chunk::new(&doc, text.to_string(), 0),
            score,
        }
    }

    #[test]
    fn test_context_preserves_retrieval_order_and_separator() {
        let results = vec![
            scored("first passage", "a.txt", 0.9),
            scored("second passage", "b.txt", 0.5),
        ];
        let context = PromptBuilder::build(&results, "q?");

        let first = context.context_text.find("first passage").unwrap();
        let second = context.context_text.find("second passage").unwrap();
        assert!(first < second);
        assert!(context.context_text.contains(CONTEXT_SEPARATOR));
        assert!(context.context_text.contains("a.txt"));
    }

    #[test]
    fn test_rendered_prompt_carries_the_decline_directive() {
        let context = PromptBuilder::build(&[scored("body", "a.txt", 1.0)], "What is it?");
        let prompt = PromptBuilder::render(&context);

        assert!(prompt.contains(DECLINE_PHRASE));
        assert!(prompt.contains("What is it?"));
        assert!(prompt.contains("body"));
    }

    #[test]
    fn test_empty_retrieval_yields_empty_context() {
        let context = PromptBuilder::build(&[], "q?");
        assert!(context.context_text.is_empty());
        assert_eq!(context.question, "q?");
    }
}
