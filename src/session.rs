//! Interactive read-retrieve-generate-display loop
//!
//! The loop is an explicit state machine with a typed termination reason so
//! both exit paths (the "exit" sentinel and an interrupt) are testable
//! without process-level signal plumbing. Input is abstracted behind
//! `InputSource`; production reads stdin under `tokio::select!` with ctrl-c,
//! tests feed scripted events.

use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::pipeline::PipelineContext;

/// Sentinel that ends the session, matched case-insensitively
const EXIT_SENTINEL: &str = "exit";

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    ReadingInput,
    Retrieving,
    Generating,
    DisplayingResult,
    Terminated,
}

/// Why the session ended. Both reasons are success, not failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The user typed the exit sentinel
    UserRequested,
    /// An interrupt arrived during input read (EOF is treated the same way:
    /// no further input is possible)
    Interrupted,
}

/// One input-read outcome
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A line of user input
    Line(String),
    /// Interrupt signal during the read
    Interrupted,
    /// Input exhausted
    Eof,
}

/// Source of session events
#[async_trait]
pub trait InputSource: Send {
    /// Block until the next event
    async fn next_event(&mut self) -> SessionEvent;
}

/// Stdin-backed input source honoring ctrl-c during the read
pub struct StdinSource {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InputSource for StdinSource {
    async fn next_event(&mut self) -> SessionEvent {
        print!("> ");
        let _ = std::io::stdout().flush();

        tokio::select! {
            _ = tokio::signal::ctrl_c() => SessionEvent::Interrupted,
            line = self.lines.next_line() => match line {
                Ok(Some(line)) => SessionEvent::Line(line),
                Ok(None) | Err(_) => SessionEvent::Eof,
            },
        }
    }
}

/// Interactive session over a built pipeline
pub struct InteractiveSession<'a> {
    pipeline: &'a PipelineContext,
    state: SessionState,
    show_sources: bool,
}

impl<'a> InteractiveSession<'a> {
    /// Create a session; enters `Idle` only because the pipeline build has
    /// already completed.
    pub fn new(pipeline: &'a PipelineContext, show_sources: bool) -> Self {
        Self {
            pipeline,
            state: SessionState::Idle,
            show_sources,
        }
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drive the loop until termination. Query failures are printed and the
    /// session returns to `Idle`; only the exit sentinel, an interrupt or
    /// EOF terminate.
    pub async fn run(&mut self, input: &mut dyn InputSource) -> TerminationReason {
        loop {
            self.state = SessionState::ReadingInput;

            match input.next_event().await {
                SessionEvent::Interrupted | SessionEvent::Eof => {
                    println!("\nInterrupted. Goodbye!");
                    self.state = SessionState::Terminated;
                    return TerminationReason::Interrupted;
                }
                SessionEvent::Line(line) => {
                    let question = line.trim();
                    if question.is_empty() {
                        self.state = SessionState::Idle;
                        continue;
                    }
                    if question.eq_ignore_ascii_case(EXIT_SENTINEL) {
                        println!("Goodbye!");
                        self.state = SessionState::Terminated;
                        return TerminationReason::UserRequested;
                    }
                    self.handle_query(question).await;
                    self.state = SessionState::Idle;
                }
            }
        }
    }

    /// Run one query to completion; failures are isolated to this turn.
    async fn handle_query(&mut self, question: &str) {
        println!("\nQ: {question}");

        self.state = SessionState::Retrieving;
        let sources = match self.pipeline.retrieve(question).await {
            Ok(sources) => sources,
            Err(e) => {
                println!("Retrieval failed: {e}");
                return;
            }
        };

        self.state = SessionState::Generating;
        let text = match self.pipeline.generate(question, &sources).await {
            Ok(text) => text,
            Err(e) => {
                println!("Generation failed: {e}");
                return;
            }
        };

        self.state = SessionState::DisplayingResult;
        println!("\n{}\n", text.trim());

        if self.show_sources {
            for (i, source) in sources.iter().enumerate() {
                println!(
                    "  [{}] {} (similarity {:.3})",
                    i + 1,
                    source.chunk.source,
                    source.score
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RagConfig;
    use crate::providers::mock::{FailingGenerator, MockEmbedder, MockGenerator};
    use crate::providers::GenerationProvider;
    use std::collections::VecDeque;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct ScriptedInput {
        events: VecDeque<SessionEvent>,
    }

    impl ScriptedInput {
        fn new(events: Vec<SessionEvent>) -> Self {
            Self {
                events: events.into(),
            }
        }

        fn remaining(&self) -> usize {
            self.events.len()
        }
    }

    #[async_trait]
    impl InputSource for ScriptedInput {
        async fn next_event(&mut self) -> SessionEvent {
            self.events.pop_front().unwrap_or(SessionEvent::Eof)
        }
    }

    fn line(s: &str) -> SessionEvent {
        SessionEvent::Line(s.to_string())
    }

    async fn pipeline_with(generator: Arc<dyn GenerationProvider>) -> (TempDir, PipelineContext) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("corpus.txt"), "hello worlds of text").unwrap();

        let pipeline = PipelineContext::build(
            RagConfig::default(),
            Arc::new(MockEmbedder),
            generator,
            dir.path(),
        )
        .await
        .unwrap();
        (dir, pipeline)
    }

    #[tokio::test]
    async fn test_query_then_exit_terminates_by_user_request() {
        let generator = Arc::new(MockGenerator::new());
        let (_dir, pipeline) = pipeline_with(generator.clone()).await;

        let mut input = ScriptedInput::new(vec![line("hello"), line("exit"), line("never read")]);
        let mut session = InteractiveSession::new(&pipeline, false);

        let reason = session.run(&mut input).await;

        assert_eq!(reason, TerminationReason::UserRequested);
        assert_eq!(session.state(), SessionState::Terminated);
        // The first turn reached generation, then the loop resumed
        assert_eq!(generator.calls(), 1);
        // Nothing is read after the sentinel
        assert_eq!(input.remaining(), 1);
    }

    #[tokio::test]
    async fn test_exit_sentinel_is_case_insensitive() {
        let (_dir, pipeline) = pipeline_with(Arc::new(MockGenerator::new())).await;

        let mut input = ScriptedInput::new(vec![line("  EXIT  ")]);
        let mut session = InteractiveSession::new(&pipeline, false);
        assert_eq!(session.run(&mut input).await, TerminationReason::UserRequested);
    }

    #[tokio::test]
    async fn test_interrupt_terminates_with_its_own_reason() {
        let generator = Arc::new(MockGenerator::new());
        let (_dir, pipeline) = pipeline_with(generator.clone()).await;

        let mut input = ScriptedInput::new(vec![line("hello"), SessionEvent::Interrupted]);
        let mut session = InteractiveSession::new(&pipeline, false);

        assert_eq!(session.run(&mut input).await, TerminationReason::Interrupted);
        assert_eq!(session.state(), SessionState::Terminated);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_query_failure_is_recoverable() {
        let (_dir, pipeline) = pipeline_with(Arc::new(FailingGenerator)).await;

        // The failing turn returns to Idle; the sentinel still works
        let mut input = ScriptedInput::new(vec![line("hello"), line("exit")]);
        let mut session = InteractiveSession::new(&pipeline, false);

        assert_eq!(session.run(&mut input).await, TerminationReason::UserRequested);
        assert_eq!(session.state(), SessionState::Terminated);
    }

    #[tokio::test]
    async fn test_blank_lines_are_ignored() {
        let generator = Arc::new(MockGenerator::new());
        let (_dir, pipeline) = pipeline_with(generator.clone()).await;

        let mut input = ScriptedInput::new(vec![line(""), line("   "), line("exit")]);
        let mut session = InteractiveSession::new(&pipeline, false);

        assert_eq!(session.run(&mut input).await, TerminationReason::UserRequested);
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_eof_terminates_like_an_interrupt() {
        let (_dir, pipeline) = pipeline_with(Arc::new(MockGenerator::new())).await;

        let mut input = ScriptedInput::new(vec![]);
        let mut session = InteractiveSession::new(&pipeline, false);
        assert_eq!(session.run(&mut input).await, TerminationReason::Interrupted);
    }
}
