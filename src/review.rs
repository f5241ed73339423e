/*!
 * Review protocol between the session and the human translator.
 *
 * Every key without an existing translation is shown to the reviewer
 * together with the suggested line. The reviewer answers with one of four
 * actions; there is no "skip": each key either resolves to a value or the
 * run is saved and stopped.
 */

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::app_config::ReviewConfig;
use crate::errors::ReviewError;

/// What the reviewer decided for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Use the machine suggestion as-is
    AcceptSuggested,
    /// Use the untranslated source value
    KeepOriginal,
    /// Commit what is done so far and end the run
    SaveAndStop,
    /// Use this text as the value
    Override(String),
}

impl ReviewDecision {
    /// Interpret one line of reviewer input.
    ///
    /// Input is trimmed, then checked against the accept, keep and save
    /// commands in that order; any other non-empty text is a free-form
    /// override. Empty input yields `None` (ask again).
    pub fn parse(input: &str, commands: &ReviewConfig) -> Option<Self> {
        let input = input.trim();

        if input.is_empty() {
            None
        } else if input == commands.accept {
            Some(Self::AcceptSuggested)
        } else if input == commands.keep_original {
            Some(Self::KeepOriginal)
        } else if input == commands.save_and_stop {
            Some(Self::SaveAndStop)
        } else {
            Some(Self::Override(input.to_string()))
        }
    }
}

/// What the reviewer is shown for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest<'a> {
    /// Key being translated
    pub key: &'a str,
    /// Source line without its terminator
    pub original_line: &'a str,
    /// Suggested output line without its terminator
    pub suggested_line: &'a str,
    /// Number of text segments whose translation failed and fell back to the source
    pub failed_segments: usize,
}

/// A synchronous review channel
pub trait Reviewer {
    /// Ask for a decision on one key
    fn review(&mut self, request: &ReviewRequest<'_>) -> Result<ReviewDecision, ReviewError>;
}

/// Terminal reviewer reading answers line by line
pub struct ConsoleReviewer<R, W> {
    input: R,
    output: W,
    commands: ReviewConfig,
}

impl<R: BufRead, W: Write> ConsoleReviewer<R, W> {
    pub fn new(input: R, output: W, commands: ReviewConfig) -> Self {
        Self { input, output, commands }
    }

    fn prompt(&mut self) -> Result<(), ReviewError> {
        write!(
            self.output,
            "Enter translation ({} accept, {} keep original, {} save and exit): ",
            self.commands.accept, self.commands.keep_original, self.commands.save_and_stop
        )?;
        self.output.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Reviewer for ConsoleReviewer<R, W> {
    fn review(&mut self, request: &ReviewRequest<'_>) -> Result<ReviewDecision, ReviewError> {
        writeln!(self.output)?;
        writeln!(self.output, "Original:  {}", request.original_line)?;
        writeln!(self.output, "Suggested: {}", request.suggested_line)?;
        if request.failed_segments > 0 {
            writeln!(
                self.output,
                "(translation failed for {} segment(s); source text kept there)",
                request.failed_segments
            )?;
        }

        let mut answer = String::new();
        loop {
            self.prompt()?;
            answer.clear();
            if self.input.read_line(&mut answer)? == 0 {
                return Err(ReviewError::ChannelClosed);
            }
            if let Some(decision) = ReviewDecision::parse(&answer, &self.commands) {
                return Ok(decision);
            }
        }
    }
}

/// Reviewer answering from a prepared list of decisions.
///
/// Used for non-interactive runs and tests. Once the queue is empty the
/// fallback decision (if any) answers every further request; without one
/// the channel reports itself closed.
#[derive(Debug, Default)]
pub struct ScriptedReviewer {
    queue: VecDeque<ReviewDecision>,
    fallback: Option<ReviewDecision>,
    reviewed_keys: Vec<String>,
}

impl ScriptedReviewer {
    pub fn new(decisions: impl IntoIterator<Item = ReviewDecision>) -> Self {
        Self {
            queue: decisions.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Answer every request with `decision`
    pub fn always(decision: ReviewDecision) -> Self {
        Self {
            fallback: Some(decision),
            ..Self::default()
        }
    }

    /// Answer with `decision` once the queue runs out
    pub fn then_always(mut self, decision: ReviewDecision) -> Self {
        self.fallback = Some(decision);
        self
    }

    /// Keys that were presented for review, in order
    pub fn reviewed_keys(&self) -> &[String] {
        &self.reviewed_keys
    }
}

impl Reviewer for ScriptedReviewer {
    fn review(&mut self, request: &ReviewRequest<'_>) -> Result<ReviewDecision, ReviewError> {
        self.reviewed_keys.push(request.key.to_string());
        self.queue
            .pop_front()
            .or_else(|| self.fallback.clone())
            .ok_or(ReviewError::ChannelClosed)
    }
}
