/*!
 * Merge engine: turns one entry into its output line.
 *
 * Keys already present in the existing translation are reused verbatim.
 * Everything else is split into segments, only the text segments are
 * translated, and the protected tokens are stitched back in between. The
 * result is a suggestion that the reviewer accepts, rejects or overrides.
 */

use std::borrow::Cow;

use log::{debug, warn};

use crate::entry::ParsedEntry;
use crate::providers::Provider;
use crate::resume::ExistingTranslationIndex;
use crate::review::{ReviewDecision, ReviewRequest};
use crate::segments::{Segment, split_segments};
use crate::translation::cache::TranslationCache;

/// A machine suggestion for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Segments of the source value
    pub segments: Vec<Segment>,
    /// Suggested value, unescaped
    pub value: String,
    /// Suggested output line including the newline
    pub line: String,
    /// Text segments that fell back to the source text
    pub failed_segments: usize,
}

impl Suggestion {
    /// The request shown to the reviewer for this suggestion
    pub fn review_request<'a>(&'a self, entry: &'a ParsedEntry, source_line: &'a str) -> ReviewRequest<'a> {
        ReviewRequest {
            key: &entry.key,
            original_line: source_line.trim(),
            suggested_line: self.line.trim_end_matches(['\r', '\n']),
            failed_segments: self.failed_segments,
        }
    }
}

/// First step for one entry: reuse or ask
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome<'i> {
    /// The key was finalized in an earlier run; emit this line unchanged
    Reused(Cow<'i, str>),
    /// The key is new; the suggestion goes to the reviewer
    NeedsReview(Suggestion),
}

/// How a reviewed key was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Accepted,
    Kept,
    Overridden,
}

/// Second step for one entry, after the reviewer answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Write this line for the key
    Resolved { line: String, resolution: Resolution },
    /// Commit and end the run; nothing is written for the key
    SaveAndStop,
}

/// Merges translated text segments with protected tokens
pub struct MergeEngine<'p> {
    provider: &'p dyn Provider,
    target_language: String,
    cache: TranslationCache,
}

impl<'p> MergeEngine<'p> {
    pub fn new(provider: &'p dyn Provider, target_language: impl Into<String>, cache: TranslationCache) -> Self {
        Self {
            provider,
            target_language: target_language.into(),
            cache,
        }
    }

    /// Target language code passed to the provider
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// The segment cache used by this engine
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Decide what to do with one entry. No provider call is made for reused keys.
    pub async fn merge_entry<'i>(
        &self,
        entry: &ParsedEntry,
        index: &'i ExistingTranslationIndex,
    ) -> MergeOutcome<'i> {
        if let Some(line) = index.line_for(&entry.key) {
            debug!("Reusing existing translation for '{}'", entry.key);
            return MergeOutcome::Reused(line);
        }

        MergeOutcome::NeedsReview(self.suggest(entry).await)
    }

    /// Build the machine suggestion for an entry
    pub async fn suggest(&self, entry: &ParsedEntry) -> Suggestion {
        let segments = split_segments(&entry.value());
        let (value, failed_segments) = self.translate_segments(&segments).await;
        let line = entry.render(&value);

        Suggestion {
            segments,
            value,
            line,
            failed_segments,
        }
    }

    /// Translate the text segments and join everything back in order.
    /// Returns the joined value and the number of segments that fell back.
    pub async fn translate_segments(&self, segments: &[Segment]) -> (String, usize) {
        let mut joined = String::new();
        let mut failures = 0;

        for segment in segments {
            if !segment.is_translatable() {
                joined.push_str(&segment.content);
                continue;
            }

            match self.translate_text(&segment.content).await {
                Some(translated) => joined.push_str(&translated),
                None => {
                    failures += 1;
                    joined.push_str(&segment.content);
                }
            }
        }

        (joined, failures)
    }

    async fn translate_text(&self, text: &str) -> Option<String> {
        if let Some(cached) = self.cache.get(text, &self.target_language) {
            return Some(cached);
        }

        match self.provider.translate(text, &self.target_language).await {
            Ok(translated) => {
                self.cache.store(text, &self.target_language, &translated);
                Some(translated)
            }
            Err(e) => {
                warn!(
                    "Translation via {} failed for {:?}, keeping source text: {}",
                    self.provider.name(),
                    text,
                    e
                );
                None
            }
        }
    }

    /// Apply the reviewer's decision to an entry
    pub fn apply_decision(entry: &ParsedEntry, suggestion: &Suggestion, decision: ReviewDecision) -> EntryOutcome {
        let (value, resolution): (Cow<'_, str>, Resolution) = match decision {
            ReviewDecision::AcceptSuggested => (Cow::Borrowed(suggestion.value.as_str()), Resolution::Accepted),
            ReviewDecision::KeepOriginal => (entry.value(), Resolution::Kept),
            ReviewDecision::Override(text) => (Cow::Owned(text), Resolution::Overridden),
            ReviewDecision::SaveAndStop => return EntryOutcome::SaveAndStop,
        };

        EntryOutcome::Resolved {
            line: entry.render(&value),
            resolution,
        }
    }
}
