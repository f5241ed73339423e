/*!
 * Translation session: one pass over a source file.
 *
 * The session indexes the existing target file, streams the source line by
 * line into a staging file and renames the staging file over the target
 * when the run completes or the reviewer saves and stops. Any other exit
 * drops the staging file so the target keeps its last committed content.
 */

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::app_config::Config;
use crate::entry::parse_line;
use crate::errors::SessionError;
use crate::file_utils::{FileManager, StagingFile};
use crate::providers::Provider;
use crate::resume::ExistingTranslationIndex;
use crate::review::Reviewer;
use crate::translation::{EntryOutcome, MergeEngine, MergeOutcome, Resolution, TranslationCache};

/// Per-run settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Language code passed to the provider
    pub target_language: String,
    /// Suffix appended to the target path for the staging file
    pub staging_suffix: String,
    /// Discard a leftover staging file instead of failing
    pub force: bool,
    /// Translate identical text segments only once
    pub cache_enabled: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            target_language: "ru".to_string(),
            staging_suffix: ".tmp".to_string(),
            force: false,
            cache_enabled: true,
        }
    }
}

impl SessionOptions {
    pub fn from_config(config: &Config, force: bool) -> Self {
        Self {
            target_language: config.target_language.clone(),
            staging_suffix: config.session.staging_suffix.clone(),
            force,
            cache_enabled: config.translation.common.cache_enabled,
        }
    }
}

/// Line counts for one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Source lines read
    pub lines: usize,
    /// Lines copied verbatim
    pub passthrough: usize,
    /// Entries taken from the existing translation
    pub reused: usize,
    /// Suggestions accepted by the reviewer
    pub accepted: usize,
    /// Entries kept in the source language
    pub kept: usize,
    /// Entries replaced by reviewer text
    pub overridden: usize,
    /// New entries left for a later run after save-and-stop
    pub deferred: usize,
    /// Text segments whose translation failed
    pub provider_failures: usize,
}

impl SessionStats {
    fn record(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Accepted => self.accepted += 1,
            Resolution::Kept => self.kept += 1,
            Resolution::Overridden => self.overridden += 1,
        }
    }

    /// Entries written to the output
    pub fn entries_written(&self) -> usize {
        self.reused + self.accepted + self.kept + self.overridden
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines: {} passthrough, {} reused, {} accepted, {} kept, {} overridden, {} deferred, {} failed segment(s)",
            self.lines,
            self.passthrough,
            self.reused,
            self.accepted,
            self.kept,
            self.overridden,
            self.deferred,
            self.provider_failures
        )
    }
}

/// How a committed run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every source line was processed
    Completed,
    /// The reviewer stopped at `key`; later new keys are left for the next run
    SavedAndStopped { key: String },
}

/// Result of a committed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub outcome: SessionOutcome,
    pub stats: SessionStats,
    /// The file that was written
    pub target: PathBuf,
}

/// A source/target pair ready to be processed
#[derive(Debug)]
pub struct TranslationSession {
    source: PathBuf,
    target: PathBuf,
    options: SessionOptions,
    index: ExistingTranslationIndex,
}

impl TranslationSession {
    /// Index the existing target file. A missing target is an empty index.
    pub fn open(
        source: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        options: SessionOptions,
    ) -> Result<Self, SessionError> {
        let source = source.into();
        let target = target.into();
        let index = ExistingTranslationIndex::load(&target)?;

        debug!(
            "Session {:?} -> {:?} ({} existing entries)",
            source,
            target,
            index.len()
        );

        Ok(Self {
            source,
            target,
            options,
            index,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn index(&self) -> &ExistingTranslationIndex {
        &self.index
    }

    pub fn staging_path(&self) -> PathBuf {
        FileManager::staging_path(&self.target, &self.options.staging_suffix)
    }

    /// Process the source file and commit the output.
    ///
    /// Returns an error without touching the target if the source cannot be
    /// read, the staging file cannot be written, or the reviewer goes away.
    pub async fn run(
        &self,
        provider: &dyn Provider,
        reviewer: &mut dyn Reviewer,
    ) -> Result<SessionReport, SessionError> {
        let source_error = |source| SessionError::Source {
            path: self.source.clone(),
            source,
        };

        let mut reader = BufReader::new(File::open(&self.source).map_err(source_error)?);
        let mut staging = StagingFile::create(
            &self.target,
            &self.options.staging_suffix,
            self.options.force,
        )?;

        let engine = MergeEngine::new(
            provider,
            self.options.target_language.as_str(),
            TranslationCache::new(self.options.cache_enabled),
        );

        info!(
            "Translating {:?} to {} via {}",
            self.source,
            engine.target_language(),
            provider.name()
        );

        let mut stats = SessionStats::default();
        let mut stopped_at: Option<String> = None;
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line).map_err(source_error)? == 0 {
                break;
            }
            stats.lines += 1;

            let Some(entry) = parse_line(&line) else {
                stats.passthrough += 1;
                staging.write_str(&line)?;
                continue;
            };

            // After save-and-stop: carry over what is already final, prompt for nothing
            if stopped_at.is_some() {
                match self.index.line_for(&entry.key) {
                    Some(stored) => {
                        stats.reused += 1;
                        staging.write_str(&stored)?;
                    }
                    None => stats.deferred += 1,
                }
                continue;
            }

            match engine.merge_entry(&entry, &self.index).await {
                MergeOutcome::Reused(stored) => {
                    stats.reused += 1;
                    staging.write_str(&stored)?;
                }
                MergeOutcome::NeedsReview(suggestion) => {
                    stats.provider_failures += suggestion.failed_segments;
                    let decision = reviewer.review(&suggestion.review_request(&entry, &line))?;

                    match MergeEngine::apply_decision(&entry, &suggestion, decision) {
                        EntryOutcome::Resolved { line: output, resolution } => {
                            stats.record(resolution);
                            staging.write_str(&output)?;
                        }
                        EntryOutcome::SaveAndStop => {
                            info!("Save and stop requested at '{}'", entry.key);
                            stats.deferred += 1;
                            stopped_at = Some(entry.key.clone());
                        }
                    }
                }
            }
        }

        if stats.provider_failures > 0 {
            warn!(
                "{} text segment(s) could not be translated and kept their source text",
                stats.provider_failures
            );
        }
        let (hits, misses, _) = engine.cache().stats();
        debug!("Segment cache: {} hit(s), {} miss(es)", hits, misses);

        let target = staging.commit()?;
        info!("Wrote {:?}: {}", target, stats);

        let outcome = match stopped_at {
            Some(key) => SessionOutcome::SavedAndStopped { key },
            None => SessionOutcome::Completed,
        };

        Ok(SessionReport { outcome, stats, target })
    }
}
