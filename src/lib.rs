/*!
 * # YAMLer - interactive machine translation of YAML message files
 *
 * Translates the quoted values of a flat `key: "value"` message file (the
 * kind used by game server plugins) line by line, with a human reviewer
 * confirming every new value.
 *
 * ## Features
 *
 * - Placeholders (`%player%`), color codes (`&4`), markup tags and literal
 *   newlines are never sent to the translator
 * - Keys already present in the target file are reused, so an interrupted
 *   run can be resumed
 * - Output is staged and atomically renamed over the target
 * - Google web translate, Ollama and Anthropic backends
 *
 * ## Architecture
 *
 * - `entry`: classifies lines into entries and passthrough lines
 * - `segments`: splits a value into translatable text and protected tokens
 * - `providers`: translation backends behind the `Provider` trait
 * - `translation`: merge engine and segment cache
 * - `resume`: index of lines already in the target file
 * - `review`: reviewer decisions and review channels
 * - `session`: one pass over a source file with atomic commit
 * - `browser`: interactive directory and file selection
 * - `app_config`: configuration management
 * - `file_utils`: file listing and the staging file
 * - `language_utils`: ISO language code utilities
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod browser;
pub mod entry;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod resume;
pub mod review;
pub mod segments;
pub mod session;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use entry::{ParsedEntry, QuoteStyle, parse_line};
pub use errors::{AppError, ProviderError, ResumeError, ReviewError, SessionError};
pub use language_utils::{get_language_name, normalize_to_part2t};
pub use providers::Provider;
pub use resume::ExistingTranslationIndex;
pub use review::{ConsoleReviewer, ReviewDecision, Reviewer, ScriptedReviewer};
pub use segments::{Segment, SegmentKind, TokenClass, join_segments, split_segments};
pub use session::{SessionOptions, SessionOutcome, SessionReport, SessionStats, TranslationSession};
