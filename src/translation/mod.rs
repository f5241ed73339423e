/*!
 * Translation of entry values.
 *
 * - `merge`: reuse-or-suggest decision per key, segment translation and
 *   application of the reviewer's decision
 * - `cache`: per-run cache of segment translations
 */

// Re-export main types for easier usage
pub use self::cache::TranslationCache;
pub use self::merge::{EntryOutcome, MergeEngine, MergeOutcome, Resolution, Suggestion};

// Submodules
pub mod cache;
pub mod merge;
