/*!
 * Common test utilities for the yamler test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use yamler::session::SessionOptions;

// Re-export the mock providers module
pub mod mock_providers;

/// A small plugin message file with placeholders, color codes and tags
pub const SAMPLE_SOURCE: &str = concat!(
    "# Plugin messages\n",
    "prefix: '&6[Shop]&r '\n",
    "greeting: \"Hello %player%!\"\n",
    "\n",
    "farewell: 'Goodbye, <gradient>friend</gradient>'\n",
    "click: \"<click:run_command:/help>Click here</click> for help\"\n",
    "nested:\n",
    "  warning: '<red>Don''t do that</red>'\n",
);

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Reads a file that the test expects to exist
pub fn read_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {:?}: {}", path, e))
}

/// Session options used across the integration tests
pub fn session_options() -> SessionOptions {
    SessionOptions {
        target_language: "ru".to_string(),
        ..SessionOptions::default()
    }
}

/// Route library logs to the test output when RUST_LOG is set
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
