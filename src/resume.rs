/*!
 * Resume support: index of lines already written to the target file.
 *
 * A previous (possibly interrupted) run leaves a target file whose entry
 * lines are final. Those lines are reused byte-for-byte so a re-run never
 * asks about a key twice.
 */

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use log::{debug, info, warn};

use crate::entry::parse_line;
use crate::errors::ResumeError;

/// Key → exact output line previously written for that key
#[derive(Debug, Default, Clone)]
pub struct ExistingTranslationIndex {
    lines: HashMap<String, String>,
    duplicates: usize,
}

impl ExistingTranslationIndex {
    /// An empty index (no target file yet)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the index from a target file.
    ///
    /// A missing file yields an empty index. Any other failure (permissions,
    /// a directory in the way, invalid UTF-8) is reported as
    /// [`ResumeError::Unreadable`].
    pub fn load(path: &Path) -> Result<Self, ResumeError> {
        let unreadable = |source| ResumeError::Unreadable {
            path: path.to_path_buf(),
            source,
        };

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No existing translation at {:?}, starting fresh", path);
                return Ok(Self::empty());
            }
            Err(e) => return Err(unreadable(e)),
        };

        let index = Self::from_reader(BufReader::new(file)).map_err(unreadable)?;

        info!(
            "Loaded {} existing translation(s) from {:?}",
            index.len(),
            path
        );
        Ok(index)
    }

    /// Build the index from any line source. Last occurrence of a key wins.
    pub fn from_reader<R: BufRead>(mut reader: R) -> std::io::Result<Self> {
        let mut index = Self::empty();
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            if let Some(entry) = parse_line(&line) {
                index.insert(entry.key, line.clone());
            }
        }

        if index.duplicates > 0 {
            warn!(
                "Existing translation contains {} duplicate key(s); the last occurrence of each is used",
                index.duplicates
            );
        }
        Ok(index)
    }

    fn insert(&mut self, key: String, line: String) {
        if self.lines.insert(key, line).is_some() {
            self.duplicates += 1;
        }
    }

    /// The stored line for `key`, terminated by a newline.
    ///
    /// The content is returned unchanged; a newline is only added when the
    /// stored line was the unterminated last line of the file.
    pub fn line_for(&self, key: &str) -> Option<Cow<'_, str>> {
        self.lines.get(key).map(|line| {
            if line.ends_with('\n') {
                Cow::Borrowed(line.as_str())
            } else {
                Cow::Owned(format!("{}\n", line))
            }
        })
    }

    /// Whether `key` already has a final translation
    pub fn contains(&self, key: &str) -> bool {
        self.lines.contains_key(key)
    }

    /// Number of indexed keys
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of duplicate key occurrences that were overridden
    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }
}
