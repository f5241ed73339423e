/*!
 * Interactive selection of the source and target files.
 *
 * The browser asks for a directory, lists its YAML files page by page and
 * asks for the name of the file to write. Pagination is kept separate from
 * the terminal loop so it can be tested without I/O.
 */

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::debug;

use crate::file_utils::FileManager;

/// One answer to the file list prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserCommand {
    Next,
    Previous,
    Quit,
    /// 1-based position on the current page
    Select(usize),
}

impl BrowserCommand {
    /// `n`, `p`, `q` (case-insensitive) or a number
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim().to_lowercase();
        match input.as_str() {
            "n" => Some(Self::Next),
            "p" => Some(Self::Previous),
            "q" => Some(Self::Quit),
            other => other.parse().ok().map(Self::Select),
        }
    }
}

/// What happened after a command was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    /// Page changed; show it again
    Moved,
    /// The user picked a file
    Selected(PathBuf),
    Quit,
    /// The command could not be applied; show the message and ask again
    Rejected(&'static str),
}

/// Page-by-page view over a list of files
#[derive(Debug)]
pub struct Pager<'a> {
    files: &'a [PathBuf],
    page_size: usize,
    page: usize,
}

impl<'a> Pager<'a> {
    pub fn new(files: &'a [PathBuf], page_size: usize) -> Self {
        Self {
            files,
            page_size: page_size.max(1),
            page: 0,
        }
    }

    /// Total number of pages (0 when there are no files)
    pub fn page_count(&self) -> usize {
        self.files.len().div_ceil(self.page_size)
    }

    /// 1-based number of the current page
    pub fn page_number(&self) -> usize {
        self.page + 1
    }

    /// Files shown on the current page
    pub fn current_page(&self) -> &'a [PathBuf] {
        let start = (self.page * self.page_size).min(self.files.len());
        let end = (start + self.page_size).min(self.files.len());
        &self.files[start..end]
    }

    pub fn apply(&mut self, command: BrowserCommand) -> PageAction {
        match command {
            BrowserCommand::Next if self.page_number() < self.page_count() => {
                self.page += 1;
                PageAction::Moved
            }
            BrowserCommand::Next => PageAction::Rejected("This is the last page."),
            BrowserCommand::Previous if self.page > 0 => {
                self.page -= 1;
                PageAction::Moved
            }
            BrowserCommand::Previous => PageAction::Rejected("This is the first page."),
            BrowserCommand::Quit => PageAction::Quit,
            BrowserCommand::Select(number) => match number.checked_sub(1).and_then(|i| self.current_page().get(i)) {
                Some(path) => PageAction::Selected(path.clone()),
                None => PageAction::Rejected("Invalid number."),
            },
        }
    }
}

/// Terminal dialogue for choosing files
pub struct FileBrowser<R, W> {
    input: R,
    output: W,
    page_size: usize,
}

impl<R: BufRead, W: Write> FileBrowser<R, W> {
    pub fn new(input: R, output: W, page_size: usize) -> Self {
        Self {
            input,
            output,
            page_size,
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .context("Failed to read from input")?;
        if read == 0 {
            return Err(anyhow!("Input closed"));
        }
        Ok(answer.trim().to_string())
    }

    /// Ask for a directory. Empty input selects `current_dir`.
    pub fn prompt_directory(&mut self, current_dir: &Path) -> Result<PathBuf> {
        loop {
            let answer = self.ask("Directory path (Enter for the current directory): ")?;
            if answer.is_empty() {
                return Ok(current_dir.to_path_buf());
            }

            let path = PathBuf::from(&answer);
            if FileManager::dir_exists(&path) {
                return Ok(path.canonicalize().unwrap_or(path));
            }
            writeln!(self.output, "Error: directory does not exist: {}", answer)?;
        }
    }

    /// List the YAML files of `dir` and let the user pick one.
    /// Returns `None` when there is nothing to pick or the user quits.
    pub fn select_file(&mut self, dir: &Path) -> Result<Option<PathBuf>> {
        let files = FileManager::list_yaml_files(dir)?;
        debug!("Found {} YAML file(s) in {:?}", files.len(), dir);

        if files.is_empty() {
            writeln!(self.output, "No YAML files found.")?;
            return Ok(None);
        }

        let mut pager = Pager::new(&files, self.page_size);
        let mut show_page = true;

        loop {
            if show_page {
                writeln!(self.output, "\nPage {}/{}", pager.page_number(), pager.page_count())?;
                for (i, path) in pager.current_page().iter().enumerate() {
                    let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
                    writeln!(self.output, "{}. {}", i + 1, name)?;
                }
            }

            let answer = self.ask("File number, 'n' next page, 'p' previous page, 'q' quit: ")?;
            let action = match BrowserCommand::parse(&answer) {
                Some(command) => pager.apply(command),
                None => PageAction::Rejected("Invalid command."),
            };

            show_page = match action {
                PageAction::Moved => true,
                PageAction::Selected(path) => return Ok(Some(path)),
                PageAction::Quit => return Ok(None),
                PageAction::Rejected(message) => {
                    writeln!(self.output, "{}", message)?;
                    false
                }
            };
        }
    }

    /// Ask for the output file name inside `dir`; `.yml` is appended if missing
    pub fn prompt_target_name(&mut self, dir: &Path) -> Result<PathBuf> {
        loop {
            let answer = self.ask("Target file name (without .yml): ")?;
            if answer.is_empty() {
                writeln!(self.output, "The file name cannot be empty.")?;
                continue;
            }
            return Ok(dir.join(FileManager::with_yml_extension(&answer)));
        }
    }
}
