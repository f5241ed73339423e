/*!
 * Error types for the yamler application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when working with translation backends
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised while loading the existing translation file
#[derive(Error, Debug)]
pub enum ResumeError {
    /// The target exists but could not be read
    #[error("Existing translation file {path:?} is unreadable: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the review channel
#[derive(Error, Debug)]
pub enum ReviewError {
    /// The reviewer stopped answering (end of input)
    #[error("Review channel closed before a decision was made")]
    ChannelClosed,

    /// Reading or writing the review channel failed
    #[error("Review channel I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a translation session
#[derive(Error, Debug)]
pub enum SessionError {
    /// Building the resume index failed
    #[error(transparent)]
    Resume(#[from] ResumeError),

    /// Reading the source file failed
    #[error("Failed to read source file {path:?}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Another run holds the staging file, or a stale one was left behind
    #[error("Staging file {0:?} already exists (another run in progress? use --force to discard it)")]
    StagingInUse(PathBuf),

    /// Writing the staging file failed
    #[error("Failed to write staging file {path:?}: {source}")]
    Staging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Renaming the staging file over the target failed
    #[error("Failed to commit {staging:?} to {target:?}: {source}")]
    Commit {
        staging: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The reviewer could not be consulted
    #[error("Review aborted: {0}")]
    Review(#[from] ReviewError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from a translation session
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
