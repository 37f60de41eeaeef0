//! # Error Types
//!
//! This module defines the error type for the loading surfaces of the crate.
//!
//! The chart pipeline itself (recognizer, transposition, segmenter, paginator,
//! renderer) is total and never fails. Errors only come from reading charts,
//! engine configuration and setlists.
//!
//! ## Error Types
//! - `MetadataError` - Invalid YAML front matter in a chart
//! - `ConfigError` - Invalid engine configuration
//! - `SetlistError` - Invalid setlist file or entry
//! - `Io` - A file could not be read
//!
//! ## Usage
//! ```rust
//! use chordsheet::{parse_chart, ChartError};
//!
//! let source = "---\ntitle: [unclosed\n---\nG C D";
//! match parse_chart(source) {
//!     Ok(chart) => println!("{} lines", chart.body.lines().count()),
//!     Err(ChartError::MetadataError(message)) => eprintln!("Bad front matter: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    /// Invalid chart metadata.
    ///
    /// Occurs when the YAML front matter of a chart is malformed or contains
    /// unsupported keys.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChartError;
    /// let err = ChartError::MetadataError("unknown field `tonality`".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: unknown field `tonality`");
    /// ```
    #[error("Invalid metadata: {0}")]
    MetadataError(String),

    /// Invalid engine configuration.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChartError;
    /// let err = ChartError::ConfigError("page-capacity must be greater than zero".to_string());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid configuration: page-capacity must be greater than zero"
    /// );
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Invalid setlist.
    ///
    /// Occurs when a setlist file is not valid YAML, an entry does not name
    /// exactly one chart source, or an entry's key override is not a chord.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChartError;
    /// let err = ChartError::SetlistError("item 2 has neither `file` nor `content`".to_string());
    /// assert_eq!(err.to_string(), "Invalid setlist: item 2 has neither `file` nor `content`");
    /// ```
    #[error("Invalid setlist: {0}")]
    SetlistError(String),

    /// A chart, configuration or setlist file could not be read.
    #[error("Cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ChartError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChartError::Io {
            path: path.into(),
            source,
        }
    }
}
