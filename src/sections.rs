//! # Section Segmenter
//!
//! Splits raw chart text into titled sections (verse, chorus, bridge, ...).
//!
//! ## Header Lines
//! A trimmed line is a section header when it matches
//!
//! ```text
//! \[? KEYWORD <anything> \]? :?
//! ```
//!
//! case-insensitively, where `KEYWORD` is one of the configured section
//! keywords. The section title is the keyword plus its trailing text,
//! uppercased: `[Verso 2]:` becomes `VERSO 2`.
//!
//! ## Bodies
//! Every other line, blank lines included, is appended untrimmed to the body of
//! the current section. Text before the first header forms an untitled section.
//!
//! ## Example
//! ```rust
//! use chordsheet::segment;
//!
//! let sections = segment("[Coro]\nLine A\nLine B\n[Verso]\nLine C");
//! assert_eq!(sections.len(), 2);
//! assert_eq!(sections[0].title, "CORO");
//! assert_eq!(sections[0].body, vec!["Line A", "Line B"]);
//! assert_eq!(sections[1].title, "VERSO");
//! assert_eq!(sections[1].body, vec!["Line C"]);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::ChartError;

/// Section keywords recognised in header lines.
pub const DEFAULT_SECTION_KEYWORDS: &[&str] = &[
    "INTRO",
    "VERSO",
    "CORO",
    "PUENTE",
    "CHORUS",
    "VERSE",
    "BRIDGE",
    "FINAL",
    "OUTRO",
    "SOLO",
    "INSTRUMENTAL",
    "PRE-CORO",
    "INTERLUDIO",
    "RAP",
];

static DEFAULT_HEADERS: Lazy<SectionHeaders> = Lazy::new(SectionHeaders::default);

/// A titled run of chart lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Section {
    pub title: String,
    pub body: Vec<String>,
}

impl Section {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: Vec::new(),
        }
    }

    /// No title and no body lines.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.body.is_empty()
    }
}

/// Compiled header matcher for a keyword set.
#[derive(Debug, Clone)]
pub struct SectionHeaders {
    keywords: Vec<String>,
    pattern: Regex,
}

impl Default for SectionHeaders {
    fn default() -> Self {
        let keywords: Vec<String> = DEFAULT_SECTION_KEYWORDS.iter().map(|k| k.to_string()).collect();
        let pattern = header_pattern(&keywords).expect("default section keywords are valid");
        Self { keywords, pattern }
    }
}

fn header_pattern(keywords: &[String]) -> Result<Regex, regex::Error> {
    // Longest first so a keyword never shadows a longer one sharing its prefix
    let mut sorted: Vec<&String> = keywords.iter().collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let alternation = sorted
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)^\[?((?:{})(.*?))\]?:?$", alternation))
}

impl SectionHeaders {
    /// Build a matcher for a custom keyword set.
    ///
    /// # Errors
    /// Returns [`ChartError::ConfigError`] when the set is empty or contains a
    /// blank keyword.
    pub fn new<I, S>(keywords: I) -> Result<Self, ChartError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .collect();

        if keywords.is_empty() {
            return Err(ChartError::ConfigError(
                "section-keywords must not be empty".to_string(),
            ));
        }
        if keywords.iter().any(|k| k.is_empty()) {
            return Err(ChartError::ConfigError(
                "section-keywords must not contain blank entries".to_string(),
            ));
        }

        let pattern =
            header_pattern(&keywords).map_err(|e| ChartError::ConfigError(e.to_string()))?;
        Ok(Self { keywords, pattern })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Section title for `line` if it is a header line.
    pub fn header_title(&self, line: &str) -> Option<String> {
        let caps = self.pattern.captures(line.trim())?;
        Some(caps.get(1)?.as_str().trim().to_uppercase())
    }

    /// Split chart text into sections.
    ///
    /// Empty content yields a single empty section.
    pub fn segment(&self, content: &str) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut current = Section::default();

        if !content.is_empty() {
            for raw in content.split('\n') {
                let line = raw.strip_suffix('\r').unwrap_or(raw);
                match self.header_title(line) {
                    Some(title) => {
                        let finished = std::mem::replace(&mut current, Section::titled(title));
                        if !finished.is_empty() {
                            sections.push(finished);
                        }
                    }
                    None => current.body.push(line.to_string()),
                }
            }
        }

        if !current.is_empty() || sections.is_empty() {
            sections.push(current);
        }
        sections
    }
}

/// Split chart text into sections using the default keyword set.
pub fn segment(content: &str) -> Vec<Section> {
    DEFAULT_HEADERS.segment(content)
}
