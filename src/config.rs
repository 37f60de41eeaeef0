//! # Engine Configuration
//!
//! Policy knobs for the chart pipeline, loadable from YAML.
//!
//! Every key is optional; missing keys take the defaults below.
//!
//! ```yaml
//! page-capacity: 32
//! chord-line-threshold: 0.5
//! denied-words: [A, E]
//! section-keywords: [INTRO, VERSO, CORO, PUENTE, CHORUS, VERSE, BRIDGE, FINAL,
//!                    OUTRO, SOLO, INSTRUMENTAL, PRE-CORO, INTERLUDIO, RAP]
//! transpose-range: 11
//! font-size: 20
//! min-font-size: 12
//! max-font-size: 48
//! font-size-step: 2
//! ```
//!
//! [`EngineConfig::compile`] validates the values and builds an [`Engine`],
//! which holds the compiled classifier policy and header matcher.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ChartError;
use crate::paginate::DEFAULT_PAGE_CAPACITY;
use crate::recognizer::{ChordPolicy, DEFAULT_CHORD_LINE_THRESHOLD, DEFAULT_DENIED_WORDS};
use crate::sections::{SectionHeaders, DEFAULT_SECTION_KEYWORDS};

/// Largest transpose offset a viewer may reach in either direction.
pub const DEFAULT_TRANSPOSE_RANGE: i32 = 11;

pub const DEFAULT_FONT_SIZE: u32 = 20;
pub const DEFAULT_MIN_FONT_SIZE: u32 = 12;
pub const DEFAULT_MAX_FONT_SIZE: u32 = 48;
pub const DEFAULT_FONT_SIZE_STEP: u32 = 2;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct EngineConfig {
    pub page_capacity: usize,
    pub chord_line_threshold: f64,
    pub denied_words: Vec<String>,
    pub section_keywords: Vec<String>,
    pub transpose_range: i32,
    pub font_size: u32,
    pub min_font_size: u32,
    pub max_font_size: u32,
    pub font_size_step: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_capacity: DEFAULT_PAGE_CAPACITY,
            chord_line_threshold: DEFAULT_CHORD_LINE_THRESHOLD,
            denied_words: DEFAULT_DENIED_WORDS.iter().map(|w| w.to_string()).collect(),
            section_keywords: DEFAULT_SECTION_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            transpose_range: DEFAULT_TRANSPOSE_RANGE,
            font_size: DEFAULT_FONT_SIZE,
            min_font_size: DEFAULT_MIN_FONT_SIZE,
            max_font_size: DEFAULT_MAX_FONT_SIZE,
            font_size_step: DEFAULT_FONT_SIZE_STEP,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml(content: &str) -> Result<Self, ChartError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ChartError::ConfigError(e.to_string()))
    }

    /// Read configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ChartError::io(path, e))?;
        Self::from_yaml(&content)
    }

    fn validate(&self) -> Result<(), ChartError> {
        if self.page_capacity == 0 {
            return Err(ChartError::ConfigError(
                "page-capacity must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.chord_line_threshold) {
            return Err(ChartError::ConfigError(format!(
                "chord-line-threshold must be between 0 and 1, got {}",
                self.chord_line_threshold
            )));
        }
        if !(0..=11).contains(&self.transpose_range) {
            return Err(ChartError::ConfigError(format!(
                "transpose-range must be between 0 and 11, got {}",
                self.transpose_range
            )));
        }
        if self.font_size_step == 0 {
            return Err(ChartError::ConfigError(
                "font-size-step must be greater than zero".to_string(),
            ));
        }
        if !(self.min_font_size <= self.font_size && self.font_size <= self.max_font_size) {
            return Err(ChartError::ConfigError(format!(
                "font-size {} is outside {}..={}",
                self.font_size, self.min_font_size, self.max_font_size
            )));
        }
        Ok(())
    }

    /// Validate and build the engine.
    ///
    /// # Example
    /// ```
    /// use chordsheet::EngineConfig;
    ///
    /// let config = EngineConfig::from_yaml("page-capacity: 40\ndenied-words: []")?;
    /// let engine = config.compile()?;
    /// assert_eq!(engine.page_capacity, 40);
    /// assert!(engine.policy.is_chord_line("A ti"));
    /// # Ok::<(), chordsheet::ChartError>(())
    /// ```
    pub fn compile(&self) -> Result<Engine, ChartError> {
        self.validate()?;
        Ok(Engine {
            policy: ChordPolicy::new(self.chord_line_threshold, self.denied_words.iter().cloned()),
            headers: SectionHeaders::new(&self.section_keywords)?,
            page_capacity: self.page_capacity,
            transpose_range: self.transpose_range,
            fonts: FontRange {
                default: self.font_size,
                min: self.min_font_size,
                max: self.max_font_size,
                step: self.font_size_step,
            },
        })
    }
}

/// Font sizes a viewer may step through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontRange {
    pub default: u32,
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl FontRange {
    pub fn larger(&self, size: u32) -> u32 {
        size.saturating_add(self.step).min(self.max)
    }

    pub fn smaller(&self, size: u32) -> u32 {
        size.saturating_sub(self.step).max(self.min)
    }
}

/// Compiled pipeline policy.
#[derive(Debug, Clone)]
pub struct Engine {
    pub policy: ChordPolicy,
    pub headers: SectionHeaders,
    pub page_capacity: usize,
    pub transpose_range: i32,
    pub fonts: FontRange,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            policy: ChordPolicy::default(),
            headers: SectionHeaders::default(),
            page_capacity: DEFAULT_PAGE_CAPACITY,
            transpose_range: DEFAULT_TRANSPOSE_RANGE,
            fonts: FontRange {
                default: DEFAULT_FONT_SIZE,
                min: DEFAULT_MIN_FONT_SIZE,
                max: DEFAULT_MAX_FONT_SIZE,
                step: DEFAULT_FONT_SIZE_STEP,
            },
        }
    }
}

impl Engine {
    /// Clamp a transpose offset into the configured range.
    pub fn clamp_transpose(&self, semitones: i32) -> i32 {
        semitones.clamp(-self.transpose_range, self.transpose_range)
    }
}
