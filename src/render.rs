//! # Render Pipeline
//!
//! Turns a chart body into a paginated, transposed layout:
//!
//! ```text
//! body ──segment──> Vec<Section> ──paginate──> Vec<Page>
//!                                                 │
//!                  classify + transpose each line ┘──> Layout
//! ```
//!
//! Every stage is a pure function of its inputs, so a layout is recomputed from
//! scratch on each transpose step or font change.

use std::fmt;

use tracing::debug;
use serde::Serialize;

use crate::config::{Engine, DEFAULT_FONT_SIZE};
use crate::paginate::{paginate, DEFAULT_PAGE_CAPACITY};
use crate::recognizer::{ChordPolicy, LineKind, COMMENT_PREFIX};
use crate::sections::Section;

/// Values owned by the viewer that shape one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub semitones: i32,
    pub capacity: usize,
    pub font_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            semitones: 0,
            capacity: DEFAULT_PAGE_CAPACITY,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl RenderOptions {
    /// Engine defaults with the given transpose offset.
    pub fn for_engine(engine: &Engine, semitones: i32) -> Self {
        Self {
            semitones,
            capacity: engine.page_capacity,
            font_size: engine.fonts.default,
        }
    }
}

/// One displayed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum RenderedLine {
    /// Chord notation, already transposed
    Chord(String),
    Lyric(String),
    /// Annotation text without the `//` marker
    Comment(String),
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSection {
    pub title: String,
    pub lines: Vec<RenderedLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    /// 1-based page number
    pub number: usize,
    pub sections: Vec<RenderedSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub semitones: i32,
    pub font_size: u32,
    pub pages: Vec<RenderedPage>,
}

fn render_line(line: &str, semitones: i32, policy: &ChordPolicy) -> RenderedLine {
    match policy.classify_line(line) {
        LineKind::Blank => RenderedLine::Blank,
        LineKind::Comment => {
            let text = line.trim().trim_start_matches(COMMENT_PREFIX).trim();
            RenderedLine::Comment(text.to_string())
        }
        LineKind::Chord => RenderedLine::Chord(policy.transpose_line(line, semitones)),
        LineKind::Lyric => RenderedLine::Lyric(line.to_string()),
    }
}

fn render_section(section: &Section, semitones: i32, policy: &ChordPolicy) -> RenderedSection {
    RenderedSection {
        title: section.title.clone(),
        lines: section
            .body
            .iter()
            .map(|line| render_line(line, semitones, policy))
            .collect(),
    }
}

/// Render a chart body into pages.
///
/// # Example
/// ```
/// use chordsheet::{render, Engine, RenderOptions, RenderedLine};
///
/// let engine = Engine::default();
/// let options = RenderOptions { semitones: 2, ..RenderOptions::default() };
/// let layout = render("[Coro]\nG    C\nSanto es", &options, &engine);
///
/// assert_eq!(layout.pages.len(), 1);
/// let coro = &layout.pages[0].sections[0];
/// assert_eq!(coro.title, "CORO");
/// assert_eq!(coro.lines[0], RenderedLine::Chord("A    D".to_string()));
/// assert_eq!(coro.lines[1], RenderedLine::Lyric("Santo es".to_string()));
/// ```
pub fn render(body: &str, options: &RenderOptions, engine: &Engine) -> Layout {
    let sections = engine.headers.segment(body);
    let pages = paginate(&sections, options.capacity);
    debug!(
        "Rendered {} sections onto {} pages (transpose {:+}, capacity {})",
        sections.len(),
        pages.len(),
        options.semitones,
        options.capacity
    );

    Layout {
        semitones: options.semitones,
        font_size: options.font_size,
        pages: pages
            .iter()
            .enumerate()
            .map(|(i, page)| RenderedPage {
                number: i + 1,
                sections: page
                    .sections
                    .iter()
                    .map(|section| render_section(section, options.semitones, &engine.policy))
                    .collect(),
            })
            .collect(),
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for page in &self.pages {
            writeln!(f, "── page {} of {} ──", page.number, self.pages.len())?;
            for section in &page.sections {
                if !section.title.is_empty() {
                    writeln!(f, "[{}]", section.title)?;
                }
                for line in &section.lines {
                    match line {
                        RenderedLine::Chord(text) | RenderedLine::Lyric(text) => {
                            writeln!(f, "{}", text)?
                        }
                        RenderedLine::Comment(text) => writeln!(f, "  ({})", text)?,
                        RenderedLine::Blank => writeln!(f)?,
                    }
                }
            }
        }
        Ok(())
    }
}
