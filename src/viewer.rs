//! # Live Viewer State
//!
//! The state a performer steps through during a set: which chart is showing,
//! how far it is transposed and how large the text is.
//!
//! The transpose offset belongs to the viewer, not to the chart. Selecting a
//! different chart resets it to zero.

use std::fmt;

use tracing::warn;
use serde::Serialize;

use crate::chart::parse_chart;
use crate::config::Engine;
use crate::error::ChartError;
use crate::render::{render, Layout, RenderOptions};
use crate::transpose::transposed_key;

/// One performable item of a set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChartItem {
    pub title: Option<String>,
    /// Key the chart is written in
    pub key: Option<String>,
    /// Chart body without front matter
    pub content: String,
}

impl ChartItem {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Build an item from a chart source, taking title and key from its front
    /// matter.
    pub fn from_source(source: &str) -> Result<Self, ChartError> {
        let chart = parse_chart(source)?;
        Ok(Self {
            title: chart.metadata.title,
            key: chart.metadata.key,
            content: chart.body,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// Everything needed to draw the current chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerSnapshot {
    /// 1-based position in the set
    pub position: usize,
    pub total: usize,
    pub title: Option<String>,
    /// Key after transposition
    pub key: Option<String>,
    pub layout: Layout,
}

impl fmt::Display for ViewerSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} {}",
            self.position,
            self.total,
            self.title.as_deref().unwrap_or("(untitled)")
        )?;
        if let Some(key) = &self.key {
            write!(f, " in {}", key)?;
        }
        if self.layout.semitones != 0 {
            write!(f, " (transpose {:+})", self.layout.semitones)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.layout)
    }
}

#[derive(Debug, Clone)]
pub struct LiveViewer {
    items: Vec<ChartItem>,
    engine: Engine,
    selected: usize,
    semitones: i32,
    font_size: u32,
}

impl LiveViewer {
    pub fn new(items: Vec<ChartItem>, engine: Engine) -> Self {
        let font_size = engine.fonts.default;
        Self {
            items,
            engine,
            selected: 0,
            semitones: 0,
            font_size,
        }
    }

    pub fn items(&self) -> &[ChartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn semitones(&self) -> i32 {
        self.semitones
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn current(&self) -> Option<&ChartItem> {
        self.items.get(self.selected)
    }

    /// Show the chart at `index`.
    ///
    /// Moving to a different chart resets the transpose offset. Returns `false`
    /// and changes nothing when `index` is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        if index != self.selected {
            self.selected = index;
            self.semitones = 0;
        }
        true
    }

    pub fn next(&mut self) -> bool {
        self.select(self.selected + 1)
    }

    pub fn previous(&mut self) -> bool {
        match self.selected.checked_sub(1) {
            Some(index) => self.select(index),
            None => false,
        }
    }

    /// Set the transpose offset, clamped to the configured range.
    pub fn set_transpose(&mut self, semitones: i32) -> i32 {
        let clamped = self.engine.clamp_transpose(semitones);
        if clamped != semitones {
            warn!(
                "Transpose {:+} is outside ±{}, using {:+}",
                semitones, self.engine.transpose_range, clamped
            );
        }
        self.semitones = clamped;
        clamped
    }

    pub fn transpose_up(&mut self) -> i32 {
        self.semitones = self.engine.clamp_transpose(self.semitones + 1);
        self.semitones
    }

    pub fn transpose_down(&mut self) -> i32 {
        self.semitones = self.engine.clamp_transpose(self.semitones - 1);
        self.semitones
    }

    pub fn increase_font(&mut self) -> u32 {
        self.font_size = self.engine.fonts.larger(self.font_size);
        self.font_size
    }

    pub fn decrease_font(&mut self) -> u32 {
        self.font_size = self.engine.fonts.smaller(self.font_size);
        self.font_size
    }

    pub fn current_title(&self) -> Option<&str> {
        self.current()?.title.as_deref()
    }

    /// Key of the current chart after transposition.
    pub fn current_key(&self) -> Option<String> {
        let key = self.current()?.key.as_deref()?;
        Some(transposed_key(key, self.semitones))
    }

    pub fn render_current(&self) -> Option<Layout> {
        let item = self.current()?;
        let options = RenderOptions {
            semitones: self.semitones,
            capacity: self.engine.page_capacity,
            font_size: self.font_size,
        };
        Some(render(&item.content, &options, &self.engine))
    }

    pub fn snapshot(&self) -> Option<ViewerSnapshot> {
        Some(ViewerSnapshot {
            position: self.selected + 1,
            total: self.items.len(),
            title: self.current_title().map(str::to_string),
            key: self.current_key(),
            layout: self.render_current()?,
        })
    }
}
