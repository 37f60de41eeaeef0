pub mod chart;
pub mod chord;
pub mod config;
pub mod error;
pub mod paginate;
pub mod recognizer;
pub mod render;
pub mod sections;
pub mod setlist;
pub mod transpose;
pub mod viewer;

use once_cell::sync::Lazy;

pub use chart::{parse_chart, Chart, ChartMetadata, TimeSignature};
pub use chord::{pitch_class, ChordSymbol, Spelling, FLAT_NOTES, SHARP_NOTES};
pub use config::{Engine, EngineConfig, FontRange};
pub use error::*;
pub use paginate::{paginate, section_weight, Page, DEFAULT_PAGE_CAPACITY};
pub use recognizer::{
    ChordPolicy, LineKind, DEFAULT_CHORD_LINE_THRESHOLD, DEFAULT_DENIED_WORDS,
};
pub use render::{render, Layout, RenderOptions, RenderedLine, RenderedPage, RenderedSection};
pub use sections::{segment, Section, SectionHeaders, DEFAULT_SECTION_KEYWORDS};
pub use setlist::{Setlist, SetlistEntry};
pub use transpose::{transpose, transposed_key};
pub use viewer::{ChartItem, LiveViewer, ViewerSnapshot};

static DEFAULT_POLICY: Lazy<ChordPolicy> = Lazy::new(ChordPolicy::default);

/// Classify a line with the default threshold and denylist.
pub fn is_chord_line(line: &str) -> bool {
    DEFAULT_POLICY.is_chord_line(line)
}

/// Transpose the chord tokens of any text with the default denylist.
pub fn transpose_line(line: &str, semitones: i32) -> String {
    DEFAULT_POLICY.transpose_line(line, semitones)
}

/// Parse a chart source and render it with the default engine.
/// This is the main entry point for the library.
pub fn render_chart(source: &str, semitones: i32) -> Result<Layout, ChartError> {
    let chart = parse_chart(source)?;
    let engine = Engine::default();
    Ok(render(&chart.body, &RenderOptions::for_engine(&engine, semitones), &engine))
}
