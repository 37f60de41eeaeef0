//! Integration tests for chordsheet
//!
//! Tests the chart pipeline end to end through the public API.

use chordsheet::{
    is_chord_line, paginate, render_chart, segment, transpose, transpose_line, ChartItem,
    ChordSymbol, Engine, EngineConfig, LiveViewer, RenderedLine, Section, FLAT_NOTES, SHARP_NOTES,
};

const CHART: &str = r#"---
title: Cuán Grande Es Él
key: G
---
[Intro]
G   C   G   D

[Verso 1]
G                    C
Señor mi Dios, al contemplar los cielos
D                    G
El firmamento y las estrellas mil

[Coro]
G        C           G
Mi corazón entona la canción
// repetir x2
"#;

#[test]
fn test_round_trip_identity() {
    let suffixes = ["", "m", "7", "maj7", "sus4", "m7/G", "add9/B"];
    for root in SHARP_NOTES.iter().chain(FLAT_NOTES.iter()) {
        for suffix in suffixes {
            let chord = format!("{}{}", root, suffix);
            for n in [-23, -11, -5, -1, 1, 4, 7, 12, 19] {
                let back = transpose(&transpose(&chord, n), -n);
                let original = ChordSymbol::parse(&chord).unwrap();
                let back = ChordSymbol::parse(&back).unwrap();
                assert!(original.same_pitches_as(&back), "{} by {}", chord, n);
            }
        }
    }
}

#[test]
fn test_zero_offset_identity() {
    assert_eq!(transpose("F#m7b5", 0), "F#m7b5");
    let line = "  G  (x2)   D/F#  Em,   Dios  ";
    assert_eq!(transpose_line(line, 0), line);
    assert_eq!(render_chart(CHART, 0).unwrap(), render_chart(CHART, 0).unwrap());
}

#[test]
fn test_modulo_wraparound() {
    assert_eq!(transpose("B", 1), "C");
    assert_eq!(transpose("C", -1), "B");
}

#[test]
fn test_slash_chord() {
    assert_eq!(transpose("D/F#", 2), "E/G#");
}

#[test]
fn test_classifier_boundary() {
    assert!(is_chord_line("G vamos D todos"));
    assert!(!is_chord_line("G vamos todos"));
}

#[test]
fn test_segmentation() {
    let sections = segment("[Coro]\nLine A\nLine B\n[Verso]\nLine C");
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title, "CORO");
    assert_eq!(sections[0].body, vec!["Line A", "Line B"]);
    assert_eq!(sections[1].title, "VERSO");
    assert_eq!(sections[1].body, vec!["Line C"]);
}

#[test]
fn test_pagination_boundary() {
    let section = |title: &str| Section {
        title: title.to_string(),
        body: vec!["a".to_string(), "b".to_string()],
    };
    let pages = paginate(&[section("A"), section("B"), section("C")], 10);
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].sections.len(), 2);
    assert_eq!(pages[1].sections[0].title, "C");
}

#[test]
fn test_oversized_section() {
    let big = Section {
        title: "CORO".to_string(),
        body: vec!["la".to_string(); 48],
    };
    let pages = paginate(&[big], 32);
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].weight(), 50);
}

#[test]
fn test_denylist_exclusion() {
    assert!(!is_chord_line("A E"));
    assert!(!is_chord_line("E"));
    assert!(!is_chord_line("A E G hola"));
}

#[test]
fn test_render_leaves_denylisted_words() {
    let layout = render_chart("A   D", 2).unwrap();
    assert_eq!(
        layout.pages[0].sections[0].lines[0],
        RenderedLine::Chord("A   E".to_string())
    );
}

#[test]
fn test_render_chart_end_to_end() {
    let layout = render_chart(CHART, 2).unwrap();
    assert_eq!(layout.pages.len(), 1);

    let sections = &layout.pages[0].sections;
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["INTRO", "VERSO 1", "CORO"]);

    assert_eq!(
        sections[0].lines[0],
        RenderedLine::Chord("A   D   A   E".to_string())
    );
    assert_eq!(sections[0].lines[1], RenderedLine::Blank);
    assert_eq!(
        sections[1].lines[1],
        RenderedLine::Lyric("Señor mi Dios, al contemplar los cielos".to_string())
    );
    assert_eq!(
        sections[2].lines[2],
        RenderedLine::Comment("repetir x2".to_string())
    );
}

#[test]
fn test_small_capacity_splits_chart() {
    let config = EngineConfig::from_yaml("page-capacity: 8").unwrap();
    let engine = config.compile().unwrap();
    let item = ChartItem::from_source(CHART).unwrap();
    let viewer = LiveViewer::new(vec![item], engine);

    let layout = viewer.render_current().unwrap();
    // INTRO 2+2, VERSO 1 2+5, CORO 2+4
    assert_eq!(layout.pages.len(), 3);
    for page in &layout.pages {
        assert_eq!(page.sections.len(), 1);
    }
}

#[test]
fn test_viewer_walkthrough() {
    let items = vec![
        ChartItem::from_source(CHART).unwrap(),
        ChartItem::new("[Coro]\nD   G   Bm   Em").with_title("Santo").with_key("D"),
    ];
    let mut viewer = LiveViewer::new(items, Engine::default());

    assert_eq!(viewer.current_title(), Some("Cuán Grande Es Él"));
    viewer.transpose_down();
    viewer.transpose_down();
    assert_eq!(viewer.current_key(), Some("F".to_string()));

    assert!(viewer.next());
    assert_eq!(viewer.semitones(), 0);
    assert_eq!(viewer.current_key(), Some("D".to_string()));

    viewer.transpose_up();
    let layout = viewer.render_current().unwrap();
    assert_eq!(
        layout.pages[0].sections[0].lines[0],
        RenderedLine::Chord("D#   G#   Cm   Fm".to_string())
    );
}

#[test]
fn test_empty_chart() {
    let layout = render_chart("", 0).unwrap();
    assert!(layout.pages.is_empty());
    let layout = render_chart("---\ntitle: Vacío\n---\n", 5).unwrap();
    assert!(layout.pages.is_empty());
}
