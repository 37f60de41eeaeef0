//! # Chord Symbol Types
//!
//! Pitch-class spelling tables and the [`ChordSymbol`] value type.
//!
//! ## Pitch Classes
//! The twelve pitch classes are stored as two parallel tables indexed 0-11
//! from C. Index arithmetic is shared between both spellings; only the
//! displayed name differs:
//!
//! ```text
//! index   0  1   2  3   4  5  6   7  8   9  10  11
//! sharp   C  C#  D  D#  E  F  F#  G  G#  A  A#  B
//! flat    C  Db  D  Eb  E  F  Gb  G  Ab  A  Bb  B
//! ```
//!
//! Enharmonic spellings outside these tables (`Cb`, `E#`, `Fb`, `B#`) are not
//! pitch classes for the purposes of this crate and are left untouched by
//! transposition.
//!
//! ## Chord Symbols
//! A chord symbol is a root, an opaque suffix (`m7`, `sus4`, `maj9`, ...) and an
//! optional bass note after a slash (`D/F#`).

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Sharp-spelled pitch classes, indexed from C.
pub const SHARP_NOTES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat-spelled pitch classes, indexed from C.
pub const FLAT_NOTES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Root note followed by everything else.
pub(crate) static ROOT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-G][#b]?)(.*)$").expect("root pattern is valid"));

/// Which of the two pitch-class tables to spell notes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spelling {
    Sharp,
    Flat,
}

impl Spelling {
    pub fn table(self) -> &'static [&'static str; 12] {
        match self {
            Spelling::Sharp => &SHARP_NOTES,
            Spelling::Flat => &FLAT_NOTES,
        }
    }

    pub fn other(self) -> Spelling {
        match self {
            Spelling::Sharp => Spelling::Flat,
            Spelling::Flat => Spelling::Sharp,
        }
    }

    /// Index of `name` in this spelling's table.
    pub fn index_of(self, name: &str) -> Option<usize> {
        self.table().iter().position(|n| *n == name)
    }
}

/// Pitch-class index (0 = C) of a note name in either spelling.
pub fn pitch_class(name: &str) -> Option<usize> {
    Spelling::Sharp
        .index_of(name)
        .or_else(|| Spelling::Flat.index_of(name))
}

/// A parsed chord symbol such as `Am7`, `Bbsus4` or `D/F#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordSymbol {
    pub root: String,
    pub suffix: String,
    pub bass: Option<String>,
}

impl ChordSymbol {
    /// Parse a chord symbol.
    ///
    /// Returns `None` when the root or the bass note is not one of the twelve
    /// pitch classes.
    ///
    /// # Example
    /// ```
    /// use chordsheet::ChordSymbol;
    ///
    /// let chord = ChordSymbol::parse("Dm7/C").unwrap();
    /// assert_eq!(chord.root, "D");
    /// assert_eq!(chord.suffix, "m7");
    /// assert_eq!(chord.bass.as_deref(), Some("C"));
    ///
    /// assert!(ChordSymbol::parse("Hm").is_none());
    /// ```
    pub fn parse(symbol: &str) -> Option<Self> {
        let (head, bass) = match symbol.split_once('/') {
            Some((head, bass)) => {
                pitch_class(bass)?;
                (head, Some(bass.to_string()))
            }
            None => (symbol, None),
        };

        let caps = ROOT_PATTERN.captures(head)?;
        let root = caps.get(1)?.as_str();
        pitch_class(root)?;

        Some(ChordSymbol {
            root: root.to_string(),
            suffix: caps.get(2).map_or("", |m| m.as_str()).to_string(),
            bass,
        })
    }

    pub fn root_pitch_class(&self) -> Option<usize> {
        pitch_class(&self.root)
    }

    pub fn bass_pitch_class(&self) -> Option<usize> {
        self.bass.as_deref().and_then(pitch_class)
    }

    /// True when both chords sound the same, whatever their spelling.
    ///
    /// `C#m` and `Dbm` are the same chord; `C#m` and `C#m7` are not.
    pub fn same_pitches_as(&self, other: &ChordSymbol) -> bool {
        self.root_pitch_class() == other.root_pitch_class()
            && self.bass_pitch_class() == other.bass_pitch_class()
            && self.suffix == other.suffix
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.suffix)?;
        if let Some(bass) = &self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}
