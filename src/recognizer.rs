//! # Chord Token Recognizer
//!
//! Decides whether a line of chart text is chord notation or lyrics, and finds
//! the chord tokens inside a line so they can be transposed.
//!
//! ## Heuristic
//! Classification is a heuristic, not a grammar. A line is a chord line when
//! at least one word is a chord token and chord tokens make up at least
//! [`DEFAULT_CHORD_LINE_THRESHOLD`] of the counted words.
//!
//! Short words that happen to be valid chord spellings (`A` and `E` in Spanish
//! lyrics) are listed in a denylist. Denylisted words never count as matches but
//! still count as words, so a lyric line made only of such words never becomes
//! a chord line.
//!
//! Both knobs live in [`ChordPolicy`] and can be overridden from configuration.
//!
//! ## Chord Token Pattern
//! ```text
//! [A-G] [#b]? (m|maj|min|dim|aug|sus|add|2|4|5|6|7|9|11|13)* ( / [A-G] [#b]? )?
//! ```
//! Words are matched after stripping trailing `. , : ; ( )`. When transposing,
//! leading punctuation is set aside as well so `(G)` becomes `(A)` in place.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::transpose::transpose;

/// Fraction of counted words that must be chord tokens for a chord line.
pub const DEFAULT_CHORD_LINE_THRESHOLD: f64 = 0.5;

/// Lyric words that collide with chord spellings.
pub const DEFAULT_DENIED_WORDS: &[&str] = &["A", "E"];

/// Characters stripped from the end of a word before matching.
pub const WORD_PUNCTUATION: &[char] = &['.', ',', ':', ';', '(', ')'];

/// Lines starting with this marker are annotations, never chords.
pub const COMMENT_PREFIX: &str = "//";

static CHORD_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-G][#b]?(?:maj|min|dim|aug|sus|add|m|13|11|2|4|5|6|7|9)*(?:/[A-G][#b]?)?$")
        .expect("chord token pattern is valid")
});

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("word pattern is valid"));

/// How a single line of chart text is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Chord,
    Lyric,
    Comment,
    Blank,
}

fn chord_core(word: &str) -> &str {
    word.trim_end_matches(WORD_PUNCTUATION)
}

/// Split a word into leading punctuation, core and trailing punctuation.
fn split_punctuation(word: &str) -> (&str, &str, &str) {
    let after_lead = word.trim_start_matches(WORD_PUNCTUATION);
    let lead = &word[..word.len() - after_lead.len()];
    let core = after_lead.trim_end_matches(WORD_PUNCTUATION);
    let trail = &after_lead[core.len()..];
    (lead, core, trail)
}

/// True when `word` is chord-shaped, ignoring the denylist.
pub fn matches_chord_pattern(word: &str) -> bool {
    CHORD_TOKEN.is_match(chord_core(word))
}

/// Classification policy: threshold plus denylist.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordPolicy {
    pub threshold: f64,
    pub denied_words: HashSet<String>,
}

impl Default for ChordPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_CHORD_LINE_THRESHOLD,
            DEFAULT_DENIED_WORDS.iter().map(|w| w.to_string()),
        )
    }
}

impl ChordPolicy {
    pub fn new<I>(threshold: f64, denied_words: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            threshold,
            denied_words: denied_words.into_iter().collect(),
        }
    }

    pub fn is_denied(&self, word: &str) -> bool {
        self.denied_words.contains(chord_core(word))
    }

    /// True when `word` is a chord token that is not denylisted.
    pub fn is_chord_token(&self, word: &str) -> bool {
        matches_chord_pattern(word) && !self.is_denied(word)
    }

    /// Decide whether `line` is chord notation.
    ///
    /// # Example
    /// ```
    /// use chordsheet::ChordPolicy;
    ///
    /// let policy = ChordPolicy::default();
    /// assert!(policy.is_chord_line("G   D/F#   Em   C"));
    /// assert!(policy.is_chord_line("G   (x2)   D   fin"));
    /// assert!(!policy.is_chord_line("Cuan grande es Él"));
    /// assert!(!policy.is_chord_line("// G C D"));
    /// ```
    pub fn is_chord_line(&self, line: &str) -> bool {
        if line.trim_start().starts_with(COMMENT_PREFIX) {
            return false;
        }

        let mut words = 0usize;
        let mut chords = 0usize;
        for word in line.split_whitespace() {
            words += 1;
            if self.is_chord_token(word) {
                chords += 1;
            }
        }

        chords > 0 && chords as f64 >= self.threshold * words as f64
    }

    pub fn classify_line(&self, line: &str) -> LineKind {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            LineKind::Blank
        } else if trimmed.starts_with(COMMENT_PREFIX) {
            LineKind::Comment
        } else if self.is_chord_line(line) {
            LineKind::Chord
        } else {
            LineKind::Lyric
        }
    }

    /// Transpose every non-denylisted chord token in `line`.
    ///
    /// Spacing, punctuation and non-chord words are copied untouched, and a zero
    /// shift returns the line exactly as given.
    ///
    /// # Example
    /// ```
    /// use chordsheet::ChordPolicy;
    ///
    /// let policy = ChordPolicy::default();
    /// assert_eq!(policy.transpose_line("G    D/F#   Em", 2), "A    E/G#   F#m");
    /// assert_eq!(policy.transpose_line("A mi Dios, G", 2), "A mi Dios, A");
    /// ```
    pub fn transpose_line(&self, line: &str, semitones: i32) -> String {
        if semitones == 0 {
            return line.to_string();
        }

        let mut out = String::with_capacity(line.len() + 8);
        let mut last = 0;

        for m in WORD.find_iter(line) {
            out.push_str(&line[last..m.start()]);
            last = m.end();

            let word = m.as_str();
            let (lead, core, trail) = split_punctuation(word);
            if CHORD_TOKEN.is_match(core) && !self.denied_words.contains(core) {
                out.push_str(lead);
                out.push_str(&transpose(core, semitones));
                out.push_str(trail);
            } else {
                out.push_str(word);
            }
        }
        out.push_str(&line[last..]);
        out
    }
}
