//! # Transposition
//!
//! Shifts chord symbols by a number of semitones over the twelve pitch classes.
//!
//! ## Spelling
//! A shifted note is spelled from one of two parallel tables,
//! [`SHARP_NOTES`](crate::SHARP_NOTES) or [`FLAT_NOTES`](crate::FLAT_NOTES).
//! The flat table is used when the source root is flat, when it is `F`, or
//! when shifting down; otherwise the sharp table is used. A root missing from
//! the chosen table is looked up in the other one. Spelling never changes the
//! pitch class, so shifting by `n` then `-n` lands on the same pitches.
//!
//! Slash chords are shifted on both sides of the `/`.

use tracing::warn;

use crate::chord::{ChordSymbol, Spelling, ROOT_PATTERN};

/// Choose the table a transposed note is spelled from.
///
/// Flats are used when the root is already flat, when the root is F, or when
/// transposing down. Everything else is spelled with sharps.
pub fn spelling_for(root: &str, semitones: i32) -> Spelling {
    if root.contains('b') || root == "F" || semitones < 0 {
        Spelling::Flat
    } else {
        Spelling::Sharp
    }
}

/// Move a pitch-class index by `semitones`, wrapping into 0..12.
fn shift_index(index: usize, semitones: i32) -> usize {
    (index as i64 + i64::from(semitones)).rem_euclid(12) as usize
}

/// Transpose one side of a (possibly slash) chord: root plus suffix.
fn transpose_part(part: &str, semitones: i32) -> String {
    let caps = match ROOT_PATTERN.captures(part) {
        Some(caps) => caps,
        None => return part.to_string(),
    };
    let root = &caps[1];
    let suffix = &caps[2];

    let spelling = spelling_for(root, semitones);
    let index = spelling
        .index_of(root)
        .or_else(|| spelling.other().index_of(root));

    match index {
        Some(index) => format!("{}{}", spelling.table()[shift_index(index, semitones)], suffix),
        None => part.to_string(),
    }
}

/// Transpose a chord symbol by `semitones`.
///
/// The suffix is kept verbatim. Slash chords have both sides transposed by the
/// same amount. Input whose root is not a known pitch class comes back
/// unchanged, and a zero shift never rewrites anything.
///
/// # Example
/// ```
/// use chordsheet::transpose;
///
/// assert_eq!(transpose("B", 1), "C");
/// assert_eq!(transpose("C", -1), "B");
/// assert_eq!(transpose("D/F#", 2), "E/G#");
/// assert_eq!(transpose("Am7", 3), "Cm7");
/// assert_eq!(transpose("G", -2), "F");
/// assert_eq!(transpose("la", 5), "la");
/// ```
pub fn transpose(chord: &str, semitones: i32) -> String {
    if semitones == 0 {
        return chord.to_string();
    }

    chord
        .split('/')
        .map(|part| transpose_part(part, semitones))
        .collect::<Vec<_>>()
        .join("/")
}

/// Key a chart sounds in after shifting it by `semitones`.
///
/// Keys are spelled like chords (`G`, `Em`, `Bb`), so this is [`transpose`]
/// on the trimmed key name.
pub fn transposed_key(key: &str, semitones: i32) -> String {
    let key = key.trim();
    if semitones != 0 && ChordSymbol::parse(key).is_none() {
        warn!("Key '{}' is not a pitch class, leaving it as written", key);
    }
    transpose(key, semitones)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::{FLAT_NOTES, SHARP_NOTES};

    #[test]
    fn test_zero_shift_is_identity() {
        for chord in ["C", "F#m7", "Bb/D", "not a chord", "", "E#", "C6/9"] {
            assert_eq!(transpose(chord, 0), chord);
        }
    }

    #[test]
    fn test_wraparound() {
        assert_eq!(transpose("B", 1), "C");
        assert_eq!(transpose("C", -1), "B");
        assert_eq!(transpose("A", 3), "C");
        assert_eq!(transpose("C", 12), "C");
        assert_eq!(transpose("C", -12), "C");
        assert_eq!(transpose("D", 26), "E");
        assert_eq!(transpose("D", -26), "C");
    }

    #[test]
    fn test_spelling_policy() {
        // Upward from a natural root: sharps
        assert_eq!(transpose("C", 1), "C#");
        assert_eq!(transpose("G", 3), "A#");
        // Downward: flats
        assert_eq!(transpose("D", -1), "Db");
        assert_eq!(transpose("A", -1), "Ab");
        // Flat root keeps flats even going up
        assert_eq!(transpose("Bb", 1), "B");
        assert_eq!(transpose("Eb", 1), "E");
        assert_eq!(transpose("Ab", 2), "Bb");
        // F is spelled from the flat table
        assert_eq!(transpose("F", 1), "Gb");
        assert_eq!(transpose("F", 5), "Bb");
        // Sharp root going down looks itself up in the sharp table
        assert_eq!(transpose("F#", -1), "F");
        assert_eq!(transpose("C#", -2), "B");
        assert_eq!(transpose("G#", -3), "F");
    }

    #[test]
    fn test_suffix_is_preserved() {
        assert_eq!(transpose("Am7", 2), "Bm7");
        assert_eq!(transpose("Csus4", 7), "Gsus4");
        assert_eq!(transpose("Ebmaj9", -3), "Cmaj9");
        assert_eq!(transpose("Gadd9", 1), "G#add9");
        assert_eq!(transpose("Cdim7", 4), "Edim7");
    }

    #[test]
    fn test_slash_chords() {
        assert_eq!(transpose("D/F#", 2), "E/G#");
        assert_eq!(transpose("C/E", -2), "Bb/D");
        assert_eq!(transpose("G/B", 5), "C/E");
        // Second half of C6/9 has no root and passes through
        assert_eq!(transpose("C6/9", 2), "D6/9");
    }

    #[test]
    fn test_unknown_roots_pass_through() {
        assert_eq!(transpose("Hm", 2), "Hm");
        assert_eq!(transpose("x2", 2), "x2");
        assert_eq!(transpose("Cb", 2), "Cb");
        assert_eq!(transpose("E#m", 1), "E#m");
        assert_eq!(transpose("", 3), "");
    }

    #[test]
    fn test_round_trip_keeps_pitch_class() {
        let suffixes = ["", "m", "7", "m7", "maj7", "sus4", "add9", "dim"];
        let roots = SHARP_NOTES.iter().chain(FLAT_NOTES.iter());

        for root in roots {
            for suffix in suffixes {
                for bass in [None, Some("G#"), Some("Bb")] {
                    let chord = match bass {
                        Some(bass) => format!("{}{}/{}", root, suffix, bass),
                        None => format!("{}{}", root, suffix),
                    };
                    let original = ChordSymbol::parse(&chord).unwrap();
                    for n in -14..=14 {
                        let back = transpose(&transpose(&chord, n), -n);
                        let back = ChordSymbol::parse(&back).unwrap();
                        assert!(
                            original.same_pitches_as(&back),
                            "{} shifted by {} came back as {}",
                            chord,
                            n,
                            back
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_round_trip_may_respell() {
        // C# up then down lands on the flat spelling of the same pitch
        assert_eq!(transpose(&transpose("C#", 1), -1), "Db");
    }

    #[test]
    fn test_transposed_key() {
        assert_eq!(transposed_key("G", 2), "A");
        assert_eq!(transposed_key(" Em ", -2), "Dm");
        assert_eq!(transposed_key("Bb", 0), "Bb");
        assert_eq!(transposed_key("Mixolydian", 3), "Mixolydian");
    }
}
