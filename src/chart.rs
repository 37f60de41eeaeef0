//! # Chart Sources
//!
//! A chart source is the lyrics-and-chords text of one song, optionally
//! preceded by YAML front matter between `---` fences:
//!
//! ```text
//! ---
//! title: Cuán Grande Es Él
//! artist: Tradicional
//! key: G
//! tempo: 72
//! time-signature: 3/4
//! capo: 2
//! ---
//! [Verso]
//! G          C
//! Señor mi Dios...
//! ```
//!
//! Everything after the closing fence is the chart body handed to the
//! segmenter. A source without front matter is all body.

use serde::{Deserialize, Serialize};

use crate::chord::ChordSymbol;
use crate::error::ChartError;

const FENCE: &str = "---";

/// Time signature (e.g., 4/4, 3/4, 6/8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSignature {
    pub beats: u8,
    pub beat_type: u8,
}

/// Metadata from the front matter of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ChartMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub key: Option<String>,
    pub tempo: Option<u32>,
    pub time_signature: Option<TimeSignature>,
    pub capo: Option<u8>,
}

/// Raw metadata for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawMetadata {
    title: Option<String>,
    artist: Option<String>,
    key: Option<String>,
    tempo: Option<u32>,
    time_signature: Option<String>,
    capo: Option<u8>,
}

/// A chart split into metadata and body text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chart {
    pub metadata: ChartMetadata,
    pub body: String,
}

/// Split `source` into front matter and body.
///
/// Returns `Ok(None)` when the source does not open with a fence line.
fn split_front_matter(source: &str) -> Result<Option<(&str, &str)>, ChartError> {
    let rest = match source.strip_prefix(FENCE) {
        Some(rest) => rest,
        None => return Ok(None),
    };
    let rest = match rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) {
        Some(rest) => rest,
        None => return Ok(None),
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            return Ok(Some((&rest[..offset], &rest[offset + line.len()..])));
        }
        offset += line.len();
    }

    Err(ChartError::MetadataError(
        "front matter opened with --- is never closed".to_string(),
    ))
}

fn parse_time_signature(s: &str) -> Result<TimeSignature, ChartError> {
    let invalid = || ChartError::MetadataError(format!("Invalid time signature: {}", s));

    let (beats, beat_type) = s.trim().split_once('/').ok_or_else(invalid)?;
    let beats: u8 = beats.trim().parse().map_err(|_| invalid())?;
    let beat_type: u8 = beat_type.trim().parse().map_err(|_| invalid())?;

    if beats == 0 || !matches!(beat_type, 1 | 2 | 4 | 8 | 16 | 32) {
        return Err(invalid());
    }
    Ok(TimeSignature { beats, beat_type })
}

fn parse_metadata(content: &str) -> Result<ChartMetadata, ChartError> {
    let raw: RawMetadata = if content.trim().is_empty() {
        RawMetadata::default()
    } else {
        serde_yaml::from_str(content).map_err(|e| ChartError::MetadataError(e.to_string()))?
    };

    let key = match raw.key {
        Some(key) => {
            let key = key.trim().to_string();
            if ChordSymbol::parse(&key).is_none() {
                return Err(ChartError::MetadataError(format!("Invalid key: {}", key)));
            }
            Some(key)
        }
        None => None,
    };

    let time_signature = match raw.time_signature {
        Some(ts) => Some(parse_time_signature(&ts)?),
        None => None,
    };

    Ok(ChartMetadata {
        title: raw.title,
        artist: raw.artist,
        key,
        tempo: raw.tempo,
        time_signature,
        capo: raw.capo,
    })
}

/// Parse a chart source into metadata and body.
///
/// # Example
/// ```
/// use chordsheet::parse_chart;
///
/// let chart = parse_chart("---\ntitle: Sublime Gracia\nkey: G\n---\n[Verso]\nG  C  G")?;
/// assert_eq!(chart.metadata.title.as_deref(), Some("Sublime Gracia"));
/// assert_eq!(chart.metadata.key.as_deref(), Some("G"));
/// assert_eq!(chart.body, "[Verso]\nG  C  G");
/// # Ok::<(), chordsheet::ChartError>(())
/// ```
///
/// # Errors
/// Returns [`ChartError::MetadataError`] for unclosed or invalid front matter.
pub fn parse_chart(source: &str) -> Result<Chart, ChartError> {
    match split_front_matter(source)? {
        Some((front, body)) => Ok(Chart {
            metadata: parse_metadata(front)?,
            body: body.to_string(),
        }),
        None => Ok(Chart {
            metadata: ChartMetadata::default(),
            body: source.to_string(),
        }),
    }
}
