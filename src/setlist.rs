//! # Setlists
//!
//! An ordered list of charts for one service or gig, written in YAML:
//!
//! ```yaml
//! name: Domingo AM
//! date: 2026-10-18
//! items:
//!   - file: songs/sublime-gracia.chart
//!     key: A
//!   - file: songs/cuan-grande.chart
//!     title: Cuán Grande Es Él (acústica)
//!   - title: Lectura
//!     content: |
//!       // Salmo 23
//! ```
//!
//! Files are resolved relative to the setlist's directory. Entry `title` and
//! `key` override the chart's own front matter.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use serde::Deserialize;

use crate::chord::ChordSymbol;
use crate::error::ChartError;
use crate::viewer::ChartItem;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SetlistEntry {
    pub file: Option<PathBuf>,
    pub content: Option<String>,
    pub title: Option<String>,
    pub key: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Setlist {
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
    pub items: Vec<SetlistEntry>,
}

impl Setlist {
    /// Parse and validate a setlist.
    ///
    /// # Errors
    /// Returns [`ChartError::SetlistError`] for invalid YAML, for entries
    /// that name both or neither of `file` and `content`, and for a `key`
    /// override that is not a chord symbol.
    pub fn from_yaml(content: &str) -> Result<Self, ChartError> {
        let setlist: Setlist =
            serde_yaml::from_str(content).map_err(|e| ChartError::SetlistError(e.to_string()))?;

        for (i, entry) in setlist.items.iter().enumerate() {
            match (&entry.file, &entry.content) {
                (Some(_), Some(_)) => {
                    return Err(ChartError::SetlistError(format!(
                        "item {} has both `file` and `content`",
                        i + 1
                    )))
                }
                (None, None) => {
                    return Err(ChartError::SetlistError(format!(
                        "item {} has neither `file` nor `content`",
                        i + 1
                    )))
                }
                _ => {}
            }
            if let Some(key) = &entry.key {
                if ChordSymbol::parse(key).is_none() {
                    return Err(ChartError::SetlistError(format!(
                        "item {} has invalid key: {}",
                        i + 1,
                        key
                    )));
                }
            }
        }
        Ok(setlist)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ChartError::io(path, e))?;
        Self::from_yaml(&content)
    }

    /// Resolve every entry into a chart item, in order.
    pub fn chart_items(&self, base_dir: &Path) -> Result<Vec<ChartItem>, ChartError> {
        self.items
            .iter()
            .map(|entry| -> Result<ChartItem, ChartError> {
                let source = match (&entry.file, &entry.content) {
                    (Some(file), _) => {
                        let path = base_dir.join(file);
                        debug!("Loading chart {}", path.display());
                        fs::read_to_string(&path).map_err(|e| ChartError::io(path, e))?
                    }
                    (None, Some(content)) => content.clone(),
                    (None, None) => String::new(),
                };

                let mut item = ChartItem::from_source(&source)?;
                if let Some(title) = &entry.title {
                    item.title = Some(title.clone());
                }
                if let Some(key) = &entry.key {
                    item.key = Some(key.clone());
                }
                Ok(item)
            })
            .collect()
    }
}
