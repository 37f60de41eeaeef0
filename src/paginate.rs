//! # Paginator
//!
//! Packs sections onto fixed-capacity pages.
//!
//! Capacity is a line-count budget, not a pixel measurement. A section costs
//! [`SECTION_HEADER_WEIGHT`] units for its header plus one unit per body line.
//! Sections are packed greedily in order and never split: a section that does
//! not fit starts a new page, and a section larger than a whole page sits alone
//! on its own page.

use tracing::warn;
use serde::Serialize;

use crate::sections::Section;

/// Default page budget in line units.
pub const DEFAULT_PAGE_CAPACITY: usize = 32;

/// Units charged for a section header.
pub const SECTION_HEADER_WEIGHT: usize = 2;

/// Sections assigned to one page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Page {
    pub sections: Vec<Section>,
}

impl Page {
    pub fn weight(&self) -> usize {
        self.sections.iter().map(section_weight).sum()
    }
}

pub fn section_weight(section: &Section) -> usize {
    SECTION_HEADER_WEIGHT + section.body.len()
}

/// Greedily pack `sections` onto pages of `capacity` units.
///
/// Empty sections (no title, no body) are skipped, so empty content gives no
/// pages at all.
///
/// # Example
/// ```
/// use chordsheet::{paginate, Section};
///
/// let section = |n: usize| Section {
///     title: "VERSO".to_string(),
///     body: vec!["la".to_string(); n],
/// };
/// let pages = paginate(&[section(2), section(2), section(2)], 10);
/// assert_eq!(pages.len(), 2);
/// assert_eq!(pages[0].sections.len(), 2);
/// assert_eq!(pages[1].sections.len(), 1);
/// ```
pub fn paginate(sections: &[Section], capacity: usize) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut current = Page::default();
    let mut used = 0;

    for section in sections.iter().filter(|s| !s.is_empty()) {
        let weight = section_weight(section);

        if used + weight > capacity && !current.sections.is_empty() {
            pages.push(std::mem::take(&mut current));
            used = 0;
        }
        if weight > capacity {
            warn!(
                "Section '{}' needs {} lines but a page holds {}, placing it alone",
                section.title, weight, capacity
            );
        }

        current.sections.push(section.clone());
        used += weight;
    }

    if !current.sections.is_empty() {
        pages.push(current);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, lines: usize) -> Section {
        Section {
            title: title.to_string(),
            body: (0..lines).map(|i| format!("line {}", i)).collect(),
        }
    }

    fn titles(page: &Page) -> Vec<&str> {
        page.sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_weight() {
        assert_eq!(section_weight(&section("CORO", 0)), 2);
        assert_eq!(section_weight(&section("CORO", 5)), 7);
        assert_eq!(section_weight(&Section::default()), 2);
    }

    #[test]
    fn test_third_section_overflows() {
        let sections = vec![section("A", 2), section("B", 2), section("C", 2)];
        let pages = paginate(&sections, 10);
        assert_eq!(pages.len(), 2);
        assert_eq!(titles(&pages[0]), vec!["A", "B"]);
        assert_eq!(pages[0].weight(), 8);
        assert_eq!(titles(&pages[1]), vec!["C"]);
    }

    #[test]
    fn test_exact_fit_stays_on_page() {
        let sections = vec![section("A", 3), section("B", 3)];
        let pages = paginate(&sections, 10);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].weight(), 10);
    }

    #[test]
    fn test_oversized_section_alone() {
        let pages = paginate(&[section("BIG", 48)], DEFAULT_PAGE_CAPACITY);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].weight(), 50);
        assert_eq!(pages[0].sections[0].body.len(), 48);
    }

    #[test]
    fn test_oversized_section_between_small_ones() {
        let sections = vec![section("A", 2), section("BIG", 40), section("B", 2)];
        let pages = paginate(&sections, DEFAULT_PAGE_CAPACITY);
        assert_eq!(pages.len(), 3);
        assert_eq!(titles(&pages[0]), vec!["A"]);
        assert_eq!(titles(&pages[1]), vec!["BIG"]);
        assert_eq!(titles(&pages[2]), vec!["B"]);
    }

    #[test]
    fn test_order_is_preserved() {
        let sections: Vec<Section> = (0..10).map(|i| section(&format!("S{}", i), i)).collect();
        let pages = paginate(&sections, 12);
        let flattened: Vec<&str> = pages.iter().flat_map(titles).collect();
        let expected: Vec<String> = (0..10).map(|i| format!("S{}", i)).collect();
        assert_eq!(flattened, expected.iter().map(String::as_str).collect::<Vec<_>>());
        for page in &pages {
            assert!(page.weight() <= 12 || page.sections.len() == 1);
        }
    }

    #[test]
    fn test_deterministic() {
        let sections: Vec<Section> = (0..6).map(|i| section("S", i * 3)).collect();
        assert_eq!(paginate(&sections, 20), paginate(&sections, 20));
    }

    #[test]
    fn test_no_sections_no_pages() {
        assert!(paginate(&[], DEFAULT_PAGE_CAPACITY).is_empty());
        assert!(paginate(&[Section::default()], DEFAULT_PAGE_CAPACITY).is_empty());
    }

    #[test]
    fn test_untitled_section_with_body_is_paged() {
        let untitled = Section {
            title: String::new(),
            body: vec!["G C D".to_string()],
        };
        let pages = paginate(&[untitled], DEFAULT_PAGE_CAPACITY);
        assert_eq!(pages.len(), 1);
    }
}
