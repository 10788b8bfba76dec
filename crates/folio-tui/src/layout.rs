//! Row geometry of section content.
//!
//! Sections are stacked pages, each as tall as the viewport. Card sections
//! may hold more rows than fit, which makes them internally scrollable.

use folio_core::config::{SectionConfig, SectionKind};

/// Identifies an element that fades in when it scrolls into view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    pub section: usize,
    /// 0 is the section header, cards follow from 1
    pub index: usize,
}

/// Position of an element within its section's content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub id: ElementId,
    pub top: u16,
    pub height: u16,
}

/// Row layout of one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLayout {
    pub elements: Vec<Element>,
    /// Total content rows
    pub height: u16,
}

const HEADER_TOP: u16 = 1;
const HEADER_HEIGHT: u16 = 2;
const GAP: u16 = 1;

/// Lay out a section's header and cards
pub fn measure_section(
    index: usize,
    section: &SectionConfig,
    viewport_height: u16,
) -> SectionLayout {
    if section.kind == SectionKind::Hero {
        return SectionLayout {
            elements: Vec::new(),
            height: viewport_height,
        };
    }

    let mut elements = vec![Element {
        id: ElementId { section: index, index: 0 },
        top: HEADER_TOP,
        height: HEADER_HEIGHT,
    }];

    let mut cursor = HEADER_TOP + HEADER_HEIGHT + GAP;
    for (i, card) in section.cards.iter().enumerate() {
        // title and body rows inside a border
        let height = card.lines.len() as u16 + 3;
        elements.push(Element {
            id: ElementId {
                section: index,
                index: i + 1,
            },
            top: cursor,
            height,
        });
        cursor += height + GAP;
    }

    SectionLayout {
        elements,
        height: cursor.max(viewport_height),
    }
}

/// Layouts for every section at the given viewport height
pub fn measure_all(sections: &[SectionConfig], viewport_height: u16) -> Vec<SectionLayout> {
    sections
        .iter()
        .enumerate()
        .map(|(i, s)| measure_section(i, s, viewport_height))
        .collect()
}

/// Content heights in the units the navigation session works in
pub fn content_heights(layouts: &[SectionLayout]) -> Vec<f64> {
    layouts.iter().map(|l| l.height as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::AppConfig;

    #[test]
    fn test_hero_fills_one_page() {
        let config = AppConfig::default();
        let layout = measure_section(0, &config.sections[0], 30);
        assert_eq!(layout.height, 30);
        assert!(layout.elements.is_empty());
    }

    #[test]
    fn test_cards_stack_below_header() {
        let config = AppConfig::default();
        // experience: cards with 3, 4 and 2 lines
        let layout = measure_section(2, &config.sections[2], 10);
        let tops: Vec<_> = layout.elements.iter().map(|e| e.top).collect();
        assert_eq!(tops, [1, 4, 11, 19]);
        assert_eq!(layout.height, 25);
        assert_eq!(layout.elements[3].id, ElementId { section: 2, index: 3 });
    }

    #[test]
    fn test_short_section_is_one_page() {
        let config = AppConfig::default();
        let layout = measure_section(5, &config.sections[5], 40);
        assert_eq!(layout.height, 40);
    }
}
