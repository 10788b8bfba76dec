//! Section registry: the ordered, fixed set of navigable page regions.

use crate::config::SectionConfig;

/// Internal scroll measurements of a section's viewport
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current internal scroll offset
    pub scroll_top: f64,
    /// Visible height of the section
    pub client_height: f64,
    /// Full content height of the section
    pub scroll_height: f64,
}

impl ScrollMetrics {
    /// Largest reachable internal scroll offset
    #[inline]
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// Whether content remains below the visible area.
    /// The one-unit slack absorbs fractional offsets at the bottom edge.
    #[inline]
    pub fn can_scroll_forward(&self) -> bool {
        self.scroll_top + self.client_height < self.scroll_height - 1.0
    }

    /// Whether content remains above the visible area
    #[inline]
    pub fn can_scroll_backward(&self) -> bool {
        self.scroll_top > 0.0
    }

    /// Whether the section can still absorb a delta in its direction
    pub fn has_headroom(&self, delta: f64) -> bool {
        (delta > 0.0 && self.can_scroll_forward()) || (delta < 0.0 && self.can_scroll_backward())
    }
}

/// One navigable region of the page
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    id: String,
    position: usize,
    page_offset: f64,
    metrics: ScrollMetrics,
}

impl Section {
    pub fn new(id: impl Into<String>, position: usize) -> Self {
        Self {
            id: id.into(),
            position,
            page_offset: 0.0,
            metrics: ScrollMetrics::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Ordinal position in the registry
    pub fn position(&self) -> usize {
        self.position
    }

    /// Viewport offset at which this section is fully in view
    pub fn page_offset(&self) -> f64 {
        self.page_offset
    }

    pub fn metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    /// Scroll the section's content by `delta`, clamped to its limits.
    /// Returns the distance actually scrolled.
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        let before = self.metrics.scroll_top;
        self.metrics.scroll_top = (before + delta).clamp(0.0, self.metrics.max_scroll());
        self.metrics.scroll_top - before
    }

    pub fn reset_scroll(&mut self) {
        self.metrics.scroll_top = 0.0;
    }
}

/// Ordered list of sections, built once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sections = ids
            .into_iter()
            .enumerate()
            .map(|(position, id)| Section::new(id, position))
            .collect();
        Self { sections }
    }

    pub fn from_config(sections: &[SectionConfig]) -> Self {
        Self::new(sections.iter().map(|s| s.id.clone()))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Resolve a nav link target to a position.
    /// An empty id (a bare `#` link) resolves to the first section.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        let id = id.trim_start_matches('#');
        if id.is_empty() {
            return if self.sections.is_empty() { None } else { Some(0) };
        }
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn reset_all_scroll(&mut self) {
        for section in &mut self.sections {
            section.reset_scroll();
        }
    }

    /// Lay sections out as stacked pages of `viewport_height`, each holding
    /// `content_heights[i]` of content. Missing heights count as one page.
    /// Internal offsets are clamped to the new limits.
    pub fn layout(&mut self, viewport_height: f64, content_heights: &[f64]) {
        for (i, section) in self.sections.iter_mut().enumerate() {
            let content = content_heights.get(i).copied().unwrap_or(viewport_height);
            section.page_offset = i as f64 * viewport_height;
            section.metrics.client_height = viewport_height;
            section.metrics.scroll_height = content.max(viewport_height);
            let max_scroll = section.metrics.max_scroll();
            section.metrics.scroll_top = section.metrics.scroll_top.min(max_scroll);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SectionRegistry {
        let mut registry = SectionRegistry::new(["hero", "education", "experience"]);
        registry.layout(100.0, &[100.0, 100.0, 250.0]);
        registry
    }

    #[test]
    fn test_layout_stacks_pages() {
        let registry = registry();
        assert_eq!(registry.get(2).unwrap().page_offset(), 200.0);
        assert_eq!(registry.get(2).unwrap().metrics().max_scroll(), 150.0);
        assert_eq!(registry.get(0).unwrap().metrics().max_scroll(), 0.0);
    }

    #[test]
    fn test_position_of() {
        let registry = registry();
        assert_eq!(registry.position_of("experience"), Some(2));
        assert_eq!(registry.position_of("#education"), Some(1));
        assert_eq!(registry.position_of(""), Some(0));
        assert_eq!(registry.position_of("blog"), None);
    }

    #[test]
    fn test_headroom() {
        let mut registry = registry();
        let section = registry.get_mut(2).unwrap();
        assert!(section.metrics().has_headroom(10.0));
        assert!(!section.metrics().has_headroom(-10.0));
        assert!(!section.metrics().has_headroom(0.0));

        assert_eq!(section.scroll_by(500.0), 150.0);
        assert!(!section.metrics().has_headroom(10.0));
        assert!(section.metrics().has_headroom(-10.0));
    }

    #[test]
    fn test_reset_all_scroll() {
        let mut registry = registry();
        registry.get_mut(2).unwrap().scroll_by(40.0);
        registry.reset_all_scroll();
        assert!(registry.iter().all(|s| s.metrics().scroll_top == 0.0));
    }

    #[test]
    fn test_relayout_clamps_scroll() {
        let mut registry = registry();
        registry.get_mut(2).unwrap().scroll_by(150.0);
        registry.layout(200.0, &[200.0, 200.0, 250.0]);
        assert_eq!(registry.get(2).unwrap().metrics().scroll_top, 50.0);
    }
}
