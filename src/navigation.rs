use crate::surface::Surface;

/// How far above a section's top the section already counts as current.
pub const SECTION_ACTIVATION_OFFSET: f64 = 120.0;
pub const ACTIVE_CLASS: &str = "active";

/// Selector for an in-page anchor target, or `None` when the href is not a
/// usable fragment (`#` alone included).
pub fn fragment_selector(href: &str) -> Option<&str> {
    if href.len() > 1 && href.starts_with('#') {
        Some(href)
    } else {
        None
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn contains(&self, scroll_y: f64) -> bool {
        scroll_y >= self.top - SECTION_ACTIVATION_OFFSET && scroll_y < self.top + self.height
    }
}

/// The section the reader is in. Overlapping windows resolve to the last
/// matching section in document order.
pub fn active_section(scroll_y: f64, sections: &[SectionBounds]) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|section| section.contains(scroll_y))
        .map(|section| section.id.as_str())
}

pub struct NavLink<E: Surface> {
    pub href: String,
    pub element: E,
}

/// Marks exactly the link pointing at `section_id` as active.
pub fn highlight<E: Surface>(links: &[NavLink<E>], section_id: &str) {
    let target = format!("#{section_id}");
    for link in links {
        link.element.remove_class(ACTIVE_CLASS);
        if link.href == target {
            link.element.add_class(ACTIVE_CLASS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::RecordingSurface;

    fn layout() -> Vec<SectionBounds> {
        [("about", 600.0, 500.0), ("skills", 1100.0, 700.0), ("projects", 1800.0, 900.0)]
            .into_iter()
            .map(|(id, top, height)| SectionBounds {
                id: id.to_string(),
                top,
                height,
            })
            .collect()
    }

    fn links() -> Vec<NavLink<RecordingSurface>> {
        ["#about", "#skills", "#projects", "#contact"]
            .into_iter()
            .map(|href| NavLink {
                href: href.to_string(),
                element: RecordingSurface::default(),
            })
            .collect()
    }

    #[test]
    fn window_starts_early_and_ends_at_section_bottom() {
        let section = &layout()[0];
        assert!(!section.contains(479.0));
        assert!(section.contains(480.0));
        assert!(section.contains(1099.0));
        assert!(!section.contains(1100.0));
    }

    #[test]
    fn overlapping_windows_pick_the_last_section() {
        // 1000 is inside about's [480, 1100) and skills' [980, 1800).
        assert_eq!(active_section(1000.0, &layout()), Some("skills"));
        assert_eq!(active_section(700.0, &layout()), Some("about"));
        assert_eq!(active_section(10.0, &layout()), None);
    }

    #[test]
    fn exactly_one_link_is_active_after_highlight() {
        let links = links();
        links[0].element.add_class(ACTIVE_CLASS);

        let layout = layout();
        let section = active_section(1500.0, &layout).expect("inside skills");
        highlight(&links, section);

        let active: Vec<_> = links
            .iter()
            .filter(|link| link.element.has_class(ACTIVE_CLASS))
            .map(|link| link.href.as_str())
            .collect();
        assert_eq!(active, vec!["#skills"]);
    }

    #[test]
    fn bare_hash_and_external_links_are_not_fragments() {
        assert_eq!(fragment_selector("#projects"), Some("#projects"));
        assert_eq!(fragment_selector("#"), None);
        assert_eq!(fragment_selector("/download-resume"), None);
        assert_eq!(fragment_selector("https://example.com/#top"), None);
    }
}
