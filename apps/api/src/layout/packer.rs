//! Page Layout Packer — flat bucketing of generated panels onto pages.
//!
//! Panels per page = ceil(total / target_pages). Pages are filled in input
//! order, so the last page may be short and fewer than `target_pages` pages
//! can come back when the panels run out early.

use tracing::debug;

use crate::layout::suggestion::layout_suggestion_for;
use crate::models::comic::{ComicPage, ComicPanel};

pub fn pack_pages(panels: Vec<ComicPanel>, target_pages: u32) -> Vec<ComicPage> {
    if panels.is_empty() {
        return Vec::new();
    }

    let target_pages = target_pages.max(1) as usize;
    let per_page = panels.len().div_ceil(target_pages);

    let mut pages: Vec<ComicPage> = Vec::with_capacity(target_pages);
    let mut remaining = panels.into_iter().peekable();

    while remaining.peek().is_some() {
        let page_panels: Vec<ComicPanel> = remaining
            .by_ref()
            .take(per_page)
            .zip(1u32..)
            .map(|(mut panel, number)| {
                panel.number = number;
                panel
            })
            .collect();

        pages.push(ComicPage {
            page_number: pages.len() as u32 + 1,
            layout_suggestion: Some(layout_suggestion_for(page_panels.len())),
            panels: page_panels,
        });
    }

    debug!("Packed panels into {} pages ({} per page)", pages.len(), per_page);
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::comic::{PanelComposition, PanelSize};

    fn make_panels(count: usize) -> Vec<ComicPanel> {
        (0..count)
            .map(|i| ComicPanel {
                number: i as u32 + 1,
                size: PanelSize::Medium,
                description: format!("panel {i}"),
                art_direction: String::new(),
                composition: PanelComposition::default(),
                characters: vec![],
                location: "Harbor".to_string(),
                time_of_day: None,
                captions: vec![],
                dialogue: vec![],
                sfx: vec![],
                border: None,
                bleed: None,
                transition: None,
            })
            .collect()
    }

    #[test]
    fn test_even_split() {
        let pages = pack_pages(make_panels(6), 2);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].panels.len(), 3);
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(pages[1].panels[0].description, "panel 3");
    }

    #[test]
    fn test_panel_numbers_restart_per_page() {
        let pages = pack_pages(make_panels(5), 2);
        let numbers: Vec<Vec<u32>> = pages
            .iter()
            .map(|p| p.panels.iter().map(|panel| panel.number).collect())
            .collect();
        assert_eq!(numbers, vec![vec![1, 2, 3], vec![1, 2]]);
    }

    #[test]
    fn test_fewer_pages_when_panels_run_out() {
        // ceil(4 / 3) = 2 per page -> only 2 pages needed.
        let pages = pack_pages(make_panels(4), 3);
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn test_zero_target_treated_as_one() {
        let pages = pack_pages(make_panels(3), 0);
        assert_eq!(pages.len(), 1);
        assert_eq!(
            pages[0].layout_suggestion.as_deref(),
            Some("Tier system: 1 large panel top, 2 smaller bottom")
        );
    }

    #[test]
    fn test_no_panels_no_pages() {
        assert!(pack_pages(Vec::new(), 4).is_empty());
    }
}
