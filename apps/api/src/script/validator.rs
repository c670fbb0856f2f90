//! Script Validator — completeness and pacing checks on a formatted script.
//!
//! Problems are reported, never corrected. `valid` depends only on errors;
//! warnings are advisory.

use serde::Serialize;

use crate::script::formatter::FormattedComicScript;

const MIN_COMFORTABLE_DENSITY: f64 = 4.0;
const MAX_COMFORTABLE_DENSITY: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn validate_script(script: &FormattedComicScript) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let cover = script.cover();
    if cover.title.trim().is_empty() {
        errors.push("Script is missing a title".to_string());
    }
    if cover.writer.trim().is_empty() {
        errors.push("Script is missing a writer".to_string());
    }

    let pages = script.pages();
    if pages.is_empty() {
        errors.push("Script has no pages".to_string());
    }

    for (idx, page) in pages.iter().enumerate() {
        let expected = idx as u32 + 1;
        if page.page_number != expected {
            errors.push(format!(
                "Page at position {} is numbered {} (expected {})",
                expected, page.page_number, expected
            ));
        }

        if page.panels.is_empty() {
            warnings.push(format!("Page {} has no panels", page.page_number));
            continue;
        }

        for panel in &page.panels {
            if panel.description.trim().is_empty() {
                warnings.push(format!(
                    "Page {}, panel {} has no description",
                    page.page_number, panel.number
                ));
            }
            if panel.dialogue.is_empty() && panel.captions.is_empty() {
                warnings.push(format!(
                    "Page {}, panel {} is silent (no dialogue or captions)",
                    page.page_number, panel.number
                ));
            }
        }
    }

    // A lone page is a splash or pin-up; pacing only matters across pages.
    if script.total_pages() > 1 {
        let density = script.total_panels() as f64 / script.total_pages() as f64;
        if density < MIN_COMFORTABLE_DENSITY {
            warnings.push(format!(
                "Average of {density:.1} panels per page - may feel slow paced"
            ));
        } else if density > MAX_COMFORTABLE_DENSITY {
            warnings.push(format!(
                "Average of {density:.1} panels per page - may feel rushed"
            ));
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}
