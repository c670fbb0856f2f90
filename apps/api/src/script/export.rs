//! Script exporters: a plain-text production script and pretty JSON.

use crate::models::comic::{ComicPage, ComicPanel, Dialogue};
use crate::script::formatter::FormattedComicScript;

const BANNER_WIDTH: usize = 80;

pub fn export_text(script: &FormattedComicScript) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let cover = script.cover();

    let mut out = format!(
        "{banner}\n{}\nIssue #{}\nWritten by: {}\nArt by: {}\nDate: {}\n{banner}\n",
        cover.title.to_uppercase(),
        cover.issue_number,
        cover.writer,
        cover.artist,
        cover.date
    );
    out.push_str(&format!(
        "Pages: {} | Panels: {} | Dialogue words: {} | Estimated art hours: {}\n",
        script.total_pages(),
        script.total_panels(),
        script.dialogue_word_count(),
        script.estimated_art_hours()
    ));

    for page in script.pages() {
        out.push('\n');
        out.push_str(&render_page(page));
    }

    out
}

fn render_page(page: &ComicPage) -> String {
    let mut out = format!("PAGE {} ({} panels)\n", page.page_number, page.panels.len());
    if let Some(layout) = &page.layout_suggestion {
        out.push_str(&format!("Layout: {layout}\n"));
    }
    out.push_str(&"-".repeat(BANNER_WIDTH));
    out.push('\n');

    for panel in &page.panels {
        out.push('\n');
        out.push_str(&render_panel(panel));
    }
    out
}

fn render_panel(panel: &ComicPanel) -> String {
    let mut lines = vec![
        format!("PANEL {} [{}]", panel.number, panel.size.as_str()),
        format!("DESCRIPTION: {}", panel.description),
        format!("ART DIRECTION: {}", panel.art_direction),
        format!("LOCATION: {}", panel.location),
    ];
    if let Some(time) = &panel.time_of_day {
        lines.push(format!("TIME: {time}"));
    }
    lines.extend(panel.captions.iter().map(|c| format!("CAPTION: {c}")));
    lines.extend(
        panel
            .dialogue
            .iter()
            .map(|d| format!("{}: {}", speaker_label(d), d.text)),
    );
    lines.extend(
        panel
            .sfx
            .iter()
            .map(|sfx| format!("SFX: {} ({})", sfx.text.to_uppercase(), sfx.style.as_str())),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Upper-cased speaker plus one delivery tag (thought > whisper > shout > narration)
/// and an off-panel tag.
pub fn speaker_label(line: &Dialogue) -> String {
    let mut label = line.character.to_uppercase();
    let delivery = if line.thought {
        Some("THOUGHT")
    } else if line.whisper {
        Some("WHISPER")
    } else if line.shout {
        Some("SHOUT")
    } else if line.narration {
        Some("NARRATION")
    } else {
        None
    };
    if let Some(tag) = delivery {
        label.push_str(&format!(" ({tag})"));
    }
    if line.off_panel {
        label.push_str(" (OFF-PANEL)");
    }
    label
}

pub fn export_json(script: &FormattedComicScript) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(script)
}
