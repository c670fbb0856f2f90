use serde::{Deserialize, Serialize};

/// Emotion assigned when nothing in the lexicon matches.
pub const NEUTRAL_EMOTION: &str = "neutral";

/// Rendering style of the whole book. Drives the art-direction opening sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComicStyle {
    Manga,
    European,
    Indie,
    #[default]
    #[serde(other)]
    Traditional,
}

impl ComicStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ComicStyle::Manga => "manga",
            ComicStyle::European => "european",
            ComicStyle::Indie => "indie",
            ComicStyle::Traditional => "traditional",
        }
    }
}

/// One discrete visual unit within a beat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moment {
    pub description: String,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default = "default_emotion")]
    pub emotion: String,
    /// 0.0 – 1.0
    #[serde(default = "default_importance")]
    pub importance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialogue: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration: Option<String>,
}

fn default_emotion() -> String {
    NEUTRAL_EMOTION.to_string()
}

fn default_importance() -> f64 {
    0.5
}

/// A unit of narrative input to be converted into panels.
///
/// When `moments` is non-empty it is authoritative and the description is not re-segmented.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beat {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moments: Option<Vec<Moment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
}

impl Beat {
    pub fn explicit_moments(&self) -> Option<&[Moment]> {
        self.moments.as_deref().filter(|m| !m.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    #[serde(default = "default_target_pages")]
    pub target_pages: u32,
    #[serde(default = "default_panels_per_page")]
    pub panels_per_page: u32,
    #[serde(default)]
    pub style: ComicStyle,
}

fn default_target_pages() -> u32 {
    1
}

fn default_panels_per_page() -> u32 {
    6
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            target_pages: default_target_pages(),
            panels_per_page: default_panels_per_page(),
            style: ComicStyle::default(),
        }
    }
}

impl GenerationOptions {
    /// Number of moments the selector keeps.
    pub fn target_panel_count(&self) -> usize {
        self.target_pages as usize * self.panels_per_page as usize
    }
}
