//! Panel and page data model shared by the generation pipeline and the script formatter.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Closed vocabularies
// ────────────────────────────────────────────────────────────────────────────

/// Camera framing for a panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShotType {
    EstablishingShot,
    WideShot,
    FullShot,
    #[default]
    MediumShot,
    MediumCloseUp,
    CloseUp,
    ExtremeCloseUp,
    OverTheShoulder,
    BirdsEyeView,
    WormsEyeView,
}

impl ShotType {
    pub const ALL: [ShotType; 10] = [
        ShotType::EstablishingShot,
        ShotType::WideShot,
        ShotType::FullShot,
        ShotType::MediumShot,
        ShotType::MediumCloseUp,
        ShotType::CloseUp,
        ShotType::ExtremeCloseUp,
        ShotType::OverTheShoulder,
        ShotType::BirdsEyeView,
        ShotType::WormsEyeView,
    ];

    /// Wire name, e.g. `medium-shot`.
    pub fn as_str(self) -> &'static str {
        match self {
            ShotType::EstablishingShot => "establishing-shot",
            ShotType::WideShot => "wide-shot",
            ShotType::FullShot => "full-shot",
            ShotType::MediumShot => "medium-shot",
            ShotType::MediumCloseUp => "medium-close-up",
            ShotType::CloseUp => "close-up",
            ShotType::ExtremeCloseUp => "extreme-close-up",
            ShotType::OverTheShoulder => "over-the-shoulder",
            ShotType::BirdsEyeView => "birds-eye-view",
            ShotType::WormsEyeView => "worms-eye-view",
        }
    }

    /// Human-readable label used in art direction text.
    pub fn label(self) -> &'static str {
        match self {
            ShotType::EstablishingShot => "Establishing shot",
            ShotType::WideShot => "Wide shot",
            ShotType::FullShot => "Full shot",
            ShotType::MediumShot => "Medium shot",
            ShotType::MediumCloseUp => "Medium close-up",
            ShotType::CloseUp => "Close-up",
            ShotType::ExtremeCloseUp => "Extreme close-up",
            ShotType::OverTheShoulder => "Over-the-shoulder shot",
            ShotType::BirdsEyeView => "Bird's-eye view",
            ShotType::WormsEyeView => "Worm's-eye view",
        }
    }

    /// Lenient lookup: case-insensitive, accepts `_` or spaces in place of `-`.
    /// Returns `None` for anything outside the vocabulary.
    pub fn parse(raw: &str) -> Option<Self> {
        let key = normalize_key(raw);
        Self::ALL.into_iter().find(|s| s.as_str() == key)
    }
}

/// Camera angle for a panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraAngle {
    #[default]
    EyeLevel,
    HighAngle,
    LowAngle,
    DutchAngle,
    BirdsEye,
    WormsEye,
}

impl CameraAngle {
    pub const ALL: [CameraAngle; 6] = [
        CameraAngle::EyeLevel,
        CameraAngle::HighAngle,
        CameraAngle::LowAngle,
        CameraAngle::DutchAngle,
        CameraAngle::BirdsEye,
        CameraAngle::WormsEye,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CameraAngle::EyeLevel => "eye-level",
            CameraAngle::HighAngle => "high-angle",
            CameraAngle::LowAngle => "low-angle",
            CameraAngle::DutchAngle => "dutch-angle",
            CameraAngle::BirdsEye => "birds-eye",
            CameraAngle::WormsEye => "worms-eye",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CameraAngle::EyeLevel => "eye level",
            CameraAngle::HighAngle => "high angle",
            CameraAngle::LowAngle => "low angle",
            CameraAngle::DutchAngle => "dutch angle",
            CameraAngle::BirdsEye => "bird's-eye angle",
            CameraAngle::WormsEye => "worm's-eye angle",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let key = normalize_key(raw);
        Self::ALL.into_iter().find(|a| a.as_str() == key)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Perspective {
    OnePoint,
    #[default]
    TwoPoint,
    ThreePoint,
    Isometric,
}

impl Perspective {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_key(raw).as_str() {
            "one-point" => Some(Perspective::OnePoint),
            "two-point" => Some(Perspective::TwoPoint),
            "three-point" => Some(Perspective::ThreePoint),
            "isometric" => Some(Perspective::Isometric),
            _ => None,
        }
    }
}

/// Size tier of a panel on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelSize {
    Small,
    Medium,
    Large,
    FullPage,
    DoublePageSpread,
}

impl PanelSize {
    pub fn as_str(self) -> &'static str {
        match self {
            PanelSize::Small => "small",
            PanelSize::Medium => "medium",
            PanelSize::Large => "large",
            PanelSize::FullPage => "full-page",
            PanelSize::DoublePageSpread => "double-page-spread",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Facing {
    Left,
    Right,
    Forward,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SfxStyle {
    Bold,
    Jagged,
    Curved,
    Explosive,
    Whisper,
}

impl SfxStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            SfxStyle::Bold => "bold",
            SfxStyle::Jagged => "jagged",
            SfxStyle::Curved => "curved",
            SfxStyle::Explosive => "explosive",
            SfxStyle::Whisper => "whisper",
        }
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Structures
// ────────────────────────────────────────────────────────────────────────────

/// A normalized point in panel space. Both coordinates are in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const CENTER: Point = Point { x: 0.5, y: 0.5 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lighting {
    #[serde(rename = "type")]
    pub kind: String,
    /// Degrees.
    pub direction: f64,
    /// 0.0 – 1.0
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelComposition {
    pub shot_type: ShotType,
    pub angle: CameraAngle,
    pub perspective: Perspective,
    pub focal_point: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting: Option<Lighting>,
}

impl Default for PanelComposition {
    /// Medium shot at eye level, two-point perspective, centered focus.
    fn default() -> Self {
        Self {
            shot_type: ShotType::MediumShot,
            angle: CameraAngle::EyeLevel,
            perspective: Perspective::TwoPoint,
            focal_point: Point::CENTER,
            lighting: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicCharacter {
    pub name: String,
    pub expression: String,
    pub pose: String,
    pub position: Point,
    pub facing: Facing,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialogue {
    pub character: String,
    pub text: String,
    #[serde(default)]
    pub thought: bool,
    #[serde(default)]
    pub whisper: bool,
    #[serde(default)]
    pub shout: bool,
    #[serde(default)]
    pub narration: bool,
    #[serde(default)]
    pub off_panel: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundEffect {
    pub text: String,
    pub style: SfxStyle,
    pub position: Point,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicPanel {
    pub number: u32,
    pub size: PanelSize,
    pub description: String,
    pub art_direction: String,
    pub composition: PanelComposition,
    #[serde(default)]
    pub characters: Vec<ComicCharacter>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
    #[serde(default)]
    pub captions: Vec<String>,
    #[serde(default)]
    pub dialogue: Vec<Dialogue>,
    #[serde(default)]
    pub sfx: Vec<SoundEffect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bleed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicPage {
    pub page_number: u32,
    pub panels: Vec<ComicPanel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_suggestion: Option<String>,
}
