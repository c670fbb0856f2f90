//! Panel Assembler — combines a moment, its synthesized composition and the
//! beat's scene context into a numbered `ComicPanel`.

use crate::generation::composition::SynthesizedPanel;
use crate::generation::lexicon::{
    classify_dialogue, detect_sound_effects, expression_for_emotion, pose_for_action,
};
use crate::models::beat::{Beat, Moment};
use crate::models::comic::{
    ComicCharacter, ComicPanel, Dialogue, Facing, PanelSize, Point, SoundEffect,
};

/// Location used when the beat does not name one.
pub const DEFAULT_LOCATION: &str = "Unspecified location";

/// Speaker used for dialogue in a moment with no detected characters.
pub const UNKNOWN_SPEAKER: &str = "Unknown";

const SFX_POSITION: Point = Point { x: 0.5, y: 0.3 };
const SFX_SIZE: f64 = 1.0;

/// How placed characters face the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingMode {
    /// Everyone faces the reader.
    Forward,
    /// Even indices face right, odd face left, so pairs face each other.
    Alternating,
}

/// Scene-level data shared by every panel of a beat.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneContext {
    pub location: String,
    pub time_of_day: Option<String>,
}

impl SceneContext {
    pub fn from_beat(beat: &Beat) -> Self {
        let location = beat
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LOCATION)
            .to_string();
        let time_of_day = beat
            .time_of_day
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Self {
            location,
            time_of_day,
        }
    }
}

/// >= 0.9 full-page, >= 0.7 large, >= 0.4 medium, otherwise small.
pub fn size_for_importance(importance: f64) -> PanelSize {
    if importance >= 0.9 {
        PanelSize::FullPage
    } else if importance >= 0.7 {
        PanelSize::Large
    } else if importance >= 0.4 {
        PanelSize::Medium
    } else {
        PanelSize::Small
    }
}

/// Spreads characters evenly across the panel at mid height: x = (i+1)/(n+1).
pub fn place_characters(moment: &Moment, facing: FacingMode) -> Vec<ComicCharacter> {
    let count = moment.characters.len();
    let expression = expression_for_emotion(&moment.emotion);
    let pose = pose_for_action(&moment.action);

    moment
        .characters
        .iter()
        .enumerate()
        .map(|(i, name)| ComicCharacter {
            name: name.clone(),
            expression: expression.to_string(),
            pose: pose.to_string(),
            position: Point::new((i + 1) as f64 / (count + 1) as f64, 0.5),
            facing: match facing {
                FacingMode::Forward => Facing::Forward,
                FacingMode::Alternating if i % 2 == 0 => Facing::Right,
                FacingMode::Alternating => Facing::Left,
            },
        })
        .collect()
}

/// One dialogue entry per line; speakers are assigned round-robin.
pub fn build_dialogue(moment: &Moment) -> Vec<Dialogue> {
    let Some(lines) = &moment.dialogue else {
        return Vec::new();
    };

    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let speaker = if moment.characters.is_empty() {
                UNKNOWN_SPEAKER.to_string()
            } else {
                moment.characters[i % moment.characters.len()].clone()
            };
            let tone = classify_dialogue(line);
            Dialogue {
                character: speaker,
                text: line.clone(),
                thought: tone.thought,
                whisper: tone.whisper,
                shout: tone.shout,
                ..Default::default()
            }
        })
        .collect()
}

pub fn build_sound_effects(moment: &Moment) -> Vec<SoundEffect> {
    detect_sound_effects(&moment.description)
        .into_iter()
        .map(|(text, style)| SoundEffect {
            text,
            style,
            position: SFX_POSITION,
            size: SFX_SIZE,
        })
        .collect()
}

/// Builds the panel. Numbering here is global to the beat; the page packer
/// renumbers per page.
pub fn assemble_panel(
    moment: &Moment,
    synthesized: SynthesizedPanel,
    panel_number: u32,
    scene: &SceneContext,
) -> ComicPanel {
    let captions = moment
        .narration
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| vec![n.to_string()])
        .unwrap_or_default();

    ComicPanel {
        number: panel_number,
        size: size_for_importance(moment.importance),
        description: moment.description.clone(),
        art_direction: synthesized.art_direction,
        composition: synthesized.composition,
        characters: synthesized.characters,
        location: scene.location.clone(),
        time_of_day: scene.time_of_day.clone(),
        captions,
        dialogue: synthesized.dialogue,
        sfx: synthesized.sfx,
        border: None,
        bleed: None,
        transition: None,
    }
}
