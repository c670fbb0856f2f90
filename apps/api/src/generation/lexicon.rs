//! Lexicon classifiers — keyword and regex tagging of raw beat prose.
//!
//! Everything here is deterministic and order-sensitive: where a table is
//! scanned "first match wins", the table order is the priority order.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::beat::NEUTRAL_EMOTION;
use crate::models::comic::SfxStyle;

// ────────────────────────────────────────────────────────────────────────────
// Patterns
// ────────────────────────────────────────────────────────────────────────────

/// Action assigned when no verb pattern matches.
pub const DEFAULT_ACTION: &str = "standing";

/// Pose assigned when no action keyword matches.
pub const DEFAULT_POSE: &str = "standing";

/// Expression assigned for unmapped emotions.
pub const DEFAULT_EXPRESSION: &str = "neutral";

const BASE_IMPORTANCE: f64 = 0.5;
const INTENSITY_VERB_BONUS: f64 = 0.3;
const EMOTION_INTENSITY_BONUS: f64 = 0.2;
const LONG_SENTENCE_BONUS: f64 = 0.1;
const LONG_SENTENCE_CHARS: usize = 100;

static CAPITALIZED_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+\b").expect("valid regex"));

/// Capitalized words that start sentences far more often than they name anyone.
const NON_NAME_WORDS: &[&str] = &[
    "A", "After", "All", "An", "And", "As", "At", "Before", "But", "Finally", "For", "He",
    "Her", "His", "How", "If", "In", "Inside", "It", "Its", "Later", "Meanwhile", "Now", "On",
    "Once", "Outside", "She", "So", "Somewhere", "Still", "Suddenly", "That", "The", "Their",
    "Then", "There", "These", "They", "This", "Those", "We", "What", "When", "Where", "While",
    "Who", "Why", "With", "Yes", "No", "You",
];

static ACTION_VERB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(runs|running|ran|walks|walking|walked|jumps|jumping|jumped|leaps|leaping|leapt|fights|fighting|fought|punches|punching|punched|kicks|kicking|kicked|falls|falling|fell|sits|sitting|sat|stands|grabs|grabbing|grabbed|throws|throwing|threw|chases|chasing|chased|climbs|climbing|climbed|opens|opened|turns|turned|reaches|reached|screams|screamed|shouts|shouted|whispers|whispered|attacks|attacked|hides|hid|flees|fled|dodges|dodged|draws|drew|points|pointed|crashes|crashed)\b",
    )
    .expect("valid regex")
});

static INTENSITY_VERB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(explod\w*|crash\w*|attack\w*|fight\w*|fought|punch\w*|kick\w*|scream\w*|shout\w*|chas\w*|run|runs|running|ran|fall|falls|falling|fell|shoot\w*|kill\w*|die|dies|died|strik\w*|struck|slam\w*|smash\w*)\b",
    )
    .expect("valid regex")
});

static EMOTION_INTENSITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(suddenly|desperate\w*|furious\w*|terrified|terror|horror\w*|horrif\w*|shock\w*|rage|sobbing|trembling|panic\w*)\b",
    )
    .expect("valid regex")
});

/// Ordered emotion lexicon. Checked top to bottom; first hit wins.
static EMOTION_LEXICON: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        (
            "happy",
            r"(?i)\b(happy|happily|joy\w*|smil\w*|laugh\w*|grin\w*|delight\w*)\b",
        ),
        (
            "sad",
            r"(?i)\b(sad|sadly|sadness|cry|cries|crying|cried|tears|sob\w*|griev\w*|mourn\w*)\b",
        ),
        (
            "angry",
            r"(?i)\b(angry|angrily|anger|rage|raging|furious\w*|glar\w*|snarl\w*)\b",
        ),
        (
            "scared",
            r"(?i)\b(scared|afraid|fear\w*|terrif\w*|trembl\w*|panic\w*)\b",
        ),
        (
            "surprised",
            r"(?i)\b(surpris\w*|shock\w*|gasp\w*|astonish\w*|stunned)\b",
        ),
    ]
    .into_iter()
    .map(|(emotion, pattern)| (emotion, Regex::new(pattern).expect("valid regex")))
    .collect()
});

static QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["“]([^"“”]*)["”]"#).expect("valid regex"));

/// Ordered (pattern, style) table for sound effects. Group 1 is the printed token.
static SFX_PATTERNS: LazyLock<Vec<(Regex, SfxStyle)>> = LazyLock::new(|| {
    [
        (r"\b(kaboom|boom|blam|blast|explosion)(?:s|ed)?\b", SfxStyle::Explosive),
        (r"\b(crash|smash|crack|shatter|bang)(?:es|ed|s)?\b", SfxStyle::Jagged),
        (r"\b(thud|thump|wham|pow|punch|slam)(?:es|ed|med|s)?\b", SfxStyle::Bold),
        (r"\b(whoosh|swoosh|swish|zoom|whirl)(?:es|ed|s)?\b", SfxStyle::Curved),
        (r"\b(whisper|hush|shh+|rustle|creak)(?:ed|d|s)?\b", SfxStyle::Whisper),
    ]
    .into_iter()
    .map(|(pattern, style)| (Regex::new(pattern).expect("valid regex"), style))
    .collect()
});

const THOUGHT_KEYWORDS: &[&str] = &["think", "thought", "wonder", "imagine"];
const WHISPER_KEYWORDS: &[&str] = &["whisper", "quietly", "softly"];
const SHOUT_KEYWORDS: &[&str] = &["shout", "yell", "scream", "roar"];

/// Action keyword → pose, in priority order.
const POSE_TABLE: &[(&[&str], &str)] = &[
    (&["run", "chase"], "running"),
    (&["fight", "punch"], "fighting stance"),
    (&["sit"], "sitting"),
    (&["fall"], "falling"),
    (&["jump"], "jumping"),
];

const EXPRESSION_TABLE: &[(&str, &str)] = &[
    ("happy", "smiling"),
    ("sad", "tearful"),
    ("angry", "scowling"),
    ("scared", "wide-eyed with fear"),
    ("surprised", "shocked"),
    ("neutral", "neutral"),
];

// ────────────────────────────────────────────────────────────────────────────
// Classifiers
// ────────────────────────────────────────────────────────────────────────────

/// Capitalized-word proper-noun heuristic. De-duplicated, first appearance order.
pub fn detect_characters(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for m in CAPITALIZED_WORD_RE.find_iter(text) {
        let word = m.as_str();
        if NON_NAME_WORDS.contains(&word) || names.iter().any(|n| n == word) {
            continue;
        }
        names.push(word.to_string());
    }
    names
}

/// Recognized action verbs joined with ", ", or `"standing"` when none match.
pub fn detect_action(text: &str) -> String {
    let mut verbs: Vec<String> = Vec::new();
    for m in ACTION_VERB_RE.find_iter(text) {
        let verb = m.as_str().to_lowercase();
        if !verbs.contains(&verb) {
            verbs.push(verb);
        }
    }
    if verbs.is_empty() {
        DEFAULT_ACTION.to_string()
    } else {
        verbs.join(", ")
    }
}

/// First matching emotion in lexicon order, else `"neutral"`.
pub fn detect_emotion(text: &str) -> &'static str {
    EMOTION_LEXICON
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(emotion, _)| *emotion)
        .unwrap_or(NEUTRAL_EMOTION)
}

/// Heuristic visual importance of a sentence, in [0.5, 1.0].
pub fn score_importance(sentence: &str) -> f64 {
    let mut score = BASE_IMPORTANCE;
    if INTENSITY_VERB_RE.is_match(sentence) {
        score += INTENSITY_VERB_BONUS;
    }
    if EMOTION_INTENSITY_RE.is_match(sentence) {
        score += EMOTION_INTENSITY_BONUS;
    }
    if sentence.chars().count() > LONG_SENTENCE_CHARS {
        score += LONG_SENTENCE_BONUS;
    }
    score.min(1.0)
}

/// Text inside double quotes, straight or curly. Empty quotes are skipped.
pub fn extract_quotes(text: &str) -> Vec<String> {
    QUOTE_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// The text with every quoted span blanked out, leaving only the narration.
pub fn strip_quotes(text: &str) -> String {
    QUOTE_RE.replace_all(text, " ").into_owned()
}

/// Delivery flags for a generated dialogue line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialogueTone {
    pub thought: bool,
    pub whisper: bool,
    pub shout: bool,
}

/// Classifies a dialogue line from its own text: delivery keywords, plus an
/// exclamation mark for shouting.
pub fn classify_dialogue(line: &str) -> DialogueTone {
    let lowered = line.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|w| lowered.contains(w));
    DialogueTone {
        thought: has_any(THOUGHT_KEYWORDS),
        whisper: has_any(WHISPER_KEYWORDS),
        shout: has_any(SHOUT_KEYWORDS) || line.contains('!'),
    }
}

pub fn pose_for_action(action: &str) -> &'static str {
    let action = action.to_lowercase();
    POSE_TABLE
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| action.contains(k)))
        .map(|(_, pose)| *pose)
        .unwrap_or(DEFAULT_POSE)
}

pub fn expression_for_emotion(emotion: &str) -> &'static str {
    let emotion = emotion.trim().to_lowercase();
    EXPRESSION_TABLE
        .iter()
        .find(|(e, _)| *e == emotion)
        .map(|(_, expr)| *expr)
        .unwrap_or(DEFAULT_EXPRESSION)
}

/// Scans the lower-cased description against the SFX table. Each pattern
/// contributes at most one effect; the token is returned upper-cased.
pub fn detect_sound_effects(description: &str) -> Vec<(String, SfxStyle)> {
    let lowered = description.to_lowercase();
    SFX_PATTERNS
        .iter()
        .filter_map(|(re, style)| {
            re.captures(&lowered)
                .and_then(|c| c.get(1))
                .map(|m| (m.as_str().to_uppercase(), *style))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_characters_deduplicated_in_order() {
        let names = detect_characters("Mara shoves Theo aside while Mara reloads.");
        assert_eq!(names, vec!["Mara", "Theo"]);
    }

    #[test]
    fn test_characters_skip_sentence_starters() {
        let names = detect_characters("The rain falls on Kestrel");
        assert_eq!(names, vec!["Kestrel"]);
    }

    #[test]
    fn test_action_defaults_to_standing() {
        assert_eq!(detect_action("A quiet street at dawn"), "standing");
    }

    #[test]
    fn test_action_joins_verbs() {
        assert_eq!(
            detect_action("Theo grabs the rope and jumps"),
            "grabs, jumps"
        );
    }

    #[test]
    fn test_emotion_first_match_wins() {
        // "laughs" (happy) and "tears" (sad) both present; happy is checked first.
        assert_eq!(detect_emotion("She laughs through her tears"), "happy");
        assert_eq!(detect_emotion("He glares at the screen"), "angry");
        assert_eq!(detect_emotion("The kettle boils"), "neutral");
    }

    #[test]
    fn test_importance_base_and_bonuses() {
        assert!((score_importance("A cat sleeps") - 0.5).abs() < 1e-9);
        assert!((score_importance("Mara runs") - 0.8).abs() < 1e-9);
        assert!((score_importance("Suddenly Mara runs") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_importance_capped_at_one() {
        let long = format!(
            "Suddenly the tower explodes and Mara runs {}",
            "through the smoke ".repeat(8)
        );
        assert!(long.len() > 100);
        assert!((score_importance(&long) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_long_sentence_bonus() {
        let long = "word ".repeat(25);
        assert!((score_importance(&long) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_extract_quotes() {
        let quotes = extract_quotes(r#""Get down!" Mara yells. "" "Now," she adds."#);
        assert_eq!(quotes, vec!["Get down!", "Now,"]);
    }

    #[test]
    fn test_strip_quotes_leaves_narration() {
        let narration = strip_quotes(r#"Theo whispers "Behind you" to Mara"#);
        assert_eq!(detect_characters(&narration), vec!["Theo", "Mara"]);
    }

    #[test]
    fn test_classify_dialogue() {
        let tone = classify_dialogue("Get down!");
        assert!(tone.shout && !tone.whisper && !tone.thought);
        let tone = classify_dialogue("Quietly, over here");
        assert!(tone.whisper && !tone.shout);
        let tone = classify_dialogue("I wonder where he went");
        assert!(tone.thought);
        assert_eq!(classify_dialogue("Hello there"), DialogueTone::default());
    }

    #[test]
    fn test_pose_priority() {
        // "chases" and "punches" both present; running is checked first.
        assert_eq!(pose_for_action("chases, punches"), "running");
        assert_eq!(pose_for_action("punches"), "fighting stance");
        assert_eq!(pose_for_action("sits"), "sitting");
        assert_eq!(pose_for_action("falls"), "falling");
        assert_eq!(pose_for_action("jumps"), "jumping");
        assert_eq!(pose_for_action("standing"), "standing");
    }

    #[test]
    fn test_expression_lookup() {
        assert_eq!(expression_for_emotion("scared"), "wide-eyed with fear");
        assert_eq!(expression_for_emotion("melancholy"), "neutral");
    }

    #[test]
    fn test_sound_effects_one_per_pattern() {
        let sfx = detect_sound_effects("The wall CRASHES down, then another crash and a BOOM");
        assert_eq!(
            sfx,
            vec![
                ("BOOM".to_string(), SfxStyle::Explosive),
                ("CRASH".to_string(), SfxStyle::Jagged),
            ]
        );
    }

    #[test]
    fn test_no_sound_effects_in_quiet_prose() {
        assert!(detect_sound_effects("Snow settles on the roof").is_empty());
    }
}
