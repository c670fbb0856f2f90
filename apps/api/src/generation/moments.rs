//! Moment Extractor — turns a beat into an ordered list of visual moments.
//!
//! Explicit moments on the beat are authoritative and returned untouched.
//! Otherwise the prose is split into sentences and each sentence is tagged by
//! the lexicon classifiers.

use tracing::debug;

use crate::generation::lexicon::{
    detect_action, detect_characters, detect_emotion, extract_quotes, score_importance,
    strip_quotes,
};
use crate::models::beat::{Beat, Moment};

/// Returns the beat's explicit moments unchanged, or derives one moment per sentence.
pub fn extract_moments(beat: &Beat) -> Vec<Moment> {
    if let Some(explicit) = beat.explicit_moments() {
        debug!("Using {} explicit moments", explicit.len());
        return explicit.to_vec();
    }

    let moments: Vec<Moment> = split_sentences(&beat.description)
        .into_iter()
        .map(moment_from_sentence)
        .collect();

    debug!("Derived {} moments from beat prose", moments.len());
    moments
}

fn moment_from_sentence(sentence: &str) -> Moment {
    let quotes = extract_quotes(sentence);
    // Names and verbs come from the narration; quoted speech only feeds dialogue.
    let narration = strip_quotes(sentence);
    Moment {
        description: sentence.to_string(),
        characters: detect_characters(&narration),
        action: detect_action(&narration),
        emotion: detect_emotion(sentence).to_string(),
        importance: score_importance(sentence),
        dialogue: if quotes.is_empty() { None } else { Some(quotes) },
        narration: None,
    }
}

/// Splits prose on `.`, `!` and `?`.
///
/// A run of terminators (`?!`, `...`) is one boundary, terminators inside
/// double quotes do not split, and whitespace-only fragments are dropped.
/// Terminators at a boundary are not kept in the sentence text. A quote left
/// open at the end of the text is treated as a stray mark and the text is
/// split again ignoring quotes.
pub fn split_sentences(text: &str) -> Vec<&str> {
    match split_on_terminators(text, true) {
        Some(sentences) => sentences,
        None => split_on_terminators(text, false).unwrap_or_default(),
    }
}

/// `None` when quote tracking is on and a quote is still open at the end.
fn split_on_terminators(text: &str, quote_aware: bool) -> Option<Vec<&str>> {
    let mut sentences = Vec::new();
    let mut in_quotes = false;
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        match c {
            '"' if quote_aware => in_quotes = !in_quotes,
            '“' if quote_aware => in_quotes = true,
            '”' if quote_aware => in_quotes = false,
            '.' | '!' | '?' if !in_quotes => {
                push_fragment(&mut sentences, &text[start..idx]);
                let mut end = idx + c.len_utf8();
                while let Some(&(next_idx, next)) = chars.peek() {
                    if matches!(next, '.' | '!' | '?') {
                        end = next_idx + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                start = end;
            }
            _ => {}
        }
    }
    if in_quotes {
        return None;
    }
    push_fragment(&mut sentences, &text[start..]);
    Some(sentences)
}

fn push_fragment<'a>(out: &mut Vec<&'a str>, fragment: &'a str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        out.push(trimmed);
    }
}
