//! Keyword rules that turn a free-text description into a preset.
//!
//! Matching is plain case-insensitive substring search. Each rule is checked
//! independently against the whole text; rules touching the same field
//! (the two size rules) resolve as last match wins.

use crate::models::{PartialPreset, Size};

/// What a matching rule writes into the preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresetEffect {
    Size(Size),
    Shedding(f64),
    Energy(f64),
    Temperament(&'static [&'static str]),
}

impl PresetEffect {
    fn apply(&self, preset: &mut PartialPreset) {
        match *self {
            PresetEffect::Size(size) => preset.size = Some(size),
            PresetEffect::Shedding(value) => preset.shedding = Some(value),
            PresetEffect::Energy(value) => preset.energy = Some(value),
            PresetEffect::Temperament(tags) => {
                preset.temperament = Some(tags.iter().map(|tag| tag.to_string()).collect())
            }
        }
    }
}

/// A set of trigger phrases and the effect they have when any one is present
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordRule {
    pub triggers: &'static [&'static str],
    pub effect: PresetEffect,
}

impl KeywordRule {
    /// `text` must already be normalized with [`normalize`]
    fn matches(&self, text: &str) -> bool {
        self.triggers.iter().any(|trigger| text.contains(trigger))
    }
}

/// Rules in evaluation order
pub const RULES: &[KeywordRule] = &[
    KeywordRule {
        triggers: &["small", "little"],
        effect: PresetEffect::Size(Size::Small),
    },
    KeywordRule {
        triggers: &["big", "large"],
        effect: PresetEffect::Size(Size::Large),
    },
    KeywordRule {
        triggers: &["no shed", "doesn't shed"],
        effect: PresetEffect::Shedding(0.0),
    },
    KeywordRule {
        triggers: &["calm", "low energy"],
        effect: PresetEffect::Energy(0.25),
    },
    KeywordRule {
        triggers: &["loyal"],
        effect: PresetEffect::Temperament(&["Loyal"]),
    },
];

fn normalize(text: &str) -> String {
    // Typographic apostrophes from mobile keyboards
    text.to_lowercase().replace('\u{2019}', "'")
}

/// Extract a partial preset from free text
///
/// Never fails: text with no recognized keywords yields an empty preset and
/// the caller applies defaults.
pub fn extract(text: &str) -> PartialPreset {
    let normalized = normalize(text);

    let preset = RULES
        .iter()
        .filter(|rule| rule.matches(&normalized))
        .fold(PartialPreset::default(), |mut preset, rule| {
            rule.effect.apply(&mut preset);
            preset
        });

    tracing::debug!(
        "Extracted preset from {} chars of text: {:?}",
        text.len(),
        preset
    );

    preset
}
