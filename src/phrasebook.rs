//! Built-in example phrases and their canonical corporate renditions.

/// Example casual phrases paired with known corporate renditions.
pub const EXAMPLES: &[(&str, &str)] = &[
    ("no cap", "I assure you this is completely true"),
    ("this is giving main character energy", "This demonstrates exceptional leadership qualities"),
    ("are you deadass?", "I require immediate clarification on this matter"),
    ("that's pretty mid", "This falls short of our expected standards"),
];

/// Looks up the canonical corporate rendition for a known example phrase.
///
/// Matching is case-insensitive on the whole phrase.
#[must_use]
pub fn lookup(phrase: &str) -> Option<&'static str> {
    let needle = phrase.to_lowercase();
    EXAMPLES.iter().find(|(casual, _)| *casual == needle).map(|(_, corporate)| *corporate)
}
