//! Randomized status phrase generation.
//!
//! Jobs describe what they are "doing" with a phrase picked from fixed word
//! pools. Generation sits behind [`PhraseGenerator`] so tests can inject a
//! deterministic source instead of the random word-pool cross product.

use rand::seq::IndexedRandom;
use rand::Rng;

/// Probability that a step produces a fresh phrase instead of reusing the
/// previous one.
pub const REFRESH_PROBABILITY: f64 = 0.25;

const VERBS: &[&str] = &["Starting up", "Booting", "Repairing", "Loading", "Checking"];
const ADJECTIVES: &[&str] = &["master", "radiant", "silent", "harmonic", "fast"];
const NOUNS: &[&str] = &[
    "solar array",
    "particle reshaper",
    "cosmic ray",
    "orbiter",
    "bit",
];

/// Source of status phrases for a job's progress reports.
///
/// `next_phrase` is called once per step with the previous step's phrase;
/// the generator decides whether to keep it or produce a new one. With no
/// previous phrase a new one is always produced.
pub trait PhraseGenerator: Send {
    fn next_phrase(&mut self, previous: Option<&str>) -> String;
}

/// Production generator: verb x adjective x noun picks, refreshed with
/// probability [`REFRESH_PROBABILITY`] per step.
#[derive(Debug, Default)]
pub struct WordPoolGenerator;

impl PhraseGenerator for WordPoolGenerator {
    fn next_phrase(&mut self, previous: Option<&str>) -> String {
        let mut rng = rand::rng();
        match previous {
            Some(phrase) if rng.random::<f64>() >= REFRESH_PROBABILITY => phrase.to_string(),
            _ => compose(&mut rng),
        }
    }
}

fn compose<R: Rng + ?Sized>(rng: &mut R) -> String {
    // The pools are non-empty constants, so `choose` cannot return None.
    let verb = VERBS.choose(rng).unwrap_or(&VERBS[0]);
    let adjective = ADJECTIVES.choose(rng).unwrap_or(&ADJECTIVES[0]);
    let noun = NOUNS.choose(rng).unwrap_or(&NOUNS[0]);
    format!("{verb} {adjective} {noun}...")
}
