//! Cloze word selection.
//!
//! `find_cloze` picks the single word worth hiding in a sentence: the valid
//! candidate with the lowest frequency rank, i.e. the most common word the
//! learner should still be drilled on. Proper-noun-looking tokens and tiny
//! function words are filtered out before ranking.

use rand::Rng;

use crate::index::FrequencyIndex;

/// Source of randomness for the no-frequency-information fallback.
///
/// Only consulted when a sentence has valid candidate words but none of them
/// appears in the frequency list. Injectable so tests can pin the choice.
pub trait RandomSource {
    /// Pick an index in `0..len`. Callers guarantee `len > 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Thread-local RNG used by the real pipeline.
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Replace every ASCII punctuation character with a single space.
///
/// A space rather than a deletion, so `"fin.Début"` splits into two tokens
/// instead of merging into one.
fn strip_punctuation(sentence: &str) -> String {
    sentence
        .chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect()
}

/// Every alphabetic character uppercase, and at least one of them.
fn is_all_uppercase(word: &str) -> bool {
    let mut cased = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            cased = true;
            if !c.is_uppercase() {
                return false;
            }
        }
    }
    cased
}

/// First character uppercase, remaining alphabetic characters lowercase.
fn is_title_case(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(|c| !c.is_alphabetic() || c.is_lowercase()),
        _ => false,
    }
}

/// Pick the word to blank out of `sentence`.
///
/// Candidates are the whitespace-separated tokens left after punctuation
/// stripping, minus all-uppercase and title-case tokens (proper-noun
/// heuristic, which also drops the sentence-initial word) and tokens of two
/// characters or fewer. Among candidates the lowest frequency rank wins;
/// ties keep the earliest occurrence. When candidates exist but none has a
/// known rank, one is chosen through `rng`; with no candidates at all the
/// result is `None`.
pub fn find_cloze(
    sentence: &str,
    frequency: &FrequencyIndex,
    rng: &mut dyn RandomSource,
) -> Option<String> {
    let cleaned = strip_punctuation(sentence);

    let mut valid_words: Vec<&str> = Vec::new();
    let mut min_word: Option<&str> = None;
    let mut min_rank = frequency.unknown_rank();

    for word in cleaned.split_whitespace() {
        if is_all_uppercase(word) || is_title_case(word) {
            continue;
        }
        if word.chars().count() <= 2 {
            continue;
        }
        valid_words.push(word);

        let rank = frequency.rank(word);
        if rank < min_rank {
            min_word = Some(word);
            min_rank = rank;
        }
    }

    if let Some(word) = min_word {
        Some(word.to_string())
    } else if valid_words.is_empty() {
        None
    } else {
        Some(valid_words[rng.pick(valid_words.len())].to_string())
    }
}
