//! Flesch Reading Ease.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Flesch Reading Ease band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum ReadabilityLevel {
    #[strum(serialize = "Very Easy")]
    #[serde(rename = "Very Easy")]
    VeryEasy,
    Easy,
    #[strum(serialize = "Fairly Easy")]
    #[serde(rename = "Fairly Easy")]
    FairlyEasy,
    Standard,
    #[strum(serialize = "Fairly Difficult")]
    #[serde(rename = "Fairly Difficult")]
    FairlyDifficult,
    Difficult,
    #[strum(serialize = "Very Confusing")]
    #[serde(rename = "Very Confusing")]
    VeryConfusing,
}

impl ReadabilityLevel {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Self::VeryEasy,
            s if s >= 80.0 => Self::Easy,
            s if s >= 70.0 => Self::FairlyEasy,
            s if s >= 60.0 => Self::Standard,
            s if s >= 50.0 => Self::FairlyDifficult,
            s if s >= 30.0 => Self::Difficult,
            _ => Self::VeryConfusing,
        }
    }
}

/// Score and band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    /// One decimal. May fall outside 0..=100 for extreme text.
    pub score: f64,
    pub level: ReadabilityLevel,
}

/// Flesch Reading Ease for pre-tokenized text. `None` without words.
pub fn flesch_reading_ease(words: &[&str], sentence_count: usize) -> Option<Readability> {
    if words.is_empty() {
        return None;
    }
    let sentences = sentence_count.max(1) as f64;
    let word_count = words.len() as f64;
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let words_per_sentence = word_count / sentences;
    let syllables_per_word = syllables as f64 / word_count;
    let raw = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    let score = (raw * 10.0).round() / 10.0;

    Some(Readability {
        score,
        level: ReadabilityLevel::from_score(score),
    })
}

/// Vowel-group heuristic; every word has at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(|c| c.to_lowercase())
        .collect();
    if letters.is_empty() {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0;
    let mut prev_was_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = vowel;
    }

    // silent trailing e
    if letters.len() > 2 && letters.ends_with(&['e']) && !letters.ends_with(&['l', 'e']) && count > 1 {
        count -= 1;
    }

    count.max(1)
}
