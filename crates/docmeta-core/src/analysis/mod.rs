//! Text statistics.
//!
//! All functions here are pure and deterministic: the same cleaned text
//! always yields the same counts.

mod readability;
mod stopwords;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use readability::{count_syllables, flesch_reading_ease, Readability, ReadabilityLevel};

use crate::config::AnalysisConfig;
use crate::types::WordCount;

static INLINE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]+").expect("valid regex"));
static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

/// Statistics for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub character_count: usize,
    pub character_count_no_spaces: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub line_count: usize,
    pub reading_time_minutes: u32,
    pub top_words: Vec<WordCount>,
    pub avg_word_length: f64,
    pub avg_sentence_length: f64,
    pub readability: Option<Readability>,
}

/// Normalize extracted text before analysis.
pub fn clean_text(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let printable: String = normalized
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();
    let collapsed = INLINE_WHITESPACE.replace_all(&printable, " ");
    let trimmed_lines = collapsed
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");
    EXCESS_NEWLINES
        .replace_all(&trimmed_lines, "\n\n")
        .trim()
        .to_string()
}

/// At least 10 non-whitespace characters and 3 words containing a letter.
pub fn is_text_meaningful(text: &str) -> bool {
    let visible = text.chars().filter(|c| !c.is_whitespace()).count();
    if visible < 10 {
        return false;
    }
    text.split_whitespace()
        .filter(|w| w.chars().any(char::is_alphabetic))
        .take(3)
        .count()
        >= 3
}

/// Compute every statistic for already-cleaned text.
pub fn analyze_text(text: &str, config: &AnalysisConfig) -> TextAnalysis {
    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len();
    let sentence_count = count_sentences(text, word_count);

    let letters: usize = words
        .iter()
        .map(|w| w.chars().filter(|c| c.is_alphabetic()).count())
        .sum();

    TextAnalysis {
        character_count: text.chars().count(),
        character_count_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
        word_count,
        sentence_count,
        paragraph_count: count_paragraphs(text),
        line_count: text.lines().filter(|l| !l.trim().is_empty()).count(),
        reading_time_minutes: reading_time_minutes(word_count, config.reading_speed_wpm),
        top_words: top_words(text, config.top_words_limit),
        avg_word_length: ratio(letters, word_count),
        avg_sentence_length: ratio(word_count, sentence_count),
        readability: flesch_reading_ease(&words, sentence_count),
    }
}

/// Segments split on `.`, `!`, `?` that contain something alphanumeric.
pub fn count_sentences(text: &str, word_count: usize) -> usize {
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count();
    if word_count > 0 {
        sentences.max(1)
    } else {
        sentences
    }
}

pub fn count_paragraphs(text: &str) -> usize {
    PARAGRAPH_BREAK
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .count()
}

/// Whole minutes, rounded up.
pub fn reading_time_minutes(word_count: usize, wpm: u32) -> u32 {
    if word_count == 0 {
        return 0;
    }
    let wpm = wpm.max(1) as usize;
    word_count.div_ceil(wpm) as u32
}

/// Most frequent non-stop-words of three or more letters.
pub fn top_words(text: &str, limit: usize) -> Vec<WordCount> {
    let lowered = text.to_lowercase();
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for token in lowered.split(|c: char| !c.is_alphabetic()) {
        if token.chars().count() >= 3 && !stopwords::is_stop_word(token) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut words: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount::new(word, count))
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    words.truncate(limit);
    words
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let value = numerator as f64 / denominator as f64;
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AnalysisConfig {
        AnalysisConfig::default()
    }

    #[test]
    fn test_clean_text() {
        let raw = "  Title\r\n\r\n\r\n\r\nFirst   line\twith\x07 tabs  \r\nsecond line \n\n\n\n";
        assert_eq!(clean_text(raw), "Title\n\nFirst line with tabs\nsecond line");
    }

    #[test]
    fn test_clean_text_is_idempotent() {
        let once = clean_text("a  b\n\n\n\nc\r\nd ");
        assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn test_is_text_meaningful() {
        assert!(is_text_meaningful("This is a real sentence."));
        assert!(!is_text_meaningful(""));
        assert!(!is_text_meaningful("short"));
        assert!(!is_text_meaningful("1234567890 1234 5678"));
        assert!(!is_text_meaningful("Longword anotherword"));
    }

    #[test]
    fn test_counts() {
        let text = "The first paragraph has two sentences. Here is the second!\n\n\
                    Second paragraph starts here.\nIt spans two lines?";
        let analysis = analyze_text(text, &config());

        assert_eq!(analysis.word_count, 18);
        assert_eq!(analysis.sentence_count, 4);
        assert_eq!(analysis.paragraph_count, 2);
        assert_eq!(analysis.line_count, 3);
        assert_eq!(analysis.character_count, text.chars().count());
        assert_eq!(
            analysis.character_count_no_spaces,
            text.chars().filter(|c| !c.is_whitespace()).count()
        );
        assert_eq!(analysis.reading_time_minutes, 1);
        assert_eq!(analysis.avg_sentence_length, 4.5);
    }

    #[test]
    fn test_counts_are_deterministic() {
        let text = "Alpha beta gamma. Delta epsilon zeta!\n\nEta theta.";
        assert_eq!(analyze_text(text, &config()), analyze_text(text, &config()));
    }

    #[test]
    fn test_sentence_without_terminal_punctuation() {
        assert_eq!(count_sentences("no punctuation at all", 4), 1);
        assert_eq!(count_sentences("...", 1), 1);
        assert_eq!(count_sentences("", 0), 0);
        assert_eq!(count_sentences("Version 2.5 is out.", 4), 2);
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time_minutes(0, 200), 0);
        assert_eq!(reading_time_minutes(1, 200), 1);
        assert_eq!(reading_time_minutes(200, 200), 1);
        assert_eq!(reading_time_minutes(201, 200), 2);
        assert_eq!(reading_time_minutes(1000, 250), 4);
    }

    #[test]
    fn test_top_words() {
        let text = "Budget budget BUDGET review. The review of the plan, plan and more plan. \
                    Zebra apple apple.";
        let words = top_words(text, 3);
        assert_eq!(
            words,
            vec![
                WordCount::new("budget", 3),
                WordCount::new("plan", 3),
                WordCount::new("apple", 2),
            ]
        );
    }

    #[test]
    fn test_top_words_skips_short_and_stop_words() {
        let words = top_words("an ox is at the zoo and the zoo is big", 10);
        assert_eq!(
            words,
            vec![WordCount::new("zoo", 2), WordCount::new("big", 1)]
        );
    }

    #[test]
    fn test_averages() {
        let analysis = analyze_text("Cats nap. Dogs run fast.", &config());
        // letters: 4+3+4+3+4 = 18 over 5 words
        assert_eq!(analysis.avg_word_length, 3.6);
        assert_eq!(analysis.avg_sentence_length, 2.5);
        assert!(analysis.readability.is_some());
    }

    #[test]
    fn test_empty_text() {
        let analysis = analyze_text("", &config());
        assert_eq!(analysis.word_count, 0);
        assert_eq!(analysis.sentence_count, 0);
        assert_eq!(analysis.paragraph_count, 0);
        assert_eq!(analysis.reading_time_minutes, 0);
        assert_eq!(analysis.avg_word_length, 0.0);
        assert!(analysis.readability.is_none());
        assert!(analysis.top_words.is_empty());
    }
}
