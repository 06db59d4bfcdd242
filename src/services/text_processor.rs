// Text Processing Service
// Word counting, sentence splitting and normalization shared by the scorers

use regex::Regex;
use std::sync::LazyLock;

static SENTENCE_BREAK: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[.!?]+").ok());

/// Normalize punctuation and whitespace (smart quotes, dashes, NBSP, CRLF).
pub fn normalize_punctuation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let s = text
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{2013}', '\u{2014}'], "-")
        .replace(['\u{3000}', '\u{00A0}'], " ")
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    // Collapse horizontal whitespace and strip each line
    s.lines()
        .map(|ln| ln.split([' ', '\t', '\x0C', '\x0B']).filter(|w| !w.is_empty()).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Whitespace-delimited word count.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes at 200 words per minute, never below one.
pub fn reading_time_minutes(text: &str) -> usize {
    count_words(text).div_ceil(200).max(1)
}

/// Split on runs of `.`, `!` or `?`, dropping blank fragments.
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    match SENTENCE_BREAK.as_ref() {
        Some(re) => re
            .split(text)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect(),
        None => vec![text.trim().to_string()],
    }
}

/// First `max_chars` characters, with `...` appended when truncated.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}

/// Case-insensitive substring test against a keyword list; returns the hits.
pub fn keyword_hits<'a>(lower_text: &str, keywords: &[&'a str]) -> Vec<&'a str> {
    keywords
        .iter()
        .copied()
        .filter(|k| lower_text.contains(k))
        .collect()
}
