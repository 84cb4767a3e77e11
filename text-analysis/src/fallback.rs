//! Deterministic offline analysis used when the provider is unavailable.
//!
//! Everything here is derived from the text alone: word and sentence counts, the most
//! frequent longer words, keyword-based tags and two simple grammar heuristics.
//! Identical input always yields an identical result.

use std::collections::HashMap;

use crate::types::analysis::AnalysisResult;

/// Words must be longer than this (in characters) to count as key terms.
const MIN_TERM_LENGTH: usize = 3;
const MAX_KEY_TERMS: usize = 5;
const SUMMARY_TOPICS: usize = 3;

const DEFAULT_TAG: &str = "general";
const NO_GRAMMAR_ISSUES: &str = "No obvious grammar issues detected.";
const MULTIPLE_SPACES: &str = "Multiple spaces detected";
const MISSING_PUNCTUATION: &str = "Consider adding proper punctuation";

/// Keyword groups checked in this order; each match contributes its tags.
const TAG_GROUPS: [(&[&str], &[&str]); 4] = [
    (&["meeting", "discuss"], &["meeting", "discussion"]),
    (&["todo", "task"], &["todo", "tasks"]),
    (&["idea", "think"], &["ideas", "thoughts"]),
    (&["note", "remember"], &["notes", "reminder"]),
];

/// Analyze `text` without any external service.
pub fn analyze(text: &str) -> AnalysisResult {
    let word_count = text.split_whitespace().count();
    let sentence_count = count_sentences(text);
    let key_terms = key_terms(text);

    AnalysisResult {
        summary: summarize(word_count, sentence_count, &key_terms),
        tags: suggest_tags(text),
        key_terms,
        grammar_check: check_grammar(text),
        is_fallback: true,
        error: None,
    }
}

fn count_sentences(text: &str) -> usize {
    text.split(is_terminal_punctuation)
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

fn is_terminal_punctuation(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Most frequent normalized words, ties kept in first-seen order.
fn key_terms(text: &str) -> Vec<String> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for word in text.split_whitespace() {
        let clean = normalize_word(word);
        if clean.chars().count() <= MIN_TERM_LENGTH {
            continue;
        }
        match positions.get(&clean) {
            Some(&index) => counts[index].1 += 1,
            None => {
                positions.insert(clean.clone(), counts.len());
                counts.push((clean, 1));
            }
        }
    }

    // sort_by is stable, so equal counts keep their first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_KEY_TERMS)
        .map(|(word, _)| word)
        .collect()
}

/// Lower-case and keep only ASCII word characters (letters, digits, underscore).
fn normalize_word(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

fn summarize(word_count: usize, sentence_count: usize, key_terms: &[String]) -> String {
    let mut summary = format!(
        "This note contains {} words across {} sentences.",
        word_count, sentence_count
    );
    if !key_terms.is_empty() {
        let topics: Vec<&str> = key_terms
            .iter()
            .take(SUMMARY_TOPICS)
            .map(String::as_str)
            .collect();
        summary.push_str(&format!(" Key topics include: {}.", topics.join(", ")));
    }
    summary
}

fn suggest_tags(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let tags: Vec<String> = TAG_GROUPS
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .flat_map(|(_, tags)| tags.iter().map(|tag| tag.to_string()))
        .collect();

    if tags.is_empty() {
        vec![DEFAULT_TAG.to_string()]
    } else {
        tags
    }
}

fn check_grammar(text: &str) -> String {
    let mut issues = Vec::new();
    if text.contains("  ") {
        issues.push(MULTIPLE_SPACES);
    }
    if !text.is_empty() && !text.ends_with(is_terminal_punctuation) {
        issues.push(MISSING_PUNCTUATION);
    }

    if issues.is_empty() {
        NO_GRAMMAR_ISSUES.to_string()
    } else {
        issues.join(". ")
    }
}
