//! Parser for the provider's free-text analysis answer.
//!
//! The prompt asks for four labelled sections (`Summary:`, `Suggested Tags:`,
//! `Key Terms:`, `Grammar Check:`). Models follow that loosely: sections may be
//! wrapped in markdown emphasis, run over several lines, or be missing entirely.
//! Parsing is best effort and never fails; whatever cannot be recognized is left
//! at its empty default for the display layer to fill in.

use crate::types::analysis::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Summary,
    Tags,
    KeyTerms,
    GrammarCheck,
}

/// Header prefixes in the order they are tested.
const HEADERS: [(&str, Section); 4] = [
    ("summary:", Section::Summary),
    ("suggested tags:", Section::Tags),
    ("key terms:", Section::KeyTerms),
    ("grammar check:", Section::GrammarCheck),
];

/// Turn a raw provider answer into an [`AnalysisResult`].
///
/// Lines that are not headers continue the current section. Only the free-text
/// sections (summary and grammar check) take continuations; tag and key-term lists
/// are expected on the header line itself.
pub fn parse(raw: &str) -> AnalysisResult {
    let mut result = AnalysisResult::default();
    let mut current: Option<Section> = None;

    for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some((section, rest)) = match_header(line) {
            current = Some(section);
            match section {
                Section::Summary => result.summary = rest.to_string(),
                Section::Tags => result.tags = split_list(rest),
                Section::KeyTerms => result.key_terms = split_list(rest),
                Section::GrammarCheck => result.grammar_check = rest.to_string(),
            }
            continue;
        }

        match current {
            Some(Section::Summary) => append_line(&mut result.summary, line),
            Some(Section::GrammarCheck) => append_line(&mut result.grammar_check, line),
            Some(Section::Tags) | Some(Section::KeyTerms) | None => {}
        }
    }

    result
}

/// Match a section header, ignoring case and leading markdown decoration.
///
/// Returns the section and the text following the header.
fn match_header(line: &str) -> Option<(Section, &str)> {
    let body = line.trim_start_matches(|c: char| is_decoration(c) || c.is_whitespace());
    let emphasized = line[..line.len() - body.len()].contains('*');

    HEADERS.iter().find_map(|&(prefix, section)| {
        let head = body.get(..prefix.len())?;
        if !head.eq_ignore_ascii_case(prefix) {
            return None;
        }
        let mut rest = &body[prefix.len()..];
        // closing emphasis of a header like `**Summary:**`
        if emphasized {
            rest = rest
                .strip_prefix("**")
                .or_else(|| rest.strip_prefix('*'))
                .unwrap_or(rest);
        }
        Some((section, rest.trim()))
    })
}

fn is_decoration(c: char) -> bool {
    matches!(c, '*' | '#' | '-' | '>')
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn append_line(target: &mut String, line: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(line);
}
