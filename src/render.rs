//! Plain text rendering of an analysis for the terminal.

use std::fmt::Write as _;

use domain::AnalysisResult;

const NO_SUMMARY: &str = "No summary available";
const NO_TAGS: &str = "No suggested tags";
const NO_KEY_TERMS: &str = "No key terms identified";
const NO_GRAMMAR_ISSUES: &str = "No grammar issues found";

/// Render `result` as a report, filling empty sections with placeholder text.
pub fn report(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("AI Analysis");
    if result.is_fallback {
        out.push_str(" [Basic]");
    }
    out.push('\n');

    if let Some(warning) = &result.error {
        let _ = writeln!(out, "! {}", warning);
    }

    section(&mut out, "Summary", or_default(&result.summary, NO_SUMMARY));
    section(&mut out, "Suggested Tags", &list_or_default(&result.tags, NO_TAGS));
    section(
        &mut out,
        "Key Terms",
        &list_or_default(&result.key_terms, NO_KEY_TERMS),
    );
    section(
        &mut out,
        "Grammar Check",
        or_default(&result.grammar_check, NO_GRAMMAR_ISSUES),
    );

    out
}

fn section(out: &mut String, title: &str, body: &str) {
    let _ = write!(out, "\n{}\n  {}\n", title, body);
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

fn list_or_default(items: &[String], default: &str) -> String {
    if items.is_empty() {
        default.to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_result_has_no_badge_or_warning() {
        let result = AnalysisResult {
            summary: "A.".to_string(),
            tags: vec!["x".to_string(), "y".to_string()],
            key_terms: vec!["a".to_string()],
            grammar_check: "none".to_string(),
            is_fallback: false,
            error: None,
        };

        assert_eq!(
            report(&result),
            "AI Analysis\n\nSummary\n  A.\n\nSuggested Tags\n  x, y\n\nKey Terms\n  a\n\n\
             Grammar Check\n  none\n"
        );
    }

    #[test]
    fn test_empty_sections_use_placeholders() {
        let text = report(&AnalysisResult::default());

        assert!(text.contains(NO_SUMMARY));
        assert!(text.contains(NO_TAGS));
        assert!(text.contains(NO_KEY_TERMS));
        assert!(text.contains(NO_GRAMMAR_ISSUES));
    }

    #[test]
    fn test_degraded_result_shows_badge_and_warning() {
        let result = AnalysisResult {
            is_fallback: true,
            error: Some("AI service temporarily unavailable. Showing basic analysis.".to_string()),
            ..AnalysisResult::default()
        };
        let text = report(&result);

        assert!(text.starts_with(
            "AI Analysis [Basic]\n! AI service temporarily unavailable. Showing basic analysis.\n"
        ));
    }
}
