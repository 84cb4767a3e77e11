//! Instruction templates for each analysis mode.
//!
//! All templates ask for the same four labelled sections, which is the format the
//! [`parser`](crate::parser) understands. Only the framing of each section changes.

use crate::types::analysis::AnalysisType;

const GENERAL_TEMPLATE: &str = "You are an AI text analyzer. Analyze the given text and provide your analysis in the following format:

Summary: A brief overview of the main points and key ideas.

Suggested Tags: Relevant topics, themes, or categories, comma-separated.

Key Terms: Important words or phrases from the text, comma-separated.

Grammar Check: Any grammar, spelling, or style improvements.";

const SENTIMENT_TEMPLATE: &str = "You are a sentiment analysis expert. Analyze the text and provide your analysis in the following format:

Summary: A detailed breakdown of the emotional tone and overall sentiment.

Suggested Tags: Emotional themes and tones detected, comma-separated.

Key Terms: Words and phrases carrying emotional weight, comma-separated.

Grammar Check: Any improvements for clearer emotional expression.";

const SUMMARY_TEMPLATE: &str = "You are a text summarization expert. Analyze the text and provide your response in the following format:

Summary: A concise summary capturing the main points.

Suggested Tags: Main themes and topics covered, comma-separated.

Key Terms: Essential words and phrases, comma-separated.

Grammar Check: Any clarity or structure improvements.";

const KEYWORDS_TEMPLATE: &str = "You are a keyword extraction specialist. Analyze the text and provide your response in the following format:

Summary: Brief context for the identified keywords.

Suggested Tags: Primary topics and themes, comma-separated.

Key Terms: Key words and phrases identified, comma-separated.

Grammar Check: Any suggestions for keyword clarity.";

/// Per-mode instruction table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    general: String,
    sentiment: String,
    summary: String,
    keywords: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            general: GENERAL_TEMPLATE.to_string(),
            sentiment: SENTIMENT_TEMPLATE.to_string(),
            summary: SUMMARY_TEMPLATE.to_string(),
            keywords: KEYWORDS_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn template(&self, analysis_type: AnalysisType) -> &str {
        match analysis_type {
            AnalysisType::General => &self.general,
            AnalysisType::Sentiment => &self.sentiment,
            AnalysisType::Summary => &self.summary,
            AnalysisType::Keywords => &self.keywords,
        }
    }

    /// Replace the instructions used for one mode.
    pub fn with_template(mut self, analysis_type: AnalysisType, template: impl Into<String>) -> Self {
        let slot = match analysis_type {
            AnalysisType::General => &mut self.general,
            AnalysisType::Sentiment => &mut self.sentiment,
            AnalysisType::Summary => &mut self.summary,
            AnalysisType::Keywords => &mut self.keywords,
        };
        *slot = template.into();
        self
    }

    /// Instructions for `analysis_type` followed by the note text.
    pub fn build_prompt(&self, analysis_type: AnalysisType, text: &str) -> String {
        format!(
            "{}\n\nText to analyze:\n{}",
            self.template(analysis_type),
            text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_requests_all_sections() {
        let templates = PromptTemplates::default();
        for analysis_type in AnalysisType::ALL {
            let template = templates.template(analysis_type);
            for header in ["Summary:", "Suggested Tags:", "Key Terms:", "Grammar Check:"] {
                assert!(
                    template.contains(header),
                    "{} template is missing {}",
                    analysis_type,
                    header
                );
            }
        }
    }

    #[test]
    fn test_build_prompt_appends_text() {
        let prompt = PromptTemplates::default().build_prompt(AnalysisType::Sentiment, "I love it.");
        assert!(prompt.starts_with("You are a sentiment analysis expert."));
        assert!(prompt.ends_with("\n\nText to analyze:\nI love it."));
    }

    #[test]
    fn test_with_template_overrides_single_mode() {
        let templates =
            PromptTemplates::default().with_template(AnalysisType::Keywords, "Only keywords.");
        assert_eq!(templates.template(AnalysisType::Keywords), "Only keywords.");
        assert_eq!(templates.template(AnalysisType::General), GENERAL_TEMPLATE);
    }
}
