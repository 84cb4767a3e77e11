//! Types for text analysis requests and results.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Prompt mode used when asking the provider to analyze a note.
///
/// Every mode shares the same four-section answer format; only the framing of the
/// instructions differs. Names that don't match a known mode resolve to `General`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    #[default]
    General,
    Sentiment,
    Summary,
    Keywords,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 4] = [
        AnalysisType::General,
        AnalysisType::Sentiment,
        AnalysisType::Summary,
        AnalysisType::Keywords,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::General => "general",
            AnalysisType::Sentiment => "sentiment",
            AnalysisType::Summary => "summary",
            AnalysisType::Keywords => "keywords",
        }
    }

    /// Resolve a mode by name, case-insensitively. Unknown names yield `General`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "sentiment" => AnalysisType::Sentiment,
            "summary" => AnalysisType::Summary,
            "keywords" => AnalysisType::Keywords,
            _ => AnalysisType::General,
        }
    }
}

impl FromStr for AnalysisType {
    type Err = Infallible;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(AnalysisType::from_name(name))
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single piece of note text to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub text: String,
    pub analysis_type: AnalysisType,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>, analysis_type: AnalysisType) -> Self {
        Self {
            text: text.into(),
            analysis_type,
        }
    }
}

/// Structured analysis of a note, as consumed by the display layer.
///
/// `is_fallback` is true whenever the local analyzer produced the result.
/// `error` carries a user-facing warning only when the provider was tried and failed;
/// an unconfigured provider is not a failure and leaves it unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub tags: Vec<String>,
    pub key_terms: Vec<String>,
    pub grammar_check: String,
    pub is_fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_known_modes() {
        assert_eq!(AnalysisType::from_name("sentiment"), AnalysisType::Sentiment);
        assert_eq!(AnalysisType::from_name(" Summary "), AnalysisType::Summary);
        assert_eq!(AnalysisType::from_name("KEYWORDS"), AnalysisType::Keywords);
    }

    #[test]
    fn test_unknown_mode_defaults_to_general() {
        assert_eq!(AnalysisType::from_name("poetry"), AnalysisType::General);
        assert_eq!(AnalysisType::from_name(""), AnalysisType::General);
        assert_eq!("whatever".parse::<AnalysisType>(), Ok(AnalysisType::General));
    }

    #[test]
    fn test_result_serializes_camel_case_without_unset_error() {
        let result = AnalysisResult {
            summary: "A.".to_string(),
            tags: vec!["x".to_string()],
            key_terms: vec!["a".to_string()],
            grammar_check: "none".to_string(),
            is_fallback: false,
            error: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "summary": "A.",
                "tags": ["x"],
                "keyTerms": ["a"],
                "grammarCheck": "none",
                "isFallback": false
            })
        );
    }
}
