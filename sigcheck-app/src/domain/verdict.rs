use crate::domain::Provider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one verification. `report_text` is the model's full
/// markdown report and is authoritative; the parsed summary is a
/// best-effort extraction for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub id: Uuid,
    pub provider: Provider,
    pub report_text: String,
    pub created_at: DateTime<Utc>,
}

/// Fields extracted from the report format the prompt mandates:
/// "Match Status:", "Confidence Level:", "Reasoning:".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictSummary {
    pub match_status: Option<String>,
    pub confidence: Option<String>,
    pub reasoning: Option<String>,
}

impl Verdict {
    pub fn new(provider: Provider, report_text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider,
            report_text,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> VerdictSummary {
        let mut summary = VerdictSummary::default();

        for line in self.report_text.lines() {
            let line = line.trim().trim_start_matches(['*', '-', ' ']);
            if let Some(value) = labelled_value(line, "Match Status:") {
                summary.match_status.get_or_insert(value);
            } else if let Some(value) = labelled_value(line, "Confidence Level:") {
                summary.confidence.get_or_insert(value);
            } else if let Some(value) = labelled_value(line, "Reasoning:") {
                summary.reasoning.get_or_insert(value);
            }
        }

        summary
    }
}

fn labelled_value(line: &str, label: &str) -> Option<String> {
    let prefix = line.get(..label.len())?;
    if !prefix.eq_ignore_ascii_case(label) {
        return None;
    }
    let value = line[label.len()..]
        .trim()
        .trim_matches(['*', '"'])
        .trim()
        .to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_mandated_format() {
        let verdict = Verdict::new(
            Provider::Gemini,
            "Match Status: \"Same Person\"\n\
             Confidence Level: 87%\n\
             Reasoning: Consistent stroke order and pen pressure."
                .to_string(),
        );
        let summary = verdict.summary();
        assert_eq!(summary.match_status.as_deref(), Some("Same Person"));
        assert_eq!(summary.confidence.as_deref(), Some("87%"));
        assert_eq!(
            summary.reasoning.as_deref(),
            Some("Consistent stroke order and pen pressure.")
        );
    }

    #[test]
    fn test_summary_handles_bold_labels() {
        let verdict = Verdict::new(
            Provider::Perplexity,
            "**Match Status:** Different People\n**Confidence Level:** 92%".to_string(),
        );
        let summary = verdict.summary();
        assert_eq!(summary.match_status.as_deref(), Some("Different People"));
        assert_eq!(summary.confidence.as_deref(), Some("92%"));
        assert_eq!(summary.reasoning, None);
    }

    #[test]
    fn test_summary_of_freeform_report_is_empty() {
        let verdict = Verdict::new(Provider::Gemini, "The signatures look similar.".to_string());
        assert_eq!(verdict.summary(), VerdictSummary::default());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let verdict = Verdict::new(
            Provider::Gemini,
            "Match Status: Same Person\nMatch Status: Different People".to_string(),
        );
        assert_eq!(
            verdict.summary().match_status.as_deref(),
            Some("Same Person")
        );
    }
}
