//! Urge log validation
//!
//! A [`LogDraft`] is the in-progress shape the UI edits: the outcome is
//! still optional. Drafts are never persisted; `finalize` converts a valid
//! draft into an [`UrgeLog`] with a fresh id and timestamp.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::types::UrgeLog;

/// Maximum length of the urge description, in characters.
pub const MAX_URGE_LEN: usize = 200;
/// Maximum length of the location field, in characters.
pub const MAX_LOCATION_LEN: usize = 100;
/// Maximum length of the trigger field, in characters.
pub const MAX_TRIGGER_LEN: usize = 150;

/// An urge log being composed, before the outcome is decided.
#[derive(Debug, Clone, Default)]
pub struct LogDraft {
    pub urge: String,
    pub location: String,
    pub trigger: String,
    pub emotion: Option<String>,
    /// `None` until the user indicates acted/resisted
    pub acted_on: Option<bool>,
    pub replacement_action: Option<String>,
    pub notes: Option<String>,
}

/// Outcome of validating a draft: every problem as a user-facing message.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl LogDraft {
    /// Validate this draft, collecting every failure.
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();

        if self.urge.trim().is_empty() {
            errors.push("Please describe the urge".to_string());
        } else if self.urge.chars().count() > MAX_URGE_LEN {
            errors.push(format!(
                "Urge description is too long (max {} characters)",
                MAX_URGE_LEN
            ));
        }

        if self.acted_on.is_none() {
            errors.push("Please indicate whether you acted on it".to_string());
        }

        if self.location.chars().count() > MAX_LOCATION_LEN {
            errors.push(format!(
                "Location is too long (max {} characters)",
                MAX_LOCATION_LEN
            ));
        }

        if self.trigger.chars().count() > MAX_TRIGGER_LEN {
            errors.push(format!(
                "Trigger is too long (max {} characters)",
                MAX_TRIGGER_LEN
            ));
        }

        ValidationReport { errors }
    }

    /// Convert a valid draft into a persistable [`UrgeLog`].
    ///
    /// Returns [`Error::Validation`] with every message when the draft is
    /// incomplete; nothing is persisted in that case.
    pub fn finalize(self, now: DateTime<Utc>) -> Result<UrgeLog> {
        let report = self.validate();
        if !report.is_valid() {
            return Err(Error::Validation(report.errors));
        }

        Ok(UrgeLog {
            id: UrgeLog::new_id(now),
            urge: self.urge.trim().to_string(),
            location: self.location.trim().to_string(),
            trigger: self.trigger.trim().to_string(),
            emotion: self.emotion.filter(|e| !e.trim().is_empty()),
            // validate() ensured this is Some
            acted_on: self.acted_on.unwrap_or(false),
            timestamp: now,
            replacement_action: self.replacement_action,
            notes: self.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(urge: &str, acted_on: Option<bool>) -> LogDraft {
        LogDraft {
            urge: urge.to_string(),
            acted_on,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_draft_reports_both_required_fields() {
        let report = draft("", None).validate();

        assert!(!report.is_valid());
        assert!(report.errors.iter().any(|e| e.contains("describe the urge")));
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("indicate whether you acted on it")));
    }

    #[test]
    fn test_length_limits() {
        let mut d = draft(&"x".repeat(MAX_URGE_LEN + 1), Some(false));
        d.location = "y".repeat(MAX_LOCATION_LEN + 1);
        d.trigger = "z".repeat(MAX_TRIGGER_LEN + 1);

        let report = d.validate();
        assert_eq!(report.errors.len(), 3);
    }

    #[test]
    fn test_valid_draft_finalizes() {
        let now = Utc::now();
        let log = draft("  check phone  ", Some(true))
            .finalize(now)
            .expect("valid draft");

        assert_eq!(log.urge, "check phone");
        assert!(log.acted_on);
        assert_eq!(log.timestamp, now);
        assert!(log.id.starts_with(&now.timestamp_millis().to_string()));
    }

    #[test]
    fn test_invalid_draft_does_not_finalize() {
        let err = draft("", None).finalize(Utc::now()).unwrap_err();
        match err {
            Error::Validation(messages) => assert_eq!(messages.len(), 2),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_blank_emotion_becomes_none() {
        let mut d = draft("snack", Some(false));
        d.emotion = Some("   ".to_string());
        let log = d.finalize(Utc::now()).unwrap();
        assert_eq!(log.emotion, None);
    }
}
