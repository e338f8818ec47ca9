//! OperationOutcome parsing for `$validate` responses.

use serde::{Deserialize, Serialize};

/// One issue reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,
}

impl Issue {
    /// Whether this issue blocks creation.
    pub fn is_error(&self) -> bool {
        self.severity == "error" || self.severity == "fatal"
    }

    /// Short human-readable form for error messages.
    pub fn summary(&self) -> String {
        match &self.diagnostics {
            Some(diagnostics) => format!("{}: {diagnostics}", self.severity),
            None => self.severity.clone(),
        }
    }
}

/// The outcome document returned by `$validate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationOutcome {
    #[serde(default)]
    pub issue: Vec<Issue>,
}

impl OperationOutcome {
    /// The blocking issues, empty when the resource is acceptable.
    pub fn errors(&self) -> Vec<Issue> {
        self.issue.iter().filter(|i| i.is_error()).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_server_outcome() {
        let outcome: OperationOutcome = serde_json::from_value(json!({
            "resourceType": "OperationOutcome",
            "issue": [
                {"severity": "warning", "code": "informational"},
                {"severity": "error", "code": "invariant", "diagnostics": "dosage missing"}
            ]
        }))
        .unwrap();
        let errors = outcome.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].summary(), "error: dosage missing");
    }

    #[test]
    fn test_warnings_do_not_block() {
        let outcome: OperationOutcome = serde_json::from_value(json!({
            "issue": [{"severity": "warning"}, {"severity": "information"}]
        }))
        .unwrap();
        assert!(outcome.errors().is_empty());
    }

    #[test]
    fn test_missing_issue_list_is_clean() {
        let outcome: OperationOutcome = serde_json::from_value(json!({})).unwrap();
        assert!(outcome.errors().is_empty());
    }
}
