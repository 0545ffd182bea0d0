//! Bug record: the one tracked entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A reported bug.
///
/// Only `status` and `assigned_to` change after creation, and only through
/// [`BugRecord::with_status`] / [`BugRecord::with_assignee`], which return a
/// new value instead of mutating in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugRecord {
    // ── Identification ──
    pub id: String,

    // ── Report content ──
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub reporter: String,

    // ── Triage ──
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    // ── Timestamps ──
    pub created_at: DateTime<Utc>,

    // ── Attachments ──
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
}

impl BugRecord {
    /// Copy of this record with `status` replaced.
    pub fn with_status(&self, status: Status) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Copy of this record with `assigned_to` replaced.
    pub fn with_assignee(&self, assigned_to: Option<String>) -> Self {
        Self {
            assigned_to,
            ..self.clone()
        }
    }
}

/// Lifecycle stage of a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Open,
        Status::InProgress,
        Status::Resolved,
        Status::Closed,
    ];

    /// Display label, identical to the persisted form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::InProgress => "In Progress",
            Status::Resolved => "Resolved",
            Status::Closed => "Closed",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Status::Open),
            "in progress" | "in_progress" | "in-progress" => Ok(Status::InProgress),
            "resolved" => Ok(Status::Resolved),
            "closed" => Ok(Status::Closed),
            _ => Err(ParseEnumError {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// Severity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ParseEnumError {
                kind: "priority",
                value: s.to_string(),
            }),
        }
    }
}

/// Text that names none of an enum's values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> BugRecord {
        BugRecord {
            id: "bug-1".to_string(),
            title: "Login fails".to_string(),
            description: "500 on submit".to_string(),
            priority: Priority::High,
            reporter: "Ana".to_string(),
            status: Status::Open,
            assigned_to: None,
            created_at: Utc
                .with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
                .single()
                .expect("valid timestamp"),
            screenshot: None,
        }
    }

    #[test]
    fn status_accepts_labels_and_machine_forms() {
        assert_eq!("In Progress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!("in_progress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!("in-progress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!(" CLOSED ".parse::<Status>(), Ok(Status::Closed));
        assert!("reopened".parse::<Status>().is_err());
    }

    #[test]
    fn priority_rejects_unknown_values() {
        assert_eq!("medium".parse::<Priority>(), Ok(Priority::Medium));
        let err = "urgent"
            .parse::<Priority>()
            .expect_err("urgent is not a priority");
        assert_eq!(err.kind, "priority");
        assert_eq!(err.to_string(), "unknown priority: \"urgent\"");
    }

    #[test]
    fn status_serializes_with_display_labels() {
        let raw = serde_json::to_string(&Status::ALL).expect("statuses serialize");
        assert_eq!(raw, r#"["Open","In Progress","Resolved","Closed"]"#);
    }

    #[test]
    fn with_status_leaves_other_fields_untouched() {
        let original = record().with_assignee(Some("Jane Smith".to_string()));
        let updated = original.with_status(Status::Resolved);

        assert_eq!(updated.status, Status::Resolved);
        assert_eq!(original.status, Status::Open);
        assert_eq!(
            BugRecord {
                status: Status::Open,
                ..updated
            },
            original
        );
    }

    #[test]
    fn missing_status_defaults_to_open() {
        let raw = r#"{
            "id":"bug-1",
            "title":"Login fails",
            "description":"500 on submit",
            "priority":"High",
            "reporter":"Ana",
            "createdAt":"2024-03-01T12:30:00.000Z"
        }"#;

        let bug: BugRecord = serde_json::from_str(raw).expect("record should parse");
        assert_eq!(bug.status, Status::Open);
        assert_eq!(bug.assigned_to, None);
        assert_eq!(bug.created_at, record().created_at);
    }
}
