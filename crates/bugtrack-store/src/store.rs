//! The bug collection and its mutations.
//!
//! `BugStore` owns a key-value backend and keeps the whole collection under
//! [`BUGS_KEY`] as a JSON array, most recent first. Every mutation is a full
//! read-modify-write of that array:
//! - load the current snapshot
//! - build the next snapshot from copied/overridden records
//! - persist the next snapshot in one `set`
//!
//! An unreadable stored array lists as empty so a corrupted entry never
//! blocks reads, but mutations refuse to run over it: the entry is left
//! untouched and `BugStoreError::Corrupt` is returned.

use crate::bug::{BugRecord, Priority, Status};
use crate::id::generate_bug_id;
use crate::kv::{KeyValueStore, KvError};
use crate::stats::StatusCounts;
use chrono::Utc;
use tracing::{debug, info, warn};

/// Key holding the serialized collection.
pub const BUGS_KEY: &str = "bugTracker_bugs";

/// Caller-supplied fields for a new report.
///
/// `priority` is the raw form value; it is parsed during validation.
#[derive(Debug, Clone, Default)]
pub struct NewBug {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub reporter: String,
    pub screenshot: Option<String>,
}

/// Why a report was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("required field is empty: {0}")]
    EmptyField(&'static str),

    #[error("invalid priority: {0:?} (expected Low, Medium, or High)")]
    InvalidPriority(String),
}

/// Errors raised by store operations.
#[derive(Debug, thiserror::Error)]
pub enum BugStoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("bug not found: {0}")]
    NotFound(String),

    #[error("stored bug collection is unreadable: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Storage(KvError),

    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Bug collection persisted in a key-value backend.
#[derive(Debug)]
pub struct BugStore<K> {
    kv: K,
}

impl<K: KeyValueStore> BugStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn backend(&self) -> &K {
        &self.kv
    }

    /// Validate and persist a new report; it becomes the first record.
    pub fn create(&mut self, input: NewBug) -> Result<BugRecord, BugStoreError> {
        let priority = validate(&input)?;
        let mut bugs = self.load()?;

        let mut id = generate_bug_id();
        while bugs.iter().any(|bug| bug.id == id) {
            id = generate_bug_id();
        }

        let bug = BugRecord {
            id,
            title: input.title,
            description: input.description,
            priority,
            reporter: input.reporter,
            status: Status::Open,
            assigned_to: None,
            created_at: Utc::now(),
            screenshot: input.screenshot.filter(|s| !s.is_empty()),
        };

        bugs.insert(0, bug.clone());
        self.persist(&bugs)?;
        info!(id = %bug.id, priority = %bug.priority, "bug reported");
        Ok(bug)
    }

    /// All records, most recent first.
    ///
    /// Backend or parse failures yield an empty list.
    pub fn list_all(&self) -> Vec<BugRecord> {
        self.load().unwrap_or_else(|err| {
            warn!(key = BUGS_KEY, error = %err, "failed to read bug collection; showing none");
            Vec::new()
        })
    }

    /// Lookup one record by id.
    pub fn get(&self, id: &str) -> Option<BugRecord> {
        self.list_all().into_iter().find(|bug| bug.id == id)
    }

    /// Move a record to `status`.
    pub fn update_status(&mut self, id: &str, status: Status) -> Result<BugRecord, BugStoreError> {
        let updated = self.replace(id, |bug| bug.with_status(status))?;
        info!(id, status = %status, "bug status updated");
        Ok(updated)
    }

    /// Assign a record, or clear the assignment when `assignee` is absent or blank.
    pub fn update_assignee(
        &mut self,
        id: &str,
        assignee: Option<&str>,
    ) -> Result<BugRecord, BugStoreError> {
        let assigned_to = assignee
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string);
        let updated = self.replace(id, |bug| bug.with_assignee(assigned_to.clone()))?;
        match &updated.assigned_to {
            Some(name) => info!(id, assignee = %name, "bug assigned"),
            None => info!(id, "bug unassigned"),
        }
        Ok(updated)
    }

    /// Per-status totals over the current collection.
    pub fn status_counts(&self) -> StatusCounts {
        StatusCounts::from_bugs(&self.list_all())
    }

    fn replace(
        &mut self,
        id: &str,
        update: impl Fn(&BugRecord) -> BugRecord,
    ) -> Result<BugRecord, BugStoreError> {
        let bugs = self.load()?;
        let mut updated = None;
        let next: Vec<BugRecord> = bugs
            .iter()
            .map(|bug| {
                if bug.id == id {
                    let replacement = update(bug);
                    updated = Some(replacement.clone());
                    replacement
                } else {
                    bug.clone()
                }
            })
            .collect();

        let updated = updated.ok_or_else(|| BugStoreError::NotFound(id.to_string()))?;
        self.persist(&next)?;
        Ok(updated)
    }

    fn load(&self) -> Result<Vec<BugRecord>, BugStoreError> {
        let Some(raw) = self.kv.get(BUGS_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str::<Vec<BugRecord>>(&raw)
            .map_err(|e| BugStoreError::Corrupt(format!("{BUGS_KEY}: {e}")))
    }

    fn persist(&mut self, bugs: &[BugRecord]) -> Result<(), BugStoreError> {
        let raw = serde_json::to_string(bugs).map_err(|e| BugStoreError::Serialize(e.to_string()))?;
        self.kv.set(BUGS_KEY, &raw)?;
        debug!(
            key = BUGS_KEY,
            count = bugs.len(),
            "bug collection persisted"
        );
        Ok(())
    }
}

impl From<KvError> for BugStoreError {
    fn from(err: KvError) -> Self {
        match err {
            KvError::Corrupt(message) => Self::Corrupt(message),
            other => Self::Storage(other),
        }
    }
}

fn validate(input: &NewBug) -> Result<Priority, ValidationError> {
    let required = [
        ("title", &input.title),
        ("description", &input.description),
        ("reporter", &input.reporter),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyField(field));
        }
    }
    input
        .priority
        .parse()
        .map_err(|_| ValidationError::InvalidPriority(input.priority.clone()))
}
