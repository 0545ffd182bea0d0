//! Per-status totals for the dashboard header.

use crate::bug::{BugRecord, Status};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
}

impl StatusCounts {
    pub fn from_bugs(bugs: &[BugRecord]) -> Self {
        bugs.iter().fold(Self::default(), |mut counts, bug| {
            counts.total += 1;
            match bug.status {
                Status::Open => counts.open += 1,
                Status::InProgress => counts.in_progress += 1,
                Status::Resolved => counts.resolved += 1,
                Status::Closed => counts.closed += 1,
            }
            counts
        })
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Open => self.open,
            Status::InProgress => self.in_progress,
            Status::Resolved => self.resolved,
            Status::Closed => self.closed,
        }
    }
}
