use std::fmt;

use crate::TagId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "add"),
            Operation::Remove => write!(f, "remove"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFailure {
    pub operation: Operation,
    pub tag_id: TagId,
    pub error: String,
}

/// Aggregated result of one reconciliation call.
///
/// `failures` keeps the order in which operations were issued. Nothing that
/// succeeded is rolled back when another operation fails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconciliationOutcome {
    pub added_count: usize,
    pub removed_count: usize,
    pub failures: Vec<OperationFailure>,
}

impl ReconciliationOutcome {
    pub fn record_success(&mut self, operation: Operation) {
        match operation {
            Operation::Add => self.added_count += 1,
            Operation::Remove => self.removed_count += 1,
        }
    }

    pub fn record_failure(
        &mut self,
        operation: Operation,
        tag_id: TagId,
        error: impl Into<String>,
    ) {
        self.failures.push(OperationFailure {
            operation,
            tag_id,
            error: error.into(),
        });
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn has_changes(&self) -> bool {
        self.added_count + self.removed_count > 0
    }

    /// Human readable one-liner, e.g. `2 added, 1 removed`.
    pub fn summary(&self) -> String {
        if !self.has_changes() && self.is_complete() {
            return "No changes".to_string();
        }
        format!("{} added, {} removed", self.added_count, self.removed_count)
    }
}
