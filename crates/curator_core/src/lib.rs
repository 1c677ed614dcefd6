//! Curator core: pure domain types and the association diff.
mod content;
mod ids;
mod outcome;
mod plan;
mod preview;
mod target;

pub use content::NormalizedContent;
pub use ids::{EntityId, ParseIdError, TagId};
pub use outcome::{Operation, OperationFailure, ReconciliationOutcome};
pub use plan::{diff, ReconciliationPlan};
pub use preview::{preview, DEFAULT_PREVIEW_CHARS, PREVIEW_ELLIPSIS};
pub use target::{AssociationTarget, ParseTargetError};
