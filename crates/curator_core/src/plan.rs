use std::collections::BTreeSet;

use crate::TagId;

/// The minimal set of mutations that moves `current` to `desired`.
///
/// `to_add` and `to_remove` are always disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconciliationPlan {
    pub to_add: BTreeSet<TagId>,
    pub to_remove: BTreeSet<TagId>,
}

impl ReconciliationPlan {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    pub fn len(&self) -> usize {
        self.to_add.len() + self.to_remove.len()
    }
}

/// Pure set difference: `to_add = desired - current`, `to_remove = current - desired`.
pub fn diff(current: &BTreeSet<TagId>, desired: &BTreeSet<TagId>) -> ReconciliationPlan {
    ReconciliationPlan {
        to_add: desired.difference(current).copied().collect(),
        to_remove: current.difference(desired).copied().collect(),
    }
}
