use std::collections::BTreeSet;

use curator_core::{diff, AssociationTarget, EntityId, Operation, ReconciliationOutcome, TagId};
use curator_logging::{curator_debug, curator_info, curator_warn};

use crate::store::AssociationStore;
use crate::tasks::TaskGroup;
use crate::ReconcileError;

/// Drives an entity's tag association to a desired set against an `AssociationStore`.
///
/// The current set is always re-read from the store; nothing is cached between
/// calls. Mutations are issued concurrently and all of them are awaited, so a
/// failure never hides progress made by the others. There is no rollback.
pub struct AssociationReconciler<'s> {
    store: &'s dyn AssociationStore,
}

impl<'s> AssociationReconciler<'s> {
    pub fn new(store: &'s dyn AssociationStore) -> Self {
        Self { store }
    }

    pub async fn reconcile(
        &self,
        target: AssociationTarget,
        entity_id: EntityId,
        desired: &BTreeSet<TagId>,
    ) -> Result<ReconciliationOutcome, ReconcileError> {
        curator_info!(
            "Reconciling tags of {} {} to {} desired tag(s)",
            target,
            entity_id,
            desired.len()
        );

        let current = match self.store.list(target, entity_id).await {
            Ok(current) => current,
            Err(source) => {
                curator_warn!(
                    "Aborting reconciliation of {} {}: {}",
                    target,
                    entity_id,
                    source
                );
                return Err(ReconcileError::Aborted {
                    target,
                    entity_id,
                    source,
                });
            }
        };

        let plan = diff(&current, desired);
        curator_debug!(
            "Plan for {} {}: {} to add, {} to remove",
            target,
            entity_id,
            plan.to_add.len(),
            plan.to_remove.len()
        );

        let store = self.store;
        let mut group = TaskGroup::new();
        for &tag_id in &plan.to_add {
            group.push(async move {
                let result = store.add(target, entity_id, tag_id).await;
                (Operation::Add, tag_id, result)
            });
        }
        for &tag_id in &plan.to_remove {
            group.push(async move {
                let result = store.remove(target, entity_id, tag_id).await;
                (Operation::Remove, tag_id, result)
            });
        }
        debug_assert_eq!(group.len(), plan.len());

        let mut outcome = ReconciliationOutcome::default();
        for (operation, tag_id, result) in group.join().await {
            match result {
                Ok(()) => outcome.record_success(operation),
                Err(err) => {
                    curator_warn!(
                        "Failed to {} tag {} on {} {}: {}",
                        operation,
                        tag_id,
                        target,
                        entity_id,
                        err
                    );
                    outcome.record_failure(operation, tag_id, err.to_string());
                }
            }
        }

        curator_info!(
            "Reconciled {} {}: {}, {} failure(s)",
            target,
            entity_id,
            outcome.summary(),
            outcome.failures.len()
        );
        Ok(outcome)
    }
}
