//! Assignment policy engine.
//!
//! Each submission is a single read-then-decide-then-write sequence: scan
//! the current assignments, dispatch to the kind's admission rule, issue
//! at most one store write. The scan and the write are not atomic at the
//! store level, so the engine serializes admission per toggle name with an
//! async mutex — two callers racing on the same toggle observe each
//! other's writes.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use switchyard_core::{Assignment, Error, Result, Store, StoreError, Toggle};

use crate::policy::{self, Decision};

/// The outcome of a successfully admitted proposal.
#[derive(Debug, Clone)]
pub enum Admission {
    /// The proposal was persisted as a new record.
    Created(Assignment),
    /// An existing record was flipped and persisted instead.
    Updated(Assignment),
    /// The proposal was swallowed: the service is already excluded from
    /// the toggle. Intentionally not an error.
    Absorbed,
}

/// Decides and applies assignment proposals against the stores.
pub struct AssignmentEngine {
    toggles: Arc<dyn Store<Toggle>>,
    assignments: Arc<dyn Store<Assignment>>,
    /// Admission serialization points, one per toggle name.
    admission_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AssignmentEngine {
    pub fn new(toggles: Arc<dyn Store<Toggle>>, assignments: Arc<dyn Store<Assignment>>) -> Self {
        Self {
            toggles,
            assignments,
            admission_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Submit an assignment proposal.
    ///
    /// Preconditions checked in order: the referenced toggle must exist,
    /// and the proposal's id must be unused. Then the kind's admission
    /// rule runs against the category slice. At most one store write
    /// happens per call.
    pub async fn submit(&self, proposal: Assignment) -> Result<Admission> {
        let lock = self.admission_lock(&proposal.toggle_name).await;
        let _guard = lock.lock().await;

        let toggle = match self.toggles.get(&proposal.toggle_name).await? {
            Some(toggle) => toggle,
            None => {
                // The lock entry was created eagerly; don't keep one
                // around for a toggle that doesn't exist.
                self.forget_toggle(&proposal.toggle_name).await;
                return Err(Error::ToggleNotFound(proposal.toggle_name));
            }
        };

        let all = self.assignments.get_all().await?;
        if all.iter().any(|a| a.id == proposal.id) {
            return Err(Error::DuplicateAssignmentId(proposal.id));
        }

        // The category slice: assignments whose toggle shares this kind.
        let kinds: HashMap<String, switchyard_core::ToggleKind> = self
            .toggles
            .get_all()
            .await?
            .into_iter()
            .map(|t| (t.name, t.kind))
            .collect();
        let slice: Vec<Assignment> = all
            .into_iter()
            .filter(|a| kinds.get(&a.toggle_name) == Some(&toggle.kind))
            .collect();

        match policy::admit(toggle.kind, &proposal, &slice)? {
            Decision::Create => {
                // Ids are unique globally, not per toggle, so a racing
                // submission on another toggle can still collide here.
                let created = self.assignments.create(proposal).await.map_err(|e| match e {
                    StoreError::DuplicateKey(id) => Error::DuplicateAssignmentId(id),
                    other => Error::Store(other),
                })?;
                info!(
                    assignment = %created.id,
                    toggle = %created.toggle_name,
                    service = %created.service_name,
                    enabled = created.enabled,
                    "Assignment created"
                );
                Ok(Admission::Created(created))
            }
            Decision::Update(record) => {
                let id = record.id.clone();
                let updated = self.assignments.update(&id, record).await?;
                info!(
                    assignment = %updated.id,
                    toggle = %updated.toggle_name,
                    service = %updated.service_name,
                    "Assignment flipped to exclusive off"
                );
                Ok(Admission::Updated(updated))
            }
            Decision::Absorb => {
                debug!(
                    toggle = %proposal.toggle_name,
                    service = %proposal.service_name,
                    "Proposal absorbed: service already excluded"
                );
                Ok(Admission::Absorbed)
            }
        }
    }

    /// All assignments visible to a (service, version) pair: matching
    /// service fields and not excluded. Result order is not significant.
    pub async fn visible_to(
        &self,
        service_name: &str,
        service_version: &str,
    ) -> Result<Vec<Assignment>> {
        let all = self.assignments.get_all().await?;
        Ok(all
            .into_iter()
            .filter(|a| a.is_for_service(service_name, service_version) && !a.excluded)
            .collect())
    }

    /// Delete an assignment by id. No kind-specific logic applies.
    pub async fn remove(&self, id: &str) -> Result<()> {
        if !self.assignments.delete(id).await? {
            return Err(Error::AssignmentNotFound(id.to_string()));
        }
        info!(assignment = %id, "Assignment removed");
        Ok(())
    }

    /// Drop the admission serialization point for `toggle_name`, if one
    /// exists. Called when the toggle itself goes away; in-flight
    /// submissions keep their guard alive through the `Arc`.
    pub async fn forget_toggle(&self, toggle_name: &str) -> bool {
        self.admission_locks
            .lock()
            .await
            .remove(toggle_name)
            .is_some()
    }

    async fn admission_lock(&self, toggle_name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.admission_locks.lock().await;
        locks
            .entry(toggle_name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
