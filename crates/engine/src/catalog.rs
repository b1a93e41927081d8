//! Toggle catalog — owns toggle definitions.
//!
//! Validation happens here, before anything touches the store: names must
//! be non-empty, names are unique, and a toggle cannot be deleted while
//! assignments reference it. Kind validity is enforced by the type — a
//! [`ToggleKind`] outside the closed set never deserializes.

use std::sync::Arc;

use tracing::info;

use switchyard_core::{Assignment, Error, Result, Store, Toggle};

/// CRUD over toggle definitions with uniqueness and reference checks.
pub struct ToggleCatalog {
    toggles: Arc<dyn Store<Toggle>>,
    assignments: Arc<dyn Store<Assignment>>,
}

impl ToggleCatalog {
    pub fn new(toggles: Arc<dyn Store<Toggle>>, assignments: Arc<dyn Store<Assignment>>) -> Self {
        Self {
            toggles,
            assignments,
        }
    }

    /// Persist a new toggle. Fails if the name is empty or already taken.
    pub async fn create(&self, toggle: Toggle) -> Result<Toggle> {
        validate(&toggle)?;
        if self.toggles.get(&toggle.name).await?.is_some() {
            return Err(Error::ToggleExists(toggle.name));
        }
        let created = self.toggles.create(toggle).await?;
        info!(toggle = %created.name, kind = %created.kind, "Toggle created");
        Ok(created)
    }

    /// Replace the toggle stored under `name`. There is no
    /// create-on-missing fallback: updating an absent toggle fails. The
    /// name is the primary key and assignments reference toggles by it,
    /// so a body naming a different toggle is rejected outright.
    pub async fn update(&self, name: &str, toggle: Toggle) -> Result<Toggle> {
        validate(&toggle)?;
        if toggle.name != name {
            return Err(Error::ToggleNameImmutable {
                name: name.to_string(),
                proposed: toggle.name,
            });
        }
        if self.toggles.get(name).await?.is_none() {
            return Err(Error::ToggleNotFound(name.to_string()));
        }
        let updated = self.toggles.update(name, toggle).await?;
        info!(toggle = %updated.name, "Toggle updated");
        Ok(updated)
    }

    pub async fn get(&self, name: &str) -> Result<Toggle> {
        self.toggles
            .get(name)
            .await?
            .ok_or_else(|| Error::ToggleNotFound(name.to_string()))
    }

    pub async fn get_all(&self) -> Result<Vec<Toggle>> {
        Ok(self.toggles.get_all().await?)
    }

    /// Remove a toggle. Refused while any assignment references it.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let referenced = self
            .assignments
            .get_all()
            .await?
            .iter()
            .any(|a| a.toggle_name == name);
        if referenced {
            return Err(Error::ToggleInUse(name.to_string()));
        }

        if !self.toggles.delete(name).await? {
            return Err(Error::ToggleNotFound(name.to_string()));
        }
        info!(toggle = %name, "Toggle deleted");
        Ok(())
    }
}

fn validate(toggle: &Toggle) -> Result<()> {
    if toggle.name.trim().is_empty() {
        return Err(Error::EmptyToggleName);
    }
    Ok(())
}
