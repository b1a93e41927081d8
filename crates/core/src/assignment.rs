//! Assignment entity — binds a toggle to a specific (service, version).
//!
//! Assignments reference their toggle and service by flat fields rather
//! than embedded objects, so there is never a stale nested copy to argue
//! with about which value is authoritative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record binding a toggle to a consuming service.
///
/// A service is identified by the pair (`service_name`, `service_version`).
/// At most one assignment logically exists per (toggle, service, version)
/// combination; the policy engine enforces this, not the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier, caller-supplied, unique across all assignments.
    pub id: String,

    /// Name of the referenced toggle. Must exist in the catalog.
    pub toggle_name: String,

    /// Name of the consuming service.
    pub service_name: String,

    /// Version of the consuming service.
    pub service_version: String,

    /// Whether the toggle is "on" for this service.
    pub enabled: bool,

    /// Whether this service is specifically barred from the toggle.
    /// Only meaningful for red toggles; blue and green reject it.
    #[serde(default)]
    pub excluded: bool,

    /// When this assignment was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    pub fn new(
        id: impl Into<String>,
        toggle_name: impl Into<String>,
        service_name: impl Into<String>,
        service_version: impl Into<String>,
        enabled: bool,
    ) -> Self {
        Self {
            id: id.into(),
            toggle_name: toggle_name.into(),
            service_name: service_name.into(),
            service_version: service_version.into(),
            enabled,
            excluded: false,
            created_at: Utc::now(),
        }
    }

    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    /// Whether this assignment belongs to the given (service, version) pair.
    pub fn is_for_service(&self, service_name: &str, service_version: &str) -> bool {
        self.service_name == service_name && self.service_version == service_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excluded_defaults_to_false() {
        let json = r#"{
            "id": "a1",
            "toggle_name": "T1",
            "service_name": "S1",
            "service_version": "1.0",
            "enabled": true
        }"#;
        let assignment: Assignment = serde_json::from_str(json).unwrap();
        assert!(!assignment.excluded);
        assert!(assignment.enabled);
    }

    #[test]
    fn service_pair_matching() {
        let a = Assignment::new("a1", "T1", "S1", "1.0", true);
        assert!(a.is_for_service("S1", "1.0"));
        assert!(!a.is_for_service("S1", "2.0"));
        assert!(!a.is_for_service("S2", "1.0"));
    }
}
