//! Toggle entity — a named feature flag with a fixed kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The three fixed exclusivity policies governing how assignments for a
/// toggle may coexist.
///
/// The set is closed: any value outside it is unrepresentable once a
/// toggle has been deserialized or validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleKind {
    /// Blue toggles are globally shared while "on". A service turning its
    /// own "on" assignment "off" claims the toggle exclusively; from then
    /// on no other service may hold an "off" assignment for it.
    Blue,
    /// Green toggles are exclusive on the first "on" claim, by any
    /// service. "Off" assignments are per-service and non-exclusive.
    Green,
    /// Red toggles are open to all services, but a service can be
    /// individually excluded. Once excluded, further proposals for that
    /// (service, toggle) pair are silently absorbed.
    Red,
}

impl std::fmt::Display for ToggleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Red => "red",
        };
        f.write_str(name)
    }
}

/// A named feature flag.
///
/// `name` is the primary key and is immutable once created. `kind` is
/// fixed at creation and must not be changed while assignments reference
/// the toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toggle {
    /// Globally unique, non-empty name.
    pub name: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Exclusivity policy, fixed at creation.
    pub kind: ToggleKind,

    /// When this toggle was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Toggle {
    pub fn new(name: impl Into<String>, kind: ToggleKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
