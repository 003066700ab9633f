//! Structural role of a unit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exactly one role per unit, derived by [`crate::core::classify::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Entity,
    Repository,
    Service,
    Initializer,
    PageService,
    View,
    Exception,
    Configuration,
    Other,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::Entity,
        Role::Repository,
        Role::Service,
        Role::Initializer,
        Role::PageService,
        Role::View,
        Role::Exception,
        Role::Configuration,
        Role::Other,
    ];

    /// Human-readable category used in report columns.
    pub fn label(self) -> &'static str {
        match self {
            Role::Entity => "Entity",
            Role::Repository => "Repository",
            Role::Service => "Service",
            Role::Initializer => "Initializer",
            Role::PageService => "Page Service",
            Role::View => "View",
            Role::Exception => "Exception",
            Role::Configuration => "Configuration",
            Role::Other => "Other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
