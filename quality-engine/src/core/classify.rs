//! Role Classifier: pure, total mapping from unit attributes to a [`Role`].
//!
//! Precedence (first match wins):
//! Initializer > PageService > Service > Repository > Exception > Configuration
//! > layer-based Entity/View > Other.
//! Name cues beat layer cues, so `domain.CFooRepository` is a Repository.

use crate::model::{role::Role, unit::Unit};

pub fn classify(unit: &Unit) -> Role {
    classify_parts(&unit.module, &unit.layer, &unit.short_name)
}

/// Same as [`classify`] but on raw segments, for callers without a [`Unit`].
pub fn classify_parts(module: &str, layer: &str, short_name: &str) -> Role {
    if short_name.contains("Initializer") {
        Role::Initializer
    } else if short_name.contains("PageService") {
        Role::PageService
    } else if short_name.contains("Service") && layer == "service" {
        Role::Service
    } else if short_name.contains("Repository") {
        Role::Repository
    } else if short_name.contains("Exception") {
        Role::Exception
    } else if module.contains("config") || layer.contains("config") {
        Role::Configuration
    } else if layer == "domain" {
        Role::Entity
    } else if layer == "view" {
        Role::View
    } else {
        Role::Other
    }
}
