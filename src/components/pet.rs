//! Identity components of a pet entity.

use std::sync::Arc;

use bevy_ecs::prelude::Component;

/// External, caller-chosen name of a pet. Unique among live pets.
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PetId(pub String);

/// Visual type (asset pack name) a pet draws its animations and sprites from.
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash)]
pub struct VisualType(pub Arc<str>);

impl VisualType {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
