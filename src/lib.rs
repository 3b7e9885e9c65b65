//! Desktop pet engine library.
//!
//! This module exposes the engine's ECS components, resources and systems, and
//! the [`engine::PetEngine`] facade used by renderers and controllers.

pub mod components;
pub mod engine;
pub mod error;
pub mod resources;
pub mod systems;
