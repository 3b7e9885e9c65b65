//! ECS components for pet entities.
//!
//! Submodules overview:
//! - [`animation`] – per-pet playback state (action, frame, elapsed time)
//! - [`behavior`] – coarse behavioral mode and its default action
//! - [`movement`] – pluggable movement strategies (random walk)
//! - [`pet`] – pet id and visual type
//! - [`petposition`] – logical screen position

pub mod animation;
pub mod behavior;
pub mod movement;
pub mod pet;
pub mod petposition;
