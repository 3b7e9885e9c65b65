//! Engine systems.
//!
//! Submodules overview
//! - [`animation`] – advance every pet's playback state by the tick delta
//! - [`movement`] – move walking pets with their movement strategy
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod movement;
pub mod time;
