//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! shared by every pet: asset packs, timing, configuration and bounds.
//!
//! Overview
//! - `animationcatalog` – action name to frame sequence, parsed from `actions.xml`
//! - `assetlibrary` – per-visual-type asset packs (catalog + sprite index)
//! - `engineconfig` – INI-backed engine settings
//! - `randomsource` – seedable RNG for movement strategies
//! - `screensize` – bounds of the surface pets wander on
//! - `spriteindex` – sprite name to image file lookup
//! - `worldtime` – tick delta and total time in milliseconds
pub mod animationcatalog;
pub mod assetlibrary;
pub mod engineconfig;
pub mod randomsource;
pub mod screensize;
pub mod spriteindex;
pub mod worldtime;
