//! Coarse behavioral mode of a pet.
//!
//! Each mode maps to exactly one default action name through
//! [`Behavior::default_action`]. Only [`Behavior::Walking`] makes a pet move.

use std::fmt;
use std::str::FromStr;

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Component, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    #[default]
    Idle,
    Walking,
    Sleeping,
    Eating,
    Playing,
}

impl Behavior {
    pub const ALL: [Behavior; 5] = [
        Behavior::Idle,
        Behavior::Walking,
        Behavior::Sleeping,
        Behavior::Eating,
        Behavior::Playing,
    ];

    /// Action played when a pet enters this mode.
    pub fn default_action(self) -> &'static str {
        match self {
            Behavior::Idle => "Stand",
            Behavior::Walking => "Walk",
            Behavior::Sleeping => "Sprawl",
            Behavior::Eating => "Sit",
            Behavior::Playing => "SitAndDangleLegs",
        }
    }

    pub fn is_moving(self) -> bool {
        matches!(self, Behavior::Walking)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Behavior::Idle => "idle",
            Behavior::Walking => "walking",
            Behavior::Sleeping => "sleeping",
            Behavior::Eating => "eating",
            Behavior::Playing => "playing",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Behavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Behavior::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown behavior '{}'", s))
    }
}
