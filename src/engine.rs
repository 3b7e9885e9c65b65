//! Pet engine facade.
//!
//! [`PetEngine`] owns the ECS [`World`], the update [`Schedule`] and the map
//! from external pet ids to entities. It is the surface a renderer, window or
//! controller talks to:
//!
//! - [`spawn`](PetEngine::spawn) / [`despawn`](PetEngine::despawn) pets
//! - [`tick`](PetEngine::tick) playback (and movement) forward in time
//! - query [`current_sprite`](PetEngine::current_sprite) and
//!   [`current_anchor`](PetEngine::current_anchor) for drawing
//! - change what a pet does with [`set_action`](PetEngine::set_action) or
//!   [`set_behavior`](PetEngine::set_behavior)
//!
//! Every pet reads frames and sprites from the asset pack of its own visual
//! type. Packs are loaded on first use and shared between pets.
//!
//! # Example
//!
//! ```no_run
//! use petengine::engine::{PetEngine, TickTarget};
//! use petengine::components::petposition::PetPosition;
//! use petengine::resources::engineconfig::EngineConfig;
//!
//! let mut engine = PetEngine::new(&EngineConfig::new());
//! engine.spawn("Fluffy", "Patamon Shimeji", PetPosition::new(100, 100))?;
//! engine.tick(TickTarget::All, 100)?;
//! if let Some(path) = engine.current_sprite("Fluffy") {
//!     println!("draw {}", path.display());
//! }
//! # Ok::<(), petengine::error::EngineError>(())
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bevy_ecs::prelude::*;
use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::components::animation::PlaybackState;
use crate::components::behavior::Behavior;
use crate::components::movement::{Movement, RandomWalk};
use crate::components::pet::{PetId, VisualType};
use crate::components::petposition::PetPosition;
use crate::error::EngineError;
use crate::resources::animationcatalog::{DEFAULT_ACTION, FrameDescriptor};
use crate::resources::assetlibrary::{AssetLibrary, AssetPack};
use crate::resources::engineconfig::EngineConfig;
use crate::resources::randomsource::RandomSource;
use crate::resources::screensize::ScreenSize;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::movement::{movement, step};
use crate::systems::time::update_world_time;

/// Which pets a [`PetEngine::tick`] advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickTarget<'a> {
    All,
    Pet(&'a str),
}

/// Returned by [`PetEngine::spawn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetHandle {
    pub id: String,
    pub entity: Entity,
}

/// Serializable snapshot of one pet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetStatus {
    pub id: String,
    pub visual_type: String,
    pub behavior: Behavior,
    pub action: String,
    pub frame_index: usize,
    pub elapsed_ms: u32,
    pub position: PetPosition,
    pub sprite: Option<PathBuf>,
}

pub struct PetEngine {
    world: World,
    update: Schedule,
    pets: FxHashMap<String, Entity>,
    /// Live ids in spawn order.
    order: Vec<String>,
}

impl PetEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_random(config, RandomSource::default())
    }

    /// Engine whose random walks are reproducible for a given `seed`.
    pub fn with_seed(config: &EngineConfig, seed: u64) -> Self {
        Self::with_random(config, RandomSource::with_seed(seed))
    }

    fn with_random(config: &EngineConfig, random: RandomSource) -> Self {
        let mut world = World::new();
        world.insert_resource(AssetLibrary::new(config.assets_root.clone()));
        world.insert_resource(ScreenSize {
            w: i32::try_from(config.screen_width).unwrap_or(i32::MAX),
            h: i32::try_from(config.screen_height).unwrap_or(i32::MAX),
        });
        world.insert_resource(WorldTime::default());
        world.insert_resource(random);
        world.insert_resource(config.clone());

        let mut update = Schedule::default();
        update.add_systems((animation, movement).chain());

        Self {
            world,
            update,
            pets: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Load (or fetch the already loaded) asset pack of `visual_type`.
    pub fn load_visual_type(&mut self, visual_type: &str) -> Result<Arc<AssetPack>, EngineError> {
        Ok(self.world.resource_mut::<AssetLibrary>().load(visual_type)?)
    }

    /// Register an asset pack built in memory, replacing one of the same name.
    ///
    /// Pets of that type whose action is missing from the new catalog restart
    /// on the new default action ("Stand", else the first declared action).
    pub fn insert_visual_type(&mut self, pack: AssetPack) -> Arc<AssetPack> {
        let pack = self.world.resource_mut::<AssetLibrary>().insert(pack);
        let fallback = pack.catalog.default_action().unwrap_or(DEFAULT_ACTION);

        let mut pets = self
            .world
            .query::<(&PetId, &VisualType, &mut PlaybackState)>();
        for (id, visual_type, mut state) in pets.iter_mut(&mut self.world) {
            if visual_type.as_str() != pack.name || pack.catalog.contains(&state.action_name) {
                continue;
            }
            debug!(
                "'{}': action '{}' gone from '{}', falling back to '{}'",
                id.0, state.action_name, pack.name, fallback
            );
            *state = PlaybackState::new(fallback);
        }
        pack
    }

    /// Action names of `visual_type` in declaration order.
    pub fn list_actions(&mut self, visual_type: &str) -> Result<Vec<String>, EngineError> {
        let pack = self.load_visual_type(visual_type)?;
        Ok(pack.catalog.list_actions().map(str::to_string).collect())
    }

    /// Create a pet named `id` of `visual_type` at `start`.
    ///
    /// The pet starts idle, playing "Stand" (or the first declared action)
    /// from its first frame. A pack without actions still spawns the pet; it
    /// just has nothing to draw.
    pub fn spawn(
        &mut self,
        id: &str,
        visual_type: &str,
        start: PetPosition,
    ) -> Result<PetHandle, EngineError> {
        if self.pets.contains_key(id) {
            return Err(EngineError::DuplicatePet(id.to_string()));
        }
        let pack = self.load_visual_type(visual_type)?;
        let action = pack.catalog.default_action().unwrap_or(DEFAULT_ACTION);
        let max_step = self.world.resource::<EngineConfig>().max_step;

        let entity = self
            .world
            .spawn((
                PetId(id.to_string()),
                VisualType::new(visual_type),
                PlaybackState::new(action),
                Behavior::Idle,
                start,
                Movement::new(RandomWalk {
                    max_step: i32::try_from(max_step).unwrap_or(i32::MAX),
                }),
            ))
            .id();

        info!(
            "Spawned '{}' ({}) at ({}, {}) playing '{}'",
            id, visual_type, start.x, start.y, action
        );
        self.pets.insert(id.to_string(), entity);
        self.order.push(id.to_string());
        Ok(PetHandle {
            id: id.to_string(),
            entity,
        })
    }

    /// Remove a pet. Returns `false` if no pet has that id.
    pub fn despawn(&mut self, id: &str) -> bool {
        let Some(entity) = self.pets.remove(id) else {
            return false;
        };
        self.order.retain(|o| o != id);
        self.world.despawn(entity);
        info!("Despawned '{}'", id);
        true
    }

    /// Advance playback by `elapsed_ms`, then move walking pets.
    ///
    /// `TickTarget::All` runs the update schedule with the world's time scale
    /// applied; `TickTarget::Pet` advances one pet by exactly `elapsed_ms`.
    pub fn tick(&mut self, target: TickTarget<'_>, elapsed_ms: u32) -> Result<(), EngineError> {
        match target {
            TickTarget::All => {
                update_world_time(&mut self.world, elapsed_ms);
                self.update.run(&mut self.world);
                self.world.clear_trackers();
            }
            TickTarget::Pet(id) => {
                let entity = self.entity(id)?;
                if let Some(pack) = self.pack_of(entity)
                    && let Some(mut state) = self.world.get_mut::<PlaybackState>(entity)
                {
                    state.advance(elapsed_ms, &pack.catalog);
                }
                self.move_pet(entity);
            }
        }
        Ok(())
    }

    fn move_pet(&mut self, entity: Entity) {
        let next = self
            .world
            .resource_scope(|world, mut random: Mut<RandomSource>| {
                let screen = *world.resource::<ScreenSize>();
                let pet = world.get_entity(entity).ok()?;
                step(
                    *pet.get::<Behavior>()?,
                    pet.get::<Movement>()?,
                    *pet.get::<PetPosition>()?,
                    &screen,
                    &mut random,
                )
            });
        if let Some(next) = next
            && let Some(mut position) = self.world.get_mut::<PetPosition>(entity)
        {
            *position = next;
        }
    }

    /// Switch a pet to `action`, restarting at its first frame.
    ///
    /// Fails with [`EngineError::UnknownAction`] when the pet's catalog has no
    /// such action; the pet is left untouched.
    pub fn set_action(&mut self, id: &str, action: &str) -> Result<(), EngineError> {
        let entity = self.entity(id)?;
        let Some(pack) = self.pack_of(entity) else {
            return Err(EngineError::UnknownAction(action.to_string()));
        };
        let mut state = self
            .world
            .get_mut::<PlaybackState>(entity)
            .ok_or_else(|| EngineError::UnknownPet(id.to_string()))?;
        let previous = state.action_name.clone();
        state.set_action(action, &pack.catalog)?;
        if previous != action {
            debug!("'{}': action '{}' -> '{}'", id, previous, action);
        }
        Ok(())
    }

    /// Put a pet in `behavior` and play that behavior's default action.
    ///
    /// Both change together or not at all.
    pub fn set_behavior(&mut self, id: &str, behavior: Behavior) -> Result<(), EngineError> {
        self.set_action(id, behavior.default_action())?;
        let entity = self.entity(id)?;
        if let Some(mut current) = self.world.get_mut::<Behavior>(entity) {
            *current = behavior;
        }
        Ok(())
    }

    pub fn behavior(&self, id: &str) -> Option<Behavior> {
        self.world.get::<Behavior>(*self.pets.get(id)?).copied()
    }

    pub fn playback(&self, id: &str) -> Option<&PlaybackState> {
        self.world.get::<PlaybackState>(*self.pets.get(id)?)
    }

    /// Frame the pet shows right now.
    pub fn current_frame(&self, id: &str) -> Option<&FrameDescriptor> {
        let (state, pack) = self.playback_and_pack(id)?;
        state.current_frame(&pack.catalog)
    }

    /// Image file to draw for the pet, or `None` to skip drawing it.
    pub fn current_sprite(&self, id: &str) -> Option<&Path> {
        let (state, pack) = self.playback_and_pack(id)?;
        state.current_sprite(&pack.catalog, &pack.sprites)
    }

    /// Anchor of the current frame.
    pub fn current_anchor(&self, id: &str) -> Option<(i32, i32)> {
        self.current_frame(id).map(|f| f.anchor)
    }

    pub fn position(&self, id: &str) -> Option<PetPosition> {
        self.world.get::<PetPosition>(*self.pets.get(id)?).copied()
    }

    /// Move a pet directly. Playback state is not affected.
    pub fn set_position(&mut self, id: &str, position: PetPosition) -> Result<(), EngineError> {
        let entity = self.entity(id)?;
        let mut current = self
            .world
            .get_mut::<PetPosition>(entity)
            .ok_or_else(|| EngineError::UnknownPet(id.to_string()))?;
        *current = position;
        Ok(())
    }

    /// Resize the surface pets wander on.
    pub fn set_screen_size(&mut self, w: i32, h: i32) {
        *self.world.resource_mut::<ScreenSize>() = ScreenSize { w, h };
    }

    pub fn screen_size(&self) -> ScreenSize {
        *self.world.resource::<ScreenSize>()
    }

    /// Live pet ids in spawn order.
    pub fn pet_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn status(&self, id: &str) -> Option<PetStatus> {
        let entity = *self.pets.get(id)?;
        let state = self.world.get::<PlaybackState>(entity)?;
        Some(PetStatus {
            id: id.to_string(),
            visual_type: self.world.get::<VisualType>(entity)?.as_str().to_string(),
            behavior: *self.world.get::<Behavior>(entity)?,
            action: state.action_name.clone(),
            frame_index: state.frame_index,
            elapsed_ms: state.elapsed_ms,
            position: *self.world.get::<PetPosition>(entity)?,
            sprite: self.current_sprite(id).map(Path::to_path_buf),
        })
    }

    fn entity(&self, id: &str) -> Result<Entity, EngineError> {
        self.pets
            .get(id)
            .copied()
            .ok_or_else(|| EngineError::UnknownPet(id.to_string()))
    }

    fn pack_of(&self, entity: Entity) -> Option<Arc<AssetPack>> {
        let visual_type = self.world.get::<VisualType>(entity)?;
        self.world
            .resource::<AssetLibrary>()
            .get(visual_type.as_str())
            .cloned()
    }

    fn playback_and_pack(&self, id: &str) -> Option<(&PlaybackState, &AssetPack)> {
        let entity = *self.pets.get(id)?;
        let visual_type = self.world.get::<VisualType>(entity)?;
        let pack = self.world.resource::<AssetLibrary>().get(visual_type.as_str())?;
        let state = self.world.get::<PlaybackState>(entity)?;
        Some((state, &**pack))
    }
}
