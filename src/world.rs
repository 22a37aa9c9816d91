use log::{debug, trace};

use crate::collision::{
    penetration_with_config, swept_aabb_3d, swept_aabb_xz, Penetration, SweepHit,
};
use crate::config::CollisionConfig;
use crate::error::ConfigError;
use crate::geometry::{Collider, Hitbox};
use crate::math::Vec3;

/// Which axes the hitbox sweep considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SweepMode {
    /// All three axes
    #[default]
    Full,
    /// [`swept_aabb_xz`]: vertical extents are ignored, and so are approaches made while
    /// already inside the X slab
    GroundPlane,
}

/// Configuration for the resolver
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Narrow-phase settings
    pub collision: CollisionConfig,
    /// Maximum passes over the static colliders per `resolve` call
    pub max_resolve_passes: usize,
    /// Axes used by `sweep`
    pub sweep_mode: SweepMode,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            collision: CollisionConfig::default(),
            max_resolve_passes: 4,
            sweep_mode: SweepMode::Full,
        }
    }
}

impl WorldConfig {
    /// Sets the narrow-phase settings
    pub fn with_collision(mut self, collision: CollisionConfig) -> Self {
        self.collision = collision;
        self
    }

    /// Sets the pass limit
    pub fn with_max_resolve_passes(mut self, passes: usize) -> Self {
        self.max_resolve_passes = passes;
        self
    }

    /// Sets the sweep axes
    pub fn with_sweep_mode(mut self, mode: SweepMode) -> Self {
        self.sweep_mode = mode;
        self
    }

    /// Checks the pass limit and both narrow-phase stages
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_resolve_passes == 0 {
            return Err(ConfigError::ZeroIterations { algorithm: "resolve" });
        }
        self.collision.validate()
    }
}

/// A handle to a static collider in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(pub u32);

impl ColliderHandle {
    /// Returns the index of this handle
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A handle to a static hitbox in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitboxHandle(pub u32);

impl HitboxHandle {
    /// Returns the index of this handle
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An overlap between a body and one static collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// The static collider involved
    pub handle: ColliderHandle,
    /// Separation of the body from that collider
    pub penetration: Penetration,
}

/// Static level geometry that moving bodies are kept out of.
///
/// Colliders go through GJK/EPA push-out, hitboxes through the swept test. Statics never move;
/// the bodies being resolved are owned by the caller.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    statics: Vec<Option<Collider>>,
    free_statics: Vec<usize>,
    hitboxes: Vec<Option<Hitbox>>,
    free_hitboxes: Vec<usize>,
}

impl Default for World {
    fn default() -> Self {
        Self::with_valid_config(WorldConfig::default())
    }
}

impl World {
    /// Creates an empty world after validating `config`
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: WorldConfig) -> Self {
        Self {
            config,
            statics: Vec::new(),
            free_statics: Vec::new(),
            hitboxes: Vec::new(),
            free_hitboxes: Vec::new(),
        }
    }

    /// The validated configuration
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Adds a static collider and returns its handle
    pub fn add_static(&mut self, collider: Collider) -> ColliderHandle {
        let index = insert_slot(&mut self.statics, &mut self.free_statics, collider);
        ColliderHandle(index as u32)
    }

    /// Adds a static hitbox for the swept path. Its velocity is ignored.
    pub fn add_static_hitbox(&mut self, hitbox: Hitbox) -> HitboxHandle {
        let index = insert_slot(&mut self.hitboxes, &mut self.free_hitboxes, hitbox);
        HitboxHandle(index as u32)
    }

    /// Gets a static collider
    pub fn static_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.statics.get(handle.index()).and_then(Option::as_ref)
    }

    /// Gets a static hitbox
    pub fn static_hitbox(&self, handle: HitboxHandle) -> Option<&Hitbox> {
        self.hitboxes.get(handle.index()).and_then(Option::as_ref)
    }

    /// Removes a static collider, returning it if the handle was live
    pub fn remove_static(&mut self, handle: ColliderHandle) -> Option<Collider> {
        remove_slot(&mut self.statics, &mut self.free_statics, handle.index())
    }

    /// Removes a static hitbox, returning it if the handle was live
    pub fn remove_static_hitbox(&mut self, handle: HitboxHandle) -> Option<Hitbox> {
        remove_slot(&mut self.hitboxes, &mut self.free_hitboxes, handle.index())
    }

    /// Number of live static colliders
    pub fn static_count(&self) -> usize {
        self.statics.len() - self.free_statics.len()
    }

    /// Number of live static hitboxes
    pub fn hitbox_count(&self) -> usize {
        self.hitboxes.len() - self.free_hitboxes.len()
    }

    /// Iterates the live static colliders
    pub fn statics(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> {
        self.statics
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|c| (ColliderHandle(i as u32), c)))
    }

    /// Every static collider overlapping `body`, with the penetration that separates them.
    ///
    /// Pairs whose EPA run did not converge are left out.
    pub fn contacts(&self, body: &Collider) -> Vec<Contact> {
        self.statics()
            .filter_map(|(handle, fixed)| {
                penetration_with_config(body, fixed, &self.config.collision)
                    .map(|penetration| Contact { handle, penetration })
            })
            .collect()
    }

    /// Pushes `body` out of every static collider it overlaps.
    ///
    /// Each pass corrects against the statics one after another, so a correction out of one
    /// collider is seen by the next. Passes repeat until nothing overlaps or the pass limit is
    /// reached. Returns the total translation applied.
    pub fn resolve(&self, body: &mut Collider) -> Vec3 {
        let mut total = Vec3::ZERO;

        for pass in 0..self.config.max_resolve_passes {
            let mut corrected = false;

            for (handle, fixed) in self.statics() {
                let Some(contact) = penetration_with_config(&*body, fixed, &self.config.collision)
                else {
                    continue;
                };

                trace!(
                    "resolve pass {pass}: static {} depth {} normal {}",
                    handle.0,
                    contact.depth,
                    contact.normal
                );
                let correction = contact.correction();
                body.translate(correction);
                total += correction;
                corrected = true;
            }

            if !corrected {
                return total;
            }
        }

        debug!(
            "resolve: body still corrected after {} passes",
            self.config.max_resolve_passes
        );
        total
    }

    /// Moves `hitbox` along its velocity, stopping at the first static hitbox it would hit.
    ///
    /// On a hit the hitbox advances to the contact and the velocity component along the hit
    /// normal is removed, so the next frame slides along the surface. Without a hit the full
    /// velocity is applied.
    pub fn sweep(&self, hitbox: &mut Hitbox) -> Option<SweepHit> {
        let earliest = self
            .hitboxes
            .iter()
            .flatten()
            .map(|fixed| match self.config.sweep_mode {
                SweepMode::GroundPlane => swept_aabb_xz(hitbox, fixed),
                SweepMode::Full => swept_aabb_3d(hitbox, fixed),
            })
            .filter(SweepHit::is_hit)
            .min_by(|a, b| a.time.total_cmp(&b.time));

        match earliest {
            Some(hit) => {
                hitbox.advance(hit.time);
                hitbox.velocity -= hit.normal * hitbox.velocity.dot(hit.normal);
                trace!("sweep: hit at {} with normal {}", hit.time, hit.normal);
                Some(hit)
            }
            None => {
                hitbox.advance(1.0);
                None
            }
        }
    }
}

fn insert_slot<T>(slots: &mut Vec<Option<T>>, free: &mut Vec<usize>, value: T) -> usize {
    if let Some(index) = free.pop() {
        slots[index] = Some(value);
        index
    } else {
        slots.push(Some(value));
        slots.len() - 1
    }
}

fn remove_slot<T>(slots: &mut [Option<T>], free: &mut Vec<usize>, index: usize) -> Option<T> {
    let removed = slots.get_mut(index)?.take()?;
    free.push(index);
    Some(removed)
}
