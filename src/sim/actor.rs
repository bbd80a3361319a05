//! Actors and their scripted motion

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::{ActorKind, CollisionCategory, ContactProfile};

/// Opaque actor identifier shared with the presentation layer.
///
/// Ids are allocated monotonically per world and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Linear horizontal travel that ends with a despawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Horizontal velocity (units/s, signed)
    pub velocity_x: f32,
    /// X coordinate at which the actor is removed
    pub target_x: f32,
}

impl Motion {
    /// Travel from `start_x` to `target_x` at a fixed speed
    pub fn toward(start_x: f32, target_x: f32, speed: f32) -> Self {
        let dir = if target_x >= start_x { 1.0 } else { -1.0 };
        Self {
            velocity_x: dir * speed.abs(),
            target_x,
        }
    }

    /// Travel from `start_x` to `target_x` in `duration` seconds
    pub fn over(start_x: f32, target_x: f32, duration: f32) -> Self {
        let duration = duration.max(f32::EPSILON);
        Self {
            velocity_x: (target_x - start_x) / duration,
            target_x,
        }
    }

    /// Advance `x` by `dt`; returns the new x and whether the target was reached
    pub fn step(&self, x: f32, dt: f32) -> (f32, bool) {
        let next = x + self.velocity_x * dt;
        let arrived = if self.velocity_x >= 0.0 {
            next >= self.target_x
        } else {
            next <= self.target_x
        };
        if arrived {
            (self.target_x, true)
        } else {
            (next, false)
        }
    }
}

/// A positioned, categorized entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    /// Center position (y grows upward, ground at y = 0)
    pub pos: Vec2,
    /// Full width/height of the bounding box
    pub size: Vec2,
    /// Velocity applied by steering (player only)
    pub vel: Vec2,
    /// Scripted motion, cleared on despawn
    pub motion: Option<Motion>,
    pub alive: bool,
}

impl Actor {
    pub fn new(id: ActorId, kind: ActorKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            vel: Vec2::ZERO,
            motion: None,
            alive: true,
        }
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = Some(motion);
        self
    }

    pub fn category(&self) -> CollisionCategory {
        self.kind.category()
    }

    pub fn profile(&self) -> ContactProfile {
        self.kind.profile()
    }

    /// Lower-left corner
    pub fn min(&self) -> Vec2 {
        self.pos - self.size * 0.5
    }

    /// Upper-right corner
    pub fn max(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Mark as despawned and cancel any pending motion.
    /// Returns false when the actor was already gone.
    pub(crate) fn kill(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.motion = None;
        self.vel = Vec2::ZERO;
        true
    }
}
