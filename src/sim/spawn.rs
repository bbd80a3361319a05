//! Timed spawning: the enemy wave and opportunistic enemy fire

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::actor::{ActorId, Motion};
use super::category::ActorKind;
use super::state::{GamePhase, World};
use crate::consts::ENEMY_EXIT_MARGIN;
use crate::presenter::Presenter;
use crate::settings::Settings;

/// Source of uniformly distributed values.
///
/// Injected so tests can substitute a deterministic fake.
pub trait UniformSource {
    /// A value in `[min, max)`; returns `min` when the range is empty
    fn uniform(&mut self, min: f32, max: f32) -> f32;
}

/// Seeded PCG generator used in real runs
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl UniformSource for SimRng {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if min.is_nan() || max.is_nan() || max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }
}

/// Pick an index in `0..len` (len must be non-zero)
fn pick_index(rng: &mut dyn UniformSource, len: usize) -> usize {
    let i = rng.uniform(0.0, len as f32).floor();
    (i.max(0.0) as usize).min(len - 1)
}

/// Accumulator that fires once its accumulated time reaches the interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimer {
    pub interval: f32,
    pub accumulated: f32,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulated: 0.0,
        }
    }

    /// Add `dt`; returns true (and resets to zero) when the interval is reached.
    /// The remainder is dropped, so one tick fires at most once.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.accumulated += dt.max(0.0);
        if self.accumulated >= self.interval {
            self.accumulated = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}

/// The two periodic spawn rules
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    pub enemy_wave: SpawnTimer,
    /// Enemy wave runs only between Playing and Dead
    pub active: bool,
    /// Per-tick probability of an enemy bullet
    pub fire_chance: f32,
}

impl SpawnScheduler {
    pub fn new(settings: &Settings) -> Self {
        Self {
            enemy_wave: SpawnTimer::new(settings.enemy_interval),
            active: false,
            fire_chance: settings.enemy_fire_chance,
        }
    }

    pub fn start(&mut self) {
        self.enemy_wave.reset();
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }
}

/// Advance the enemy wave timer; spawns one enemy when it fires
pub fn run_enemy_wave(
    world: &mut World,
    dt: f32,
    rng: &mut dyn UniformSource,
    presenter: &mut dyn Presenter,
) -> Option<ActorId> {
    if !world.scheduler.active {
        return None;
    }
    if !world.scheduler.enemy_wave.advance(dt) {
        return None;
    }
    Some(spawn_enemy(world, rng, presenter))
}

/// Spawn one enemy just past the right edge, flying to the left edge
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut dyn UniformSource,
    presenter: &mut dyn Presenter,
) -> ActorId {
    let s = &world.settings;
    let size = Vec2::new(s.enemy_width, s.enemy_height);
    let min_y = 2.0 * size.y;
    let max_y = s.world_height - size.y;
    let y = rng.uniform(min_y, max_y);

    let start_x = s.world_width + size.x;
    let target_x = -size.x - ENEMY_EXIT_MARGIN;
    let motion = Motion::over(start_x, target_x, s.enemy_travel_seconds);

    let id = world.spawn(
        ActorKind::Enemy,
        Vec2::new(start_x, y),
        size,
        Some(motion),
        presenter,
    );
    log::debug!("Enemy {} spawned at y={:.1}", id, y);
    id
}

/// One enemy-fire attempt. Only enemies still right of the midpoint qualify.
pub fn attempt_enemy_fire(
    world: &mut World,
    rng: &mut dyn UniformSource,
    presenter: &mut dyn Presenter,
) -> Option<ActorId> {
    if world.phase != GamePhase::Playing {
        return None;
    }
    if rng.uniform(0.0, 1.0) >= world.scheduler.fire_chance {
        return None;
    }

    let midpoint = world.settings.world_width / 2.0;
    let shooters: Vec<(Vec2, Vec2)> = world
        .living(ActorKind::Enemy)
        .filter(|e| e.pos.x > midpoint)
        .map(|e| (e.pos, e.size))
        .collect();
    if shooters.is_empty() {
        return None;
    }
    let (pos, size) = shooters[pick_index(rng, shooters.len())];

    let bullet = world.settings.bullet_size;
    let start = Vec2::new(pos.x - size.x / 2.0, pos.y);
    let motion = Motion::toward(start.x, -bullet, world.settings.enemy_bullet_speed);
    let id = world.spawn(
        ActorKind::EnemyBullet,
        start,
        Vec2::splat(bullet),
        Some(motion),
        presenter,
    );
    log::debug!("Enemy bullet {} fired from x={:.1}", id, pos.x);
    Some(id)
}
