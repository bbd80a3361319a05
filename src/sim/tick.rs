//! Per-frame simulation step
//!
//! Order within a tick: steering, scripted motion, scene-edge blocking,
//! enemy wave, enemy fire, prune. Contacts are delivered separately after
//! the presentation layer's physics step.

use super::collision::apply_scene_edge;
use super::spawn::{UniformSource, attempt_enemy_fire, run_enemy_wave};
use super::state::{GamePhase, World};
use crate::presenter::Presenter;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Signed steering signal (normalized accelerometer x-axis)
    pub steering: f32,
}

/// Vertical velocity for a steering signal
pub fn steering_velocity(signal: f32, deadzone: f32, gain: f32) -> f32 {
    if signal.abs() > deadzone {
        signal * gain
    } else {
        0.0
    }
}

/// Advance the world by `dt` seconds
pub fn tick(
    world: &mut World,
    input: &TickInput,
    dt: f32,
    rng: &mut dyn UniformSource,
    presenter: &mut dyn Presenter,
) {
    if world.phase == GamePhase::Dead {
        return;
    }
    world.time_ticks += 1;
    let scaled = dt.max(0.0) * world.speed;

    if world.phase == GamePhase::Playing {
        let vy = steering_velocity(
            input.steering,
            world.settings.steering_deadzone,
            world.settings.steering_gain,
        );
        let player = world.player;
        if let Some(player) = world.actor_mut(player) {
            player.vel.y = vy;
            player.pos.y += vy * scaled;
        }
    }

    advance_motion(world, scaled, presenter);
    apply_scene_edge(world);

    run_enemy_wave(world, scaled, rng, presenter);
    attempt_enemy_fire(world, rng, presenter);

    world.prune();
}

/// Move scripted actors; those reaching their target despawn
fn advance_motion(world: &mut World, dt: f32, presenter: &mut dyn Presenter) {
    let mut arrived = Vec::new();
    for actor in world.actors.iter_mut().filter(|a| a.alive) {
        let Some(motion) = actor.motion else {
            continue;
        };
        let (x, done) = motion.step(actor.pos.x, dt);
        actor.pos.x = x;
        if done {
            arrived.push(actor.id);
        }
    }
    for id in arrived {
        world.despawn(id, presenter);
    }
}
