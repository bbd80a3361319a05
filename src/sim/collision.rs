//! Axis-aligned overlap tests
//!
//! Stands in for the presentation layer's physics step when running
//! headless: finds overlapping pairs the category table says must be
//! reported, and keeps the player inside the scene edge.

use glam::Vec2;

use super::actor::{Actor, ActorId};
use super::category::{ActorKind, is_blocked_by, reports_contact};
use super::state::World;

/// Whether two actors' boxes overlap (touching edges count)
pub fn overlaps(a: &Actor, b: &Actor) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x <= b_max.x && b_min.x <= a_max.x && a_min.y <= b_max.y && b_min.y <= a_max.y
}

/// All reportable contacts among living actors, in id order.
///
/// Pairs outside the contact table are never returned.
pub fn detect_contacts(world: &World) -> Vec<(ActorId, ActorId)> {
    let living: Vec<&Actor> = world.actors.iter().filter(|a| a.alive).collect();
    let mut contacts = Vec::new();
    for (i, a) in living.iter().enumerate() {
        for b in &living[i + 1..] {
            if reports_contact(a.kind, b.kind) && overlaps(a, b) {
                contacts.push((a.id, b.id));
            }
        }
    }
    contacts
}

/// Clamp a box centered at `pos` so it stays within `[0, bounds]`.
/// Returns the clamped center and whether clamping happened.
pub fn confine(pos: Vec2, size: Vec2, bounds: Vec2) -> (Vec2, bool) {
    let half = size * 0.5;
    let lo = half.min(bounds * 0.5);
    let hi = (bounds - half).max(bounds * 0.5);
    let clamped = pos.clamp(lo, hi);
    (clamped, clamped != pos)
}

/// Apply scene-edge blocking to every actor whose collision mask includes it
pub fn apply_scene_edge(world: &mut World) {
    let bounds = Vec2::new(world.settings.world_width, world.settings.world_height);
    for actor in world.actors.iter_mut().filter(|a| a.alive) {
        if !is_blocked_by(actor.kind, ActorKind::SceneEdge) {
            continue;
        }
        let (pos, hit) = confine(actor.pos, actor.size, bounds);
        if hit {
            actor.pos = pos;
            // Stop pushing into the wall
            if (pos.y <= actor.size.y * 0.5 && actor.vel.y < 0.0)
                || (pos.y >= bounds.y - actor.size.y * 0.5 && actor.vel.y > 0.0)
            {
                actor.vel.y = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::Recorder;
    use crate::settings::Settings;

    #[test]
    fn test_overlaps() {
        let a = Actor::new(ActorId(1), ActorKind::Enemy, Vec2::new(0.0, 0.0), Vec2::splat(10.0));
        let b = Actor::new(ActorId(2), ActorKind::PlayerBullet, Vec2::new(9.0, 0.0), Vec2::splat(10.0));
        let c = Actor::new(ActorId(3), ActorKind::PlayerBullet, Vec2::new(30.0, 0.0), Vec2::splat(10.0));
        assert!(overlaps(&a, &b));
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_detect_contacts_respects_table() {
        let mut rec = Recorder::default();
        let mut world = World::new(Settings::default(), 0, &mut rec);
        let at = world.player().expect("player").pos;

        // Everything stacked on the player
        let enemy = world.spawn(ActorKind::Enemy, at, Vec2::splat(10.0), None, &mut rec);
        let shot = world.spawn(ActorKind::PlayerBullet, at, Vec2::splat(10.0), None, &mut rec);
        let other_shot = world.spawn(ActorKind::PlayerBullet, at, Vec2::splat(10.0), None, &mut rec);

        let contacts = detect_contacts(&world);
        let player = world.player;
        assert!(contacts.contains(&(player, enemy)));
        assert!(contacts.contains(&(enemy, shot)));
        assert!(contacts.contains(&(enemy, other_shot)));
        // Player/bullet, bullet/bullet and anything with the scene edge never show up
        for (a, b) in &contacts {
            let ka = world.actor(*a).expect("alive").kind;
            let kb = world.actor(*b).expect("alive").kind;
            assert!(reports_contact(ka, kb));
        }
        assert_eq!(contacts.len(), 3);
    }

    #[test]
    fn test_confine_keeps_box_inside() {
        let bounds = Vec2::new(100.0, 50.0);
        let (pos, hit) = confine(Vec2::new(50.0, 49.0), Vec2::splat(10.0), bounds);
        assert!(hit);
        assert_eq!(pos, Vec2::new(50.0, 45.0));

        let (pos, hit) = confine(Vec2::new(50.0, 25.0), Vec2::splat(10.0), bounds);
        assert!(!hit);
        assert_eq!(pos, Vec2::new(50.0, 25.0));
    }
}
