//! Contact resolution
//!
//! Called once per reported overlap. The pair is unordered, so roles are
//! detected on either side. Both ids are re-checked for liveness first:
//! a contact reported for an actor that was despawned earlier in the same
//! batch does nothing.

use super::actor::{Actor, ActorId};
use super::category::ActorKind;
use super::state::World;
use crate::presenter::{Effect, Presenter, Sound};

/// What a single resolution did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Stale ids or a pair with no gameplay rule
    Ignored,
    /// Enemy shot down; score went up by one
    EnemyDestroyed { enemy: ActorId, bullet: ActorId },
    /// Player hit by an enemy, an enemy bullet or the ground
    PlayerDestroyed { player: ActorId, by: ActorKind },
}

impl ContactOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, ContactOutcome::PlayerDestroyed { .. })
    }
}

/// Split an unordered pair into (`kind` side, other side)
fn role<'a>(a: &'a Actor, b: &'a Actor, kind: ActorKind) -> Option<(&'a Actor, &'a Actor)> {
    if a.kind == kind {
        Some((a, b))
    } else if b.kind == kind {
        Some((b, a))
    } else {
        None
    }
}

/// Apply the gameplay consequences of `a` touching `b`
pub fn resolve_contact(
    world: &mut World,
    a: ActorId,
    b: ActorId,
    presenter: &mut dyn Presenter,
) -> ContactOutcome {
    if a == b {
        return ContactOutcome::Ignored;
    }
    let (Some(first), Some(second)) = (world.actor(a).cloned(), world.actor(b).cloned()) else {
        log::debug!("Contact {} / {} ignored: actor already gone", a, b);
        return ContactOutcome::Ignored;
    };

    if let Some((player, other)) = role(&first, &second, ActorKind::Player) {
        if matches!(
            other.kind,
            ActorKind::Enemy | ActorKind::EnemyBullet | ActorKind::Ground
        ) {
            return destroy_player(world, player, other, presenter);
        }
    }

    if let Some((enemy, other)) = role(&first, &second, ActorKind::Enemy) {
        if other.kind == ActorKind::PlayerBullet {
            return destroy_enemy(world, enemy, other, presenter);
        }
    }

    log::debug!(
        "Contact {} {} / {} {} has no rule",
        first.kind.as_str(),
        a,
        second.kind.as_str(),
        b
    );
    ContactOutcome::Ignored
}

fn destroy_player(
    world: &mut World,
    player: &Actor,
    other: &Actor,
    presenter: &mut dyn Presenter,
) -> ContactOutcome {
    presenter.play_effect(Effect::PlayerExplosion, player.pos);
    presenter.play_sound(Sound::Explosion);

    if other.kind == ActorKind::EnemyBullet {
        world.despawn(other.id, presenter);
    }
    world.despawn(player.id, presenter);
    world.game_over();

    log::info!("Player destroyed by {}", other.kind.as_str());
    ContactOutcome::PlayerDestroyed {
        player: player.id,
        by: other.kind,
    }
}

fn destroy_enemy(
    world: &mut World,
    enemy: &Actor,
    bullet: &Actor,
    presenter: &mut dyn Presenter,
) -> ContactOutcome {
    presenter.play_effect(Effect::EnemyExplosion, enemy.pos);
    presenter.play_sound(Sound::Explosion);

    world.despawn(enemy.id, presenter);
    world.despawn(bullet.id, presenter);
    let score = world.scores.record_kill();
    presenter.set_score_display(score);

    log::debug!("Enemy {} destroyed, score {}", enemy.id, score);
    ContactOutcome::EnemyDestroyed {
        enemy: enemy.id,
        bullet: bullet.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::Recorder;
    use crate::settings::Settings;
    use crate::sim::state::GamePhase;
    use glam::Vec2;

    fn playing(rec: &mut Recorder) -> World {
        let mut world = World::new(Settings::default(), 0, rec);
        world.start();
        world
    }

    fn add(world: &mut World, kind: ActorKind, rec: &mut Recorder) -> ActorId {
        world.spawn(kind, Vec2::new(400.0, 200.0), Vec2::splat(10.0), None, rec)
    }

    #[test]
    fn test_bullet_kills_enemy_in_either_order() {
        let mut rec = Recorder::default();
        let mut world = playing(&mut rec);

        let enemy = add(&mut world, ActorKind::Enemy, &mut rec);
        let bullet = add(&mut world, ActorKind::PlayerBullet, &mut rec);
        let outcome = resolve_contact(&mut world, bullet, enemy, &mut rec);
        assert_eq!(outcome, ContactOutcome::EnemyDestroyed { enemy, bullet });
        assert!(!world.is_alive(enemy));
        assert!(!world.is_alive(bullet));
        assert_eq!(world.scores.score(), 1);

        let enemy = add(&mut world, ActorKind::Enemy, &mut rec);
        let bullet = add(&mut world, ActorKind::PlayerBullet, &mut rec);
        resolve_contact(&mut world, enemy, bullet, &mut rec);
        assert_eq!(world.scores.score(), 2);
        assert_eq!(world.phase, GamePhase::Playing);
    }

    #[test]
    fn test_repeat_contact_is_noop() {
        let mut rec = Recorder::default();
        let mut world = playing(&mut rec);
        let enemy = add(&mut world, ActorKind::Enemy, &mut rec);
        let bullet = add(&mut world, ActorKind::PlayerBullet, &mut rec);

        resolve_contact(&mut world, bullet, enemy, &mut rec);
        let effects = rec.effects().len();
        let outcome = resolve_contact(&mut world, bullet, enemy, &mut rec);
        assert_eq!(outcome, ContactOutcome::Ignored);
        assert_eq!(world.scores.score(), 1);
        assert_eq!(rec.effects().len(), effects);

        world.prune();
        assert_eq!(
            resolve_contact(&mut world, enemy, bullet, &mut rec),
            ContactOutcome::Ignored
        );
    }

    #[test]
    fn test_enemy_bullet_kills_player() {
        let mut rec = Recorder::default();
        let mut world = playing(&mut rec);
        let player = world.player;
        let player_pos = world.player().expect("player").pos;
        let shot = add(&mut world, ActorKind::EnemyBullet, &mut rec);

        let outcome = resolve_contact(&mut world, shot, player, &mut rec);
        assert!(outcome.is_game_over());
        assert!(!world.is_alive(player));
        assert!(!world.is_alive(shot));
        assert_eq!(world.phase, GamePhase::Dead);
        assert_eq!(world.speed, 0.0);
        assert_eq!(rec.effects(), vec![(Effect::PlayerExplosion, player_pos)]);
    }

    #[test]
    fn test_enemy_and_ground_kill_player_but_survive() {
        for kind in [ActorKind::Enemy, ActorKind::Ground] {
            let mut rec = Recorder::default();
            let mut world = playing(&mut rec);
            let other = add(&mut world, kind, &mut rec);
            let player = world.player;

            let outcome = resolve_contact(&mut world, player, other, &mut rec);
            assert_eq!(outcome, ContactOutcome::PlayerDestroyed { player, by: kind });
            assert!(world.is_alive(other));
            assert_eq!(world.phase, GamePhase::Dead);
        }
    }

    #[test]
    fn test_pairs_without_rule_are_ignored() {
        let mut rec = Recorder::default();
        let mut world = playing(&mut rec);
        let e1 = add(&mut world, ActorKind::Enemy, &mut rec);
        let e2 = add(&mut world, ActorKind::Enemy, &mut rec);
        let shot = add(&mut world, ActorKind::PlayerBullet, &mut rec);
        let player = world.player;

        assert_eq!(resolve_contact(&mut world, e1, e2, &mut rec), ContactOutcome::Ignored);
        assert_eq!(resolve_contact(&mut world, player, shot, &mut rec), ContactOutcome::Ignored);
        assert_eq!(resolve_contact(&mut world, e1, e1, &mut rec), ContactOutcome::Ignored);
        assert_eq!(
            resolve_contact(&mut world, e1, ActorId(9999), &mut rec),
            ContactOutcome::Ignored
        );
        assert!(world.is_alive(e1) && world.is_alive(e2) && world.is_alive(shot));
        assert_eq!(world.scores.score(), 0);
    }

    #[test]
    fn test_kill_after_death_still_explodes() {
        let mut rec = Recorder::default();
        let mut world = playing(&mut rec);
        let player = world.player;
        let shot = add(&mut world, ActorKind::EnemyBullet, &mut rec);
        let enemy = add(&mut world, ActorKind::Enemy, &mut rec);
        let bullet = add(&mut world, ActorKind::PlayerBullet, &mut rec);

        resolve_contact(&mut world, player, shot, &mut rec);
        let outcome = resolve_contact(&mut world, enemy, bullet, &mut rec);
        assert!(matches!(outcome, ContactOutcome::EnemyDestroyed { .. }));
        assert_eq!(rec.effects().len(), 2);
        // A second hit on the destroyed player does nothing
        let another = add(&mut world, ActorKind::EnemyBullet, &mut rec);
        assert_eq!(
            resolve_contact(&mut world, player, another, &mut rec),
            ContactOutcome::Ignored
        );
    }
}
