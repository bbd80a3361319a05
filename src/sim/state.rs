//! World state and the game phase machine
//!
//! A `World` is one play-through: it is built in `ShowingLogo`, moves to
//! `Playing` on the first input and ends in `Dead`. Restarting means
//! building a new world; there is no in-place reset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, Motion};
use super::category::ActorKind;
use super::spawn::SpawnScheduler;
use crate::highscores::ScoreTracker;
use crate::presenter::Presenter;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title shown, waiting for the first tap
    ShowingLogo,
    /// Active gameplay
    Playing,
    /// Player destroyed; terminal for this world
    Dead,
}

/// One play-through's simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub settings: Settings,
    pub phase: GamePhase,
    /// Time scale for motion and timers; zero once dead
    pub speed: f32,
    /// Live and just-despawned actors, ordered by id
    pub actors: Vec<Actor>,
    pub player: ActorId,
    pub scores: ScoreTracker,
    pub scheduler: SpawnScheduler,
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl World {
    /// Build a fresh world with the player, ground and scene edge in place
    pub fn new(settings: Settings, high_score: u32, presenter: &mut dyn Presenter) -> Self {
        Self::with_scores(settings, ScoreTracker::new(high_score), presenter)
    }

    /// Like [`World::new`], continuing from an existing score tracker
    pub fn with_scores(
        settings: Settings,
        scores: ScoreTracker,
        presenter: &mut dyn Presenter,
    ) -> Self {
        let scheduler = SpawnScheduler::new(&settings);
        let mut world = Self {
            settings,
            phase: GamePhase::ShowingLogo,
            speed: 1.0,
            actors: Vec::new(),
            player: ActorId(0),
            scores,
            scheduler,
            time_ticks: 0,
            next_id: 1,
        };

        let s = world.settings.clone();
        let bounds = Vec2::new(s.world_width, s.world_height);

        world.player = world.spawn(
            ActorKind::Player,
            Vec2::new(
                s.world_width * crate::consts::PLAYER_START_X,
                s.world_height * crate::consts::PLAYER_START_Y,
            ),
            Vec2::new(s.player_width, s.player_height),
            None,
            presenter,
        );
        world.spawn(
            ActorKind::Ground,
            Vec2::new(s.world_width / 2.0, s.ground_height / 2.0),
            Vec2::new(s.world_width, s.ground_height),
            None,
            presenter,
        );
        world.spawn(ActorKind::SceneEdge, bounds / 2.0, bounds, None, presenter);

        let high_score = world.scores.high_score();
        presenter.set_score_display(world.scores.score());
        presenter.set_high_score_display(high_score, false);
        log::info!(
            "World built ({}x{}), high score {}",
            s.world_width,
            s.world_height,
            high_score
        );

        if s.start_playing {
            world.start();
        }
        world
    }

    /// Allocate a new actor ID
    fn next_actor_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create an actor and hand it to the presentation layer
    pub fn spawn(
        &mut self,
        kind: ActorKind,
        pos: Vec2,
        size: Vec2,
        motion: Option<Motion>,
        presenter: &mut dyn Presenter,
    ) -> ActorId {
        let id = self.next_actor_id();
        let mut actor = Actor::new(id, kind, pos, size);
        actor.motion = motion;
        presenter.spawn_actor(&actor);
        self.actors.push(actor);
        id
    }

    /// Remove an actor. Unknown or already-despawned ids are a no-op.
    pub fn despawn(&mut self, id: ActorId, presenter: &mut dyn Presenter) -> bool {
        let Some(actor) = self.actor_mut(id) else {
            return false;
        };
        if !actor.kill() {
            return false;
        }
        log::debug!("Despawned {} {}", actor.kind.as_str(), id);
        presenter.despawn_actor(id);
        true
    }

    /// Look up an actor that is still alive
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors
            .binary_search_by_key(&id, |a| a.id)
            .ok()
            .map(|i| &self.actors[i])
            .filter(|a| a.alive)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        match self.actors.binary_search_by_key(&id, |a| a.id) {
            Ok(i) if self.actors[i].alive => Some(&mut self.actors[i]),
            _ => None,
        }
    }

    pub fn is_alive(&self, id: ActorId) -> bool {
        self.actor(id).is_some()
    }

    /// Alive actors of one kind, in id order
    pub fn living(&self, kind: ActorKind) -> impl Iterator<Item = &Actor> {
        self.actors
            .iter()
            .filter(move |a| a.alive && a.kind == kind)
    }

    /// The player, unless destroyed
    pub fn player(&self) -> Option<&Actor> {
        self.actor(self.player)
    }

    /// Drop despawned records (end of tick)
    pub fn prune(&mut self) {
        self.actors.retain(|a| a.alive);
    }

    /// ShowingLogo -> Playing: steering on, enemy wave started
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::ShowingLogo {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.scheduler.start();
        log::info!("Game started");
        true
    }

    /// Playing (or ShowingLogo) -> Dead: spawn rules stopped, time frozen
    pub fn game_over(&mut self) -> bool {
        if self.phase == GamePhase::Dead {
            return false;
        }
        self.phase = GamePhase::Dead;
        self.scheduler.stop();
        self.speed = 0.0;
        if let Some(player) = self.actor_mut(self.player) {
            player.vel = Vec2::ZERO;
        }
        log::info!("Game over with score {}", self.scores.score());
        true
    }

    /// Fire a player bullet from the nose of the plane
    pub fn shoot(&mut self, presenter: &mut dyn Presenter) -> Option<ActorId> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        let (pos, size) = {
            let player = self.player()?;
            (player.pos, player.size)
        };
        let bullet = self.settings.bullet_size;
        let start = Vec2::new(pos.x + size.x / 2.0, pos.y);
        let motion = Motion::toward(
            start.x,
            self.settings.world_width + bullet,
            self.settings.player_bullet_speed,
        );
        let id = self.spawn(
            ActorKind::PlayerBullet,
            start,
            Vec2::splat(bullet),
            Some(motion),
            presenter,
        );
        presenter.play_sound(crate::presenter::Sound::Shoot);
        log::debug!("Player bullet {} fired", id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{Call, Recorder};

    #[test]
    fn test_new_world_layout() {
        let mut rec = Recorder::default();
        let world = World::new(Settings::default(), 3, &mut rec);

        assert_eq!(world.phase, GamePhase::ShowingLogo);
        assert_eq!(world.scores.score(), 0);
        assert_eq!(world.scores.high_score(), 3);
        assert!(!world.scheduler.active);
        assert!(world.player().is_some());
        assert_eq!(world.living(ActorKind::Ground).count(), 1);
        assert_eq!(world.living(ActorKind::SceneEdge).count(), 1);
        assert_eq!(rec.spawned().len(), 3);
        assert!(rec.calls.contains(&Call::HighScoreDisplay(3, false)));
    }

    #[test]
    fn test_start_playing_setting_skips_logo() {
        let mut rec = Recorder::default();
        let settings = Settings {
            start_playing: true,
            ..Settings::default()
        };
        let world = World::new(settings, 0, &mut rec);
        assert_eq!(world.phase, GamePhase::Playing);
        assert!(world.scheduler.active);
    }

    #[test]
    fn test_game_over_from_logo() {
        let mut rec = Recorder::default();
        let mut world = World::new(Settings::default(), 0, &mut rec);
        assert!(world.game_over());
        assert_eq!(world.phase, GamePhase::Dead);
        assert!(!world.scheduler.active);
        assert!(!world.start());
    }

    #[test]
    fn test_phase_transitions_are_ordered() {
        let mut rec = Recorder::default();
        let mut world = World::new(Settings::default(), 0, &mut rec);

        assert!(world.start());
        assert!(!world.start());
        assert!(world.game_over());
        assert!(!world.game_over());
        assert_eq!(world.phase, GamePhase::Dead);
        assert_eq!(world.speed, 0.0);
        assert!(!world.scheduler.active);
        assert!(!world.start(), "dead is terminal");
    }

    #[test]
    fn test_despawn_is_idempotent() {
        let mut rec = Recorder::default();
        let mut world = World::new(Settings::default(), 0, &mut rec);
        let player = world.player;

        assert!(world.despawn(player, &mut rec));
        assert!(!world.despawn(player, &mut rec));
        assert!(!world.despawn(ActorId(999), &mut rec));
        assert_eq!(rec.despawned(), vec![player]);

        world.prune();
        assert!(world.actor(player).is_none());
        assert!(!world.despawn(player, &mut rec));
    }

    #[test]
    fn test_shoot_only_while_playing() {
        let mut rec = Recorder::default();
        let mut world = World::new(Settings::default(), 0, &mut rec);
        assert!(world.shoot(&mut rec).is_none());

        world.start();
        let player = world.player().cloned().expect("player");
        let id = world.shoot(&mut rec).expect("bullet");
        let bullet = world.actor(id).expect("alive");
        assert_eq!(bullet.kind, ActorKind::PlayerBullet);
        assert_eq!(bullet.pos, Vec2::new(player.pos.x + player.size.x / 2.0, player.pos.y));
        assert!(bullet.motion.expect("moves").velocity_x > 0.0);
    }
}
