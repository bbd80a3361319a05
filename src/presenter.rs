//! Outbound interface to the presentation layer
//!
//! The simulation never touches sprites, emitters or audio directly. It
//! calls into a [`Presenter`], which owns renderables keyed by [`ActorId`].

use glam::Vec2;

use crate::sim::{Actor, ActorId};

/// Particle effects the core asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Player plane destroyed
    PlayerExplosion,
    /// Enemy plane destroyed
    EnemyExplosion,
}

impl Effect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::PlayerExplosion => "PlayerExplosion",
            Effect::EnemyExplosion => "EnemyExplosion",
        }
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Player fires
    Shoot,
    /// Any plane destroyed
    Explosion,
}

impl Sound {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sound::Shoot => "shoot",
            Sound::Explosion => "explosion",
        }
    }
}

/// Side effects requested by the simulation.
///
/// All calls are fire-and-forget. `despawn_actor` may be called for an
/// actor whose motion already finished on the presentation side and must
/// tolerate that.
pub trait Presenter {
    /// Instantiate the renderable/physics body for `actor`.
    ///
    /// Masks come from `actor.profile()`, the motion script from
    /// `actor.motion`.
    fn spawn_actor(&mut self, actor: &Actor);
    fn despawn_actor(&mut self, id: ActorId);
    fn play_effect(&mut self, effect: Effect, position: Vec2);
    fn play_sound(&mut self, sound: Sound);
    fn set_score_display(&mut self, score: u32);
    fn set_high_score_display(&mut self, high_score: u32, is_new: bool);
    /// Present a fresh scene (restart after death)
    fn request_scene_transition(&mut self);
}

/// One recorded presenter call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Spawn(ActorId, crate::sim::ActorKind, Vec2),
    Despawn(ActorId),
    Effect(Effect, Vec2),
    Sound(Sound),
    ScoreDisplay(u32),
    HighScoreDisplay(u32, bool),
    SceneTransition,
}

/// Presenter that records every call. Used headless and in tests.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
}

impl Recorder {
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn spawned(&self) -> Vec<ActorId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Spawn(id, _, _) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn despawned(&self) -> Vec<ActorId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Despawn(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn effects(&self) -> Vec<(Effect, Vec2)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Effect(effect, pos) => Some((*effect, *pos)),
                _ => None,
            })
            .collect()
    }

    /// Most recent high score display update
    pub fn last_high_score(&self) -> Option<(u32, bool)> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::HighScoreDisplay(score, is_new) => Some((*score, *is_new)),
            _ => None,
        })
    }
}

impl Presenter for Recorder {
    fn spawn_actor(&mut self, actor: &Actor) {
        self.calls.push(Call::Spawn(actor.id, actor.kind, actor.pos));
    }

    fn despawn_actor(&mut self, id: ActorId) {
        self.calls.push(Call::Despawn(id));
    }

    fn play_effect(&mut self, effect: Effect, position: Vec2) {
        log::trace!("effect {} at ({:.1}, {:.1})", effect.as_str(), position.x, position.y);
        self.calls.push(Call::Effect(effect, position));
    }

    fn play_sound(&mut self, sound: Sound) {
        log::trace!("sound {}", sound.as_str());
        self.calls.push(Call::Sound(sound));
    }

    fn set_score_display(&mut self, score: u32) {
        self.calls.push(Call::ScoreDisplay(score));
    }

    fn set_high_score_display(&mut self, high_score: u32, is_new: bool) {
        self.calls.push(Call::HighScoreDisplay(high_score, is_new));
    }

    fn request_scene_transition(&mut self) {
        self.calls.push(Call::SceneTransition);
    }
}
