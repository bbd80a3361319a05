//! Game session
//!
//! Entry point for the presentation layer. Owns the current world, the
//! presenter, the high score store and the random source. The high score
//! is loaded once here and carried into every rebuilt world.

use crate::highscores::ScoreTracker;
use crate::persistence::KeyValueStore;
use crate::presenter::Presenter;
use crate::settings::Settings;
use crate::sim::{
    ActorId, ContactOutcome, GamePhase, SimRng, TickInput, UniformSource, World, resolve_contact,
    tick,
};

/// What a primary input (tap) did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// ShowingLogo -> Playing
    Started,
    /// Player fired a bullet
    Shot(ActorId),
    /// Playing, but the player is gone (no bullet)
    Ignored,
    /// Dead -> fresh world
    Restarted,
}

pub struct Game<P: Presenter, S: KeyValueStore, R: UniformSource = SimRng> {
    settings: Settings,
    world: World,
    presenter: P,
    store: S,
    rng: R,
    /// Worlds built so far, including the current one
    runs: u32,
}

impl<P: Presenter, S: KeyValueStore, R: UniformSource> Game<P, S, R> {
    /// Load the high score and build the first world
    pub fn new(settings: Settings, mut presenter: P, store: S, rng: R) -> Self {
        let scores = ScoreTracker::load(&store);
        let world = World::with_scores(settings.clone(), scores, &mut presenter);
        Self {
            settings,
            world,
            presenter,
            store,
            rng,
            runs: 1,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Tap: start, shoot or restart depending on the phase
    pub fn on_primary_input(&mut self) -> InputOutcome {
        match self.world.phase {
            GamePhase::ShowingLogo => {
                self.world.start();
                InputOutcome::Started
            }
            GamePhase::Playing => match self.world.shoot(&mut self.presenter) {
                Some(id) => InputOutcome::Shot(id),
                None => InputOutcome::Ignored,
            },
            GamePhase::Dead => {
                self.restart();
                InputOutcome::Restarted
            }
        }
    }

    /// Advance the simulation. `steering` is the signed tilt signal.
    pub fn on_tick(&mut self, dt: f32, steering: f32) {
        let input = TickInput { steering };
        tick(
            &mut self.world,
            &input,
            dt,
            &mut self.rng,
            &mut self.presenter,
        );
    }

    /// One reported overlap between two actors
    pub fn on_contact_detected(&mut self, a: ActorId, b: ActorId) -> ContactOutcome {
        let was_dead = self.world.phase == GamePhase::Dead;
        let outcome = resolve_contact(&mut self.world, a, b, &mut self.presenter);
        if !was_dead && self.world.phase == GamePhase::Dead {
            let scores = &mut self.world.scores;
            let is_new = scores.finish_run(&mut self.store);
            self.presenter
                .set_high_score_display(scores.high_score(), is_new);
        }
        outcome
    }

    /// Replace the world with a fresh one in ShowingLogo
    fn restart(&mut self) {
        let scores = self.world.scores.next_run();
        self.presenter.request_scene_transition();
        self.world = World::with_scores(self.settings.clone(), scores, &mut self.presenter);
        self.runs += 1;
        log::info!("Restarted (run {})", self.runs);
    }
}
