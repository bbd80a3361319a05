//! Plane Fight headless runner
//!
//! Plays a few rounds with a simple autopilot, standing in for the
//! presentation layer: it delivers ticks and taps, runs the overlap test
//! as the physics step and records presenter calls.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use plane_fight::consts::SIM_DT;
    use plane_fight::persistence::JsonFileStore;
    use plane_fight::presenter::{Call, Recorder};
    use plane_fight::sim::{ActorKind, GamePhase, SimRng, World, detect_contacts};
    use plane_fight::{Game, Settings, platform};

    /// Where the high score is kept
    const SAVE_PATH: &str = "plane_fight_save.json";
    /// Rounds to play before exiting
    const ROUNDS: u32 = 3;
    /// Give up on a round after this many simulated seconds
    const ROUND_LIMIT_SECS: f32 = 180.0;
    /// Seconds between autopilot shots
    const FIRE_PERIOD: f32 = 0.4;

    /// Steer toward the nearest incoming enemy, away from the ground
    fn autopilot(world: &World) -> f32 {
        let Some(player) = world.player() else {
            return 0.0;
        };
        let floor = world.settings.ground_height + player.size.y;
        let target_y = world
            .living(ActorKind::Enemy)
            .filter(|e| e.pos.x > player.pos.x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
            .map(|e| e.pos.y)
            .unwrap_or(world.settings.world_height * 0.6)
            .max(floor);
        ((target_y - player.pos.y) / 50.0).clamp(-1.0, 1.0)
    }

    pub fn run() {
        platform::init_logging();
        log::info!("Plane Fight (headless) starting...");

        let settings = Settings::load();
        let rng = SimRng::new(platform::run_seed());
        log::info!("Seed: {}", rng.seed());

        let store = JsonFileStore::new(SAVE_PATH);
        let mut game = Game::new(settings, Recorder::default(), store, rng);
        let mut saved = false;

        for round in 1..=ROUNDS {
            game.on_primary_input();
            let mut elapsed = 0.0;
            let mut since_shot = 0.0;

            while game.phase() == GamePhase::Playing && elapsed < ROUND_LIMIT_SECS {
                let steering = autopilot(game.world());
                game.on_tick(SIM_DT, steering);
                for (a, b) in detect_contacts(game.world()) {
                    game.on_contact_detected(a, b);
                }

                since_shot += SIM_DT;
                if since_shot >= FIRE_PERIOD && game.phase() == GamePhase::Playing {
                    game.on_primary_input();
                    since_shot = 0.0;
                }
                elapsed += SIM_DT;
            }

            let scores = &game.world().scores;
            let explosions = game
                .presenter()
                .calls
                .iter()
                .filter(|c| matches!(c, Call::Effect(..)))
                .count();
            log::info!(
                "Round {}: score {} after {:.1}s, high score {}{} ({} explosions)",
                round,
                scores.score(),
                elapsed,
                scores.high_score(),
                if scores.is_new_high_score() { " (new!)" } else { "" },
                explosions
            );

            if game.phase() != GamePhase::Dead {
                log::warn!("Round {} still running after {:.0}s, stopping", round, elapsed);
                break;
            }
            saved |= scores.is_persisted();

            game.presenter_mut().clear();
            if round < ROUNDS {
                game.on_primary_input();
            }
        }

        if saved {
            log::info!("High score saved to {}", game.store().path().display());
        } else {
            log::warn!("High score was not saved");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds embed the library; there is no standalone entry point
}
