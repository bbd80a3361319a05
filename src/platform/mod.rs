//! Platform abstraction layer
//!
//! Handles browser/native differences for logging and seeding.

/// Environment variable pinning the RNG seed (native)
pub const SEED_ENV: &str = "PLANE_FIGHT_SEED";

/// Install the logger for this platform
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Seed for a new run: `$PLANE_FIGHT_SEED` if set and valid, else random
pub fn run_seed() -> u64 {
    #[cfg(not(target_arch = "wasm32"))]
    if let Ok(raw) = std::env::var(SEED_ENV) {
        match raw.trim().parse() {
            Ok(seed) => return seed,
            Err(_) => log::warn!("Ignoring invalid {}={:?}", SEED_ENV, raw),
        }
    }
    rand::random()
}
