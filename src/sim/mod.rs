//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Side effects go through `Presenter`
//! - Randomness comes from an injected `UniformSource`
//! - Stable iteration order (by actor ID)

pub mod actor;
pub mod category;
pub mod collision;
pub mod contact;
pub mod spawn;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorId, Motion};
pub use category::{ActorKind, CollisionCategory, ContactProfile, reports_contact};
pub use collision::detect_contacts;
pub use contact::{ContactOutcome, resolve_contact};
pub use spawn::{SimRng, SpawnScheduler, SpawnTimer, UniformSource};
pub use state::{GamePhase, World};
pub use tick::{TickInput, tick};

#[cfg(test)]
pub(crate) mod testing {
    use super::UniformSource;

    /// Always returns the same fraction of the requested range
    pub struct FixedUniform(pub f32);

    impl UniformSource for FixedUniform {
        fn uniform(&mut self, min: f32, max: f32) -> f32 {
            if max > min { min + self.0 * (max - min) } else { min }
        }
    }
}
