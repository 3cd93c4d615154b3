//! Per-kind behaviors
//!
//! | Kind | Update | On explode |
//! |---|---|---|
//! | Ship | input-driven rotate/thrust/fire | unregister, large bang |
//! | Bullet | ballistic flight, TTL countdown | unregister |
//! | Asteroid | drift and spin | unregister, split into rubble |
//! | Rubble | faster drift and spin | unregister |
//! | Boid | flocking | unregister |

mod asteroid;
mod boid;
mod bullet;
mod rubble;
mod ship;

pub use asteroid::Asteroid;
pub use boid::Boid;
pub use bullet::Bullet;
pub use rubble::Rubble;
pub use ship::Ship;

use uuid::Uuid;

use super::body::{EntityKind, KinematicBody};
use super::vector::Vector2D;
use crate::heading_vector;

/// Frictionless body moving at constant speed along `heading`
fn drifting_body(
    id: Uuid,
    kind: EntityKind,
    position: Vector2D,
    heading: f64,
    speed: f64,
    size: f64,
) -> KinematicBody {
    KinematicBody::new(id, kind, position, size, size)
        .with_friction(0.0)
        .with_max_velocity(speed)
        .with_velocity(heading_vector(heading) * speed)
        .with_orientation(heading)
}

#[cfg(test)]
pub(crate) mod testing {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use crate::assets::SpriteSheet;
    use crate::input::TickInput;
    use crate::settings::Settings;
    use crate::sim::agent::{Agent, Command, Commands, Ctx};
    use crate::sim::body::Arena;
    use crate::sim::registry::EntityRegistry;

    /// Owns everything a [`Ctx`] borrows
    pub struct Harness {
        pub registry: EntityRegistry,
        pub rng: Pcg32,
        pub commands: Commands,
        pub settings: Settings,
        pub sprites: SpriteSheet,
        pub input: TickInput,
    }

    impl Harness {
        pub fn new() -> Self {
            Self {
                registry: EntityRegistry::new(),
                rng: Pcg32::seed_from_u64(42),
                commands: Commands::new(),
                settings: Settings::default(),
                sprites: SpriteSheet::default(),
                input: TickInput::default(),
            }
        }

        pub fn ctx(&mut self, now: f64) -> Ctx<'_> {
            Ctx {
                registry: &self.registry,
                input: &self.input,
                rng: &mut self.rng,
                commands: &mut self.commands,
                settings: &self.settings,
                sprites: &self.sprites,
                arena: Arena::new(self.settings.screen_width, self.settings.screen_height),
                now,
            }
        }

        pub fn update(&mut self, agent: &mut dyn Agent, now: f64) {
            let mut ctx = self.ctx(now);
            agent.update(&mut ctx);
        }

        pub fn explode(&mut self, agent: &mut dyn Agent) {
            let mut ctx = self.ctx(0.0);
            agent.explode(&mut ctx);
        }

        pub fn drain(&mut self) -> Vec<Command> {
            self.commands.drain().collect()
        }
    }

    pub fn spawned(commands: &[Command]) -> Vec<&(dyn Agent + 'static)> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::Spawn(agent) => Some(agent.as_ref()),
                _ => None,
            })
            .collect()
    }
}
