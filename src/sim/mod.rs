//! Simulation core
//!
//! All gameplay logic lives here, free of rendering and platform code:
//! - Fixed timestep only
//! - One seeded RNG per session
//! - Stable iteration order (registry buckets keyed by entity id)
//! - Registry mutations deferred until the current pass completes

pub mod agent;
pub mod agents;
pub mod autopilot;
pub mod body;
pub mod collision;
pub mod registry;
pub mod state;
pub mod steering;
pub mod tick;
pub mod vector;

pub use agent::{Agent, Command, Commands, Ctx};
pub use agents::{Asteroid, Boid, Bullet, Rubble, Ship};
pub use body::{Arena, ClampPolicy, EntityKind, KinematicBody};
pub use collision::{intersect, intersect_any, will_collide};
pub use registry::{Bucket, EntityRegistry};
pub use state::{EntitySnapshot, GameEvent, GamePhase, GameState, dump_file_name};
pub use steering::{FlockingParams, Neighbor, alignment, cohesion, flock, separation, seek};
pub use tick::tick;
pub use vector::{Vector2D, VectorExt};
