//! Simulation tick
//!
//! Per tick, strictly in order:
//! 1. Session controls (mute, dump, restart after game over)
//! 2. Update pass: every agent over a snapshot of ids, then apply commands
//! 3. Ship ↔ rock pass
//! 4. Rock ↔ bullet pass, kill counting and replacement asteroids
//! 5. Periodic respawn
//! 6. Win/loss evaluation, then advance time

use std::collections::BTreeSet;

use uuid::Uuid;

use super::autopilot;
use super::body::{EntityKind, KinematicBody};
use super::collision::{intersect, intersect_any};
use super::registry::Bucket;
use super::state::{GameEvent, GameState};
use crate::input::TickInput;

/// Advance the simulation by one fixed step of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) {
    let prev = std::mem::replace(&mut state.prev_input, input.clone());

    if input.mute_toggle && !prev.mute_toggle {
        state.toggle_mute();
    }
    if input.dump && !prev.dump {
        log::info!("Dump requested at {:.2}s", state.clock);
        state.events.push(GameEvent::DumpRequested);
    }

    if state.phase.is_over() {
        if input.restart && !prev.restart {
            log::info!("Restarting");
            state.restart();
        }
        state.clock += dt;
        return;
    }

    let controls = flight_controls(state, input);

    update_pass(state, &controls);
    ship_pass(state);
    bullet_pass(state);
    periodic_respawn(state);

    evaluate_game_over(state);
    if !state.phase.is_over() {
        state.elapsed += dt;
    }
    state.clock += dt;
}

/// Controls the ship will see: the player's, or the autopilot's
fn flight_controls(state: &GameState, input: &TickInput) -> TickInput {
    if !input.autopilot {
        return input.flight_controls();
    }
    match state.ship() {
        Some(ship) => TickInput {
            quit: input.quit,
            ..autopilot::pilot(ship.body(), &state.registry, state.settings.collision_precision)
        },
        None => TickInput::default(),
    }
}

fn update_pass(state: &mut GameState, input: &TickInput) {
    for id in state.registry.ids() {
        state.with_agent(id, input, |agent, ctx| agent.update(ctx));
    }
    state.apply_commands();
}

/// Ships touching any rock explode
fn ship_pass(state: &mut GameState) {
    let precision = state.settings.collision_precision;
    let doomed: Vec<Uuid> = state
        .registry
        .bodies(Bucket::Ships)
        .filter(|ship| intersect_any(ship, state.registry.bodies(Bucket::Rocks), precision).is_some())
        .map(KinematicBody::id)
        .collect();

    let input = TickInput::default();
    for id in doomed {
        log::debug!("Ship {} hit a rock", id);
        state.with_agent(id, &input, |agent, ctx| agent.explode(ctx));
    }
    state.apply_commands();
}

/// Each rock is destroyed by the first unspent bullet touching it; a bullet
/// is spent on at most one rock
fn bullet_pass(state: &mut GameState) {
    let precision = state.settings.collision_precision;
    let mut spent = BTreeSet::new();
    let mut hits: Vec<(Uuid, Uuid)> = Vec::new();

    for rock in state.registry.bodies(Bucket::Rocks) {
        let hit = state
            .registry
            .bodies(Bucket::Bullets)
            .filter(|bullet| !spent.contains(&bullet.id()))
            .find(|bullet| intersect(rock, bullet, precision));
        if let Some(bullet) = hit {
            spent.insert(bullet.id());
            hits.push((rock.id(), bullet.id()));
        }
    }

    let input = TickInput::default();
    for (rock, bullet) in hits {
        state.with_agent(rock, &input, |agent, ctx| agent.explode(ctx));
        state.with_agent(bullet, &input, |agent, ctx| agent.explode(ctx));
    }

    let removed = state.apply_commands();
    for (id, kind) in removed {
        if !kind.is_rock() {
            continue;
        }
        state.kills += 1;
        log::debug!("Destroyed {} {}", kind, id);
        if kind == EntityKind::Asteroid && state.settings.respawn_enabled() {
            state.add_asteroid();
        }
    }
}

/// One more asteroid each time elapsed / interval outgrows the population
fn periodic_respawn(state: &mut GameState) {
    let Some(interval) = state.settings.asteroid_respawn_interval else {
        return;
    };
    if interval <= 0.0 {
        return;
    }
    let due = (state.elapsed / interval).floor() as usize;
    if due > state.asteroid_count() {
        let id = state.add_asteroid();
        log::debug!("Periodic asteroid {}", id);
    }
}

fn evaluate_game_over(state: &mut GameState) {
    if state.registry.count(EntityKind::Ship) == 0 {
        state.finish(false);
    } else if !state.settings.respawn_enabled() && state.registry.bucket_len(Bucket::Rocks) == 0 {
        state.finish(true);
    }
}
