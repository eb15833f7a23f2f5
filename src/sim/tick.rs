//! Simulation tick
//!
//! One call per display refresh. Order within a tick is fixed: consume input, pick the
//! lock state, integrate motion, then run scheduled tasks. Feedback reads the result.

use glam::Vec2;

use super::pick::{PickTransition, Wear};
use super::state::{GameEvent, GameState, LockState};
use super::tween::Delay;
use crate::consts::*;
use crate::settings::Tuning;
use crate::{clamp_cylinder_angle, clamp_pick_angle};

/// Input consumed by a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Primary button or force key held
    pub apply_force: bool,
    /// Pointer samples since the last tick, in pixels, oldest first
    pub pointer_samples: Vec<Vec2>,
    /// Pointer left the interactive surface
    pub pointer_left: bool,
    /// Debug overlay toggle pressed
    pub toggle_debug: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    state.time_ticks += 1;
    state.elapsed += dt;

    consume_input(state, input);

    let next = next_lock_state(state);
    if next != state.lock_state {
        log::debug!("Lock state {:?} -> {:?}", state.lock_state, next);
        state.events.push(GameEvent::LockStateChanged {
            from: state.lock_state,
            to: next,
        });
        state.lock_state = next;
    }

    match next {
        LockState::Reset => {
            reset_lock(state, dt);
            state.pick.angle = state.pointer.target_angle();
        }
        LockState::Jam => {
            jam_wiggle(state, dt);
            reduce_pick_life(state, dt);
        }
        LockState::Turn => turn_lock(state, dt),
        LockState::Unlock => on_unlock(state),
    }

    state.pointer.camera.follow(state.pointer.ndc);

    run_scheduled(state, dt);
}

/// Decide the lock state, highest priority first
pub fn next_lock_state(state: &GameState) -> LockState {
    if !state.apply_force {
        return LockState::Reset;
    }

    if !state.pick.is_in_use() {
        return LockState::Reset;
    }

    if !state.lock.contains(state.pick.angle) {
        return LockState::Jam;
    }

    if state.cylinder_angle == CYLINDER_OPEN {
        LockState::Unlock
    } else {
        LockState::Turn
    }
}

/// Sum of three sines at the jam frequencies, shifted by `phase`
pub fn jam_offset(elapsed: f32, phase: f32, amplitude: f32, damping: f32) -> f32 {
    JAM_FREQUENCIES
        .iter()
        .map(|f| (elapsed * f + phase).sin() * amplitude)
        .sum::<f32>()
        * damping
}

/// Wiggle added over one tick of `dt`; the same per second at any frame rate
fn jam_step(elapsed: f32, phase: f32, tuning: &Tuning, dt: f32) -> f32 {
    jam_offset(elapsed, phase, tuning.jam_amplitude, tuning.jam_damping) * dt * JAM_REFERENCE_HZ
}

fn consume_input(state: &mut GameState, input: &TickInput) {
    if state.input_enabled {
        for sample in &input.pointer_samples {
            state.pointer.sample(sample.x, sample.y);
        }
        if input.pointer_left {
            state.pointer.leave();
        }
        state.apply_force = input.apply_force;

        if input.toggle_debug {
            state.debug_visible = !state.debug_visible;
            state.events.push(GameEvent::DebugToggled {
                visible: state.debug_visible,
            });
        }
    } else {
        state.apply_force = false;
    }

    state.pointer_delta = state.pointer.take_delta();
}

fn reset_lock(state: &mut GameState, dt: f32) {
    state.cylinder_angle = clamp_cylinder_angle(state.cylinder_angle + dt * state.tuning.reset_speed);
}

fn turn_lock(state: &mut GameState, dt: f32) {
    state.cylinder_angle = clamp_cylinder_angle(state.cylinder_angle - dt * state.tuning.turn_speed);
}

fn jam_wiggle(state: &mut GameState, dt: f32) {
    let t = &state.tuning;
    let lock = jam_step(state.elapsed, 0.0, t, dt);
    let pick = jam_step(state.elapsed, t.jam_phase_offset, t, dt);

    state.cylinder_angle = clamp_cylinder_angle(state.cylinder_angle + lock);
    state.pick.angle = clamp_pick_angle(state.pick.angle + pick);
}

fn reduce_pick_life(state: &mut GameState, dt: f32) {
    if state.pick.wear(dt) != Wear::Broke {
        return;
    }

    state.pick.fall(&state.tuning);
    state.lockpicks_remaining = state.lockpicks_remaining.saturating_sub(1);
    state.events.push(GameEvent::PickBroke {
        remaining: state.lockpicks_remaining,
    });
    log::info!("Pick broke, {} left", state.lockpicks_remaining);

    if state.lockpicks_remaining == 0 {
        state.game_over = true;
        state.events.push(GameEvent::GameOver);
        log::info!(
            "Game over: {} points, {} locks",
            state.points,
            state.completed_locks.len()
        );
    }

    // No interaction until the replacement pick is in
    state.suspend_input();
}

fn on_unlock(state: &mut GameState) {
    // Already waiting on the next lock
    if state.unlock_delay.is_some() {
        return;
    }

    state.points += u64::from(state.lock.points);
    state.events.push(GameEvent::Unlocked {
        level: state.lock.level,
        points: state.lock.points,
    });
    log::info!(
        "Unlocked {} lock for {} points ({} total)",
        state.lock.level.as_str(),
        state.lock.points,
        state.points
    );

    if state.debug_visible {
        state.debug_visible = false;
        state.events.push(GameEvent::DebugToggled { visible: false });
    }

    state.suspend_input();
    state.unlock_delay = Some(Delay::new(state.tuning.unlock_delay));
}

fn finish_unlock(state: &mut GameState) {
    if state.game_over {
        return;
    }
    state.completed_locks.push(state.lock.level);
    state.next_lock();
    state.cylinder_angle = CYLINDER_LOCKED;
    if state.pick.is_in_use() {
        state.resume_input();
    }
}

fn run_scheduled(state: &mut GameState, dt: f32) {
    if let Some(delay) = state.unlock_delay.as_mut() {
        if delay.advance(dt) {
            state.unlock_delay = None;
            finish_unlock(state);
        }
    }

    match state.pick.animate(dt) {
        Some(PickTransition::Fallen) => {
            if !state.game_over {
                state.pick.enter(&state.tuning);
            }
        }
        Some(PickTransition::Entered) => {
            state.events.push(GameEvent::PickEntered);
            if state.unlock_delay.is_none() {
                state.resume_input();
            }
        }
        None => {}
    }
}
