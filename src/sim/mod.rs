//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Single writer: everything mutates inside `tick`
//! - No rendering, audio or platform dependencies

pub mod lock;
pub mod pick;
pub mod pointer;
pub mod state;
pub mod tick;
pub mod tween;

pub use lock::{Lock, LockLevel};
pub use pick::{Pick, PickState, PickTransition, Wear};
pub use pointer::{CameraRig, PointerMapper, Viewport};
pub use state::{GameEvent, GameState, LockState};
pub use tick::{TickInput, jam_offset, next_lock_state, tick};
pub use tween::{Delay, Easing, Step, Tween};
