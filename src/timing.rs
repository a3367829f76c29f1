//! Fixed-step animation clock and freeze edges.
//!
//! The step is not measured delta time; at the default it assumes ~60Hz.

use crate::params::{Mode, StudioState};

pub const DEFAULT_FRAME_STEP: f32 = 0.016;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    step: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_STEP)
    }
}

impl Clock {
    pub fn new(step: f32) -> Self {
        Self { step }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// One display refresh.
    pub fn tick(&self, state: StudioState) -> StudioState {
        advance(state, self.step)
    }
}

/// Advances cosmic time by `dt` unless frozen or another pattern is bound.
/// The pixelated pattern has no clock; its input frame moves on its own.
pub fn advance(mut state: StudioState, dt: f32) -> StudioState {
    if !state.frozen && state.mode == Mode::Cosmic {
        state.cosmic.time += dt;
    }
    state
}

/// A freeze transition. Only `Captured` snapshots the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreezeEdge {
    Captured,
    Released,
}

/// Sets the frozen flag and reports the edge, if there was one.
pub fn set_frozen(state: &mut StudioState, frozen: bool) -> Option<FreezeEdge> {
    if state.frozen == frozen {
        return None;
    }
    state.frozen = frozen;
    Some(if frozen {
        FreezeEdge::Captured
    } else {
        FreezeEdge::Released
    })
}

pub fn toggle_freeze(state: &mut StudioState) -> FreezeEdge {
    if state.frozen {
        state.frozen = false;
        FreezeEdge::Released
    } else {
        state.frozen = true;
        FreezeEdge::Captured
    }
}

/// Undoes `edge`, e.g. when the capture owed to a `Captured` edge failed.
/// The next toggle then reports `Captured` again.
pub fn revert_freeze(state: &mut StudioState, edge: FreezeEdge) {
    state.frozen = edge == FreezeEdge::Released;
}
