//! Guard table and display names for the motor state machine.
//!
//! One pure function, [`next_state`], evaluated in fixed priority order
//! against the frozen per-tick context. The first guard that holds wins the
//! pass; the engine applies the transition and evaluates again until the
//! state stops moving.
//!
//! ```text
//!            ┌──────────── estop input ────────────┐ (from any state)
//!            ▼                                     │
//!        ESTOPPED ──[released]──▶ IGNITION_OFF ────┤
//!                                  │   │   │
//!                   [key on]───────┘   │   └───[run request]──▶ STARTING_AUTO
//!                      ▼        [start cmd]                        │    │
//!               MANUAL_ON          ▼                       [caught]│    │[timeout]
//!                │  [running] STARTING_USER ──[timeout]──▶ ERROR ◀─┼────┘
//!                ▼                 │ [caught]                ▲     ▼
//!             RUNNING_MANUAL       ▼                 [stall] │  RUNNING_AUTO
//!                              RUNNING_USER ─────────────────┘
//! ```

use super::MotorState;
use super::context::FsmContext;
use crate::error::StartFault;

/// Evaluate the guard table for one stabilization pass.
///
/// Returns the destination of the highest-priority guard that holds, or
/// `None` when the state is stable for this tick's inputs.
pub fn next_state(state: MotorState, ctx: &FsmContext) -> Option<MotorState> {
    use MotorState::*;

    // Safety override: the emergency stop wins over every state-local
    // guard, and while it is held nothing else may fire.
    if ctx.inputs.estop {
        return (state != Estopped).then_some(Estopped);
    }

    match state {
        Estopped => Some(IgnitionOff), // estop released, checked above

        IgnitionOff => {
            if ctx.inputs.ignition {
                Some(IgnitionManualOn)
            } else if ctx.commands.start_now {
                Some(StartingUser)
            } else if ctx.has_run_request {
                Some(StartingAuto)
            } else {
                None
            }
        }

        IgnitionManualOn => {
            if !ctx.inputs.ignition {
                Some(IgnitionOff)
            } else if ctx.is_running {
                Some(RunningManual)
            } else {
                None
            }
        }

        RunningManual => (!ctx.inputs.ignition || !ctx.is_running).then_some(IgnitionOff),

        StartingUser => {
            if ctx.is_running {
                Some(RunningUser)
            } else if ctx.commands.stop_now {
                Some(IgnitionOff)
            } else if ctx.ms_in_state() > ctx.config.start_timeout_ms() {
                Some(Error)
            } else {
                None
            }
        }

        RunningUser => {
            if !ctx.is_running {
                Some(Error)
            } else if ctx.commands.stop_now {
                Some(IgnitionOff)
            } else {
                None
            }
        }

        StartingAuto => {
            if ctx.is_running {
                Some(RunningAuto)
            } else if !ctx.has_run_request {
                Some(IgnitionOff)
            } else if ctx.ms_in_state() > ctx.config.start_timeout_ms() {
                Some(Error)
            } else {
                None
            }
        }

        RunningAuto => {
            if !ctx.is_running {
                Some(Error)
            } else if !ctx.has_run_request {
                Some(IgnitionOff)
            } else {
                None
            }
        }

        Error => {
            if ctx.commands.start_now {
                // The operator may command a start straight out of the
                // error state without clearing it first.
                Some(StartingUser)
            } else if ctx.commands.clear_error {
                Some(IgnitionOff)
            } else if ctx.ms_in_state() > ctx.config.error_timeout_ms() {
                Some(IgnitionOff)
            } else {
                None
            }
        }
    }
}

/// The fault implied by an error transition out of `from`.
///
/// Running states only lose the running signal through a stall; starting
/// states only reach `Error` by exhausting the crank window.
pub(crate) fn fault_leaving(from: MotorState) -> Option<StartFault> {
    match from {
        MotorState::RunningUser | MotorState::RunningAuto => Some(StartFault::Stall),
        MotorState::StartingUser | MotorState::StartingAuto => Some(StartFault::StartTimeout),
        _ => None,
    }
}

/// Operator-facing label for a state, as shown on the device page.
pub fn display_label(state: MotorState) -> &'static str {
    match state {
        MotorState::IgnitionOff => "Off",
        MotorState::Error => "Problem",
        MotorState::Estopped => "E-Stopped",
        MotorState::IgnitionManualOn => "Key On",
        MotorState::RunningManual | MotorState::RunningUser | MotorState::RunningAuto => "Running",
        MotorState::StartingUser | MotorState::StartingAuto => "Starting",
    }
}
