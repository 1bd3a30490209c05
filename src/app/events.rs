//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them — log to serial, publish to a remote
//! channel, refresh a display page, etc.
//!
//! Chained same-tick transitions collapse into one `StateChanged`: callers
//! only ever see the state the machine settled in.

use super::run_request::ReasonString;
use crate::fsm::MotorState;
use crate::fsm::context::{ErrorString, RelayCommands};

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic status snapshot.
    Status(StatusData),

    /// The state machine settled in a different state than it started
    /// the tick in.
    StateChanged { from: MotorState, to: MotorState },

    /// The controller entered the error state; carries the stored message.
    ErrorRaised(ErrorString),

    /// The controller left the error state.
    ErrorCleared,

    /// The application service has started (carries initial state).
    Started(MotorState),
}

/// A point-in-time status snapshot suitable for logging or transmission.
#[derive(Debug, Clone)]
pub struct StatusData {
    pub state: MotorState,
    /// Operator-facing state label.
    pub label: &'static str,
    /// Raw ignition sense input.
    pub ignition_on: bool,
    /// Debounced running signal.
    pub is_running: bool,
    /// Relay commands currently applied.
    pub outputs: RelayCommands,
    /// Active remote run-request reason, if any.
    pub run_reason: Option<ReasonString>,
    /// Stored error message while in the error state.
    pub error: Option<ErrorString>,
}
