//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (remote UI,
//! serial console, a supervising system) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.
//! The three operator commands are edge-triggered: the service latches
//! them for exactly one control tick and then clears them, so a command
//! acts once unless the source re-asserts it.

use super::run_request::ReasonString;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Operator pressed the start control.
    StartNow,

    /// Operator pressed the stop control.
    StopNow,

    /// Operator acknowledged and cleared the error state.
    ClearError,

    /// The remote run-request source reported a new value (`None` means
    /// the source currently wants nothing — subject to the latch's grace
    /// window, not acted on immediately).
    SetRunRequest(Option<ReasonString>),
}
