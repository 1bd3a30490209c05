//! Shared mutable context threaded through the state machine.
//!
//! `FsmContext` is the single struct the guard table reads from and the
//! engine's entry/exit actions write to. It contains the conditioned input
//! snapshot, the derived per-tick signals, the command latches, the relay
//! output commands, configuration, and timing. Think of it as the
//! "blackboard" in a blackboard architecture.
//!
//! The snapshot and derived signals are refreshed once per tick *before*
//! stabilization and stay frozen while the guard table runs; only the
//! active state (and the entry/exit bookkeeping that follows it) changes
//! between stabilization passes.

use crate::config::SystemConfig;
use crate::control::sequencer::StartAttempt;

/// Error-record text, sized for a short human-readable sentence.
pub type ErrorString = heapless::String<96>;

// ---------------------------------------------------------------------------
// Input snapshot (read-only to the guard table; written by the conditioner)
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of the three sense inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Emergency-stop loop is open (operator hit the mushroom).
    pub estop: bool,
    /// Ignition/key circuit is live.
    pub ignition: bool,
    /// Alternator no-charge lamp circuit is live (engine NOT turning).
    pub no_charge: bool,
}

// ---------------------------------------------------------------------------
// Relay commands (written by the service each tick; applied by the mapper)
// ---------------------------------------------------------------------------

/// Logical output commands for the three relays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayCommands {
    pub ignition: bool,
    pub starter: bool,
    pub horn: bool,
}

impl RelayCommands {
    /// Every relay released — safe default.
    pub fn all_off() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Command latches (written by the UI/command source, consumed once per tick)
// ---------------------------------------------------------------------------

/// Edge-triggered operator commands.
///
/// Set by [`AppService::handle_command`](crate::app::service::AppService),
/// read by the guard table for the duration of one stabilization loop, then
/// cleared by the service. A command observed once never re-fires on the
/// next tick unless the source re-asserts it.
///
/// Invariant, maintained by the latch owner: `start_now` and `stop_now`
/// are never both set. The guard table relies on this to stabilize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandLatches {
    pub start_now: bool,
    pub stop_now: bool,
    pub clear_error: bool,
}

impl CommandLatches {
    /// Reset every latch. Called by the service after stabilization.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context consumed by the guard table and entry/exit actions.
pub struct FsmContext {
    // -- Timing --
    /// Monotonic time of the current tick (milliseconds since boot).
    pub now_ms: u64,
    /// Monotonic time at which the current state was entered.
    pub state_entered_ms: u64,

    // -- Per-tick inputs (frozen during stabilization) --
    /// Latest conditioned sense inputs.
    pub inputs: InputSnapshot,
    /// Grace-debounced running signal for this tick.
    pub is_running: bool,
    /// A remote run request is active this tick.
    pub has_run_request: bool,
    /// Pending operator commands.
    pub commands: CommandLatches,

    // -- Outputs --
    /// Relay commands computed for this tick.
    pub outputs: RelayCommands,

    // -- Configuration --
    pub config: SystemConfig,

    // -- State-machine bookkeeping (owned by entry/exit actions) --
    /// Live while and only while a starting state is active.
    pub start_attempt: Option<StartAttempt>,
    /// Error record; set on entry to `Error`, cleared on exit.
    pub last_error: Option<ErrorString>,
    /// Message queued for the notification sink by the `Error` entry
    /// action; taken by the service after stabilization.
    pub pending_notification: Option<ErrorString>,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            now_ms: 0,
            state_entered_ms: 0,
            inputs: InputSnapshot::default(),
            is_running: false,
            has_run_request: false,
            commands: CommandLatches::default(),
            outputs: RelayCommands::all_off(),
            config,
            start_attempt: None,
            last_error: None,
            pending_notification: None,
        }
    }

    /// Milliseconds the machine has been resident in the current state.
    pub fn ms_in_state(&self) -> u64 {
        self.now_ms.saturating_sub(self.state_entered_ms)
    }
}
