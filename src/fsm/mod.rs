//! Motor state machine engine.
//!
//! The engine owns the active [`MotorState`] and drives it to a fixpoint
//! each control tick: the guard table in [`states`] is evaluated against
//! the frozen tick context, at most one transition is applied per pass, and
//! evaluation repeats until a pass produces no transition. Chained
//! transitions therefore complete within a single tick (key detected and a
//! pending start command can both act before outputs are computed), and
//! callers never observe an intermediate state.
//!
//! A well-formed guard table cannot cycle while its guards hold, so the
//! loop is bounded by [`MAX_STABILIZE_PASSES`]; exceeding the cap is a
//! guard-table defect, not a runtime condition to recover from.
//!
//! Entry/exit actions live in [`Fsm::transition`]: starting states own the
//! [`StartAttempt`] lifecycle, and the error state owns the error record
//! and the (exactly once per episode) user notification.

pub mod context;
pub mod states;

use context::{ErrorString, FsmContext};
use log::{error, info, warn};

use crate::control::sequencer::StartAttempt;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all motor controller states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotorState {
    /// Everything released; the resting state.
    IgnitionOff,
    /// A start or run failed; waits for a clear, a new start, or the
    /// self-clear timeout.
    Error,
    /// Emergency stop held; pinned until the input releases.
    Estopped,
    /// Operator turned the physical key on.
    IgnitionManualOn,
    /// Engine running under local key control — no remote authority.
    RunningManual,
    /// Crank sequence initiated by an operator command.
    StartingUser,
    /// Running after an operator-commanded start.
    RunningUser,
    /// Crank sequence initiated by a remote run request.
    StartingAuto,
    /// Running under a remote run request.
    RunningAuto,
}

impl MotorState {
    /// All states, for exhaustive sweeps in tests.
    pub const ALL: [Self; 9] = [
        Self::IgnitionOff,
        Self::Error,
        Self::Estopped,
        Self::IgnitionManualOn,
        Self::RunningManual,
        Self::StartingUser,
        Self::RunningUser,
        Self::StartingAuto,
        Self::RunningAuto,
    ];

    /// A crank sequence is in progress.
    pub fn is_starting(self) -> bool {
        matches!(self, Self::StartingUser | Self::StartingAuto)
    }

    /// The engine is (believed to be) turning.
    pub fn is_running(self) -> bool {
        matches!(self, Self::RunningManual | Self::RunningUser | Self::RunningAuto)
    }

    /// Local key control — remote commands have no authority.
    pub fn is_manual(self) -> bool {
        matches!(self, Self::IgnitionManualOn | Self::RunningManual)
    }

    /// Stable log-facing name.
    pub fn name(self) -> &'static str {
        match self {
            Self::IgnitionOff => "ignition_off",
            Self::Error => "error",
            Self::Estopped => "estopped",
            Self::IgnitionManualOn => "ignition_manual_on",
            Self::RunningManual => "running_manual",
            Self::StartingUser => "starting_user",
            Self::RunningUser => "running_user",
            Self::StartingAuto => "starting_auto",
            Self::RunningAuto => "running_auto",
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Hard cap on stabilization passes per tick. The longest legitimate chain
/// (estop release → off → key detected → running detected) is three
/// transitions; anything near the cap means the guard table cycles.
pub const MAX_STABILIZE_PASSES: u32 = 20;

/// The state machine engine. Owns the active state; all other mutable
/// control data lives in the [`FsmContext`] blackboard.
pub struct Fsm {
    current: MotorState,
}

impl Fsm {
    /// Construct a new engine starting in `initial`.
    pub fn new(initial: MotorState) -> Self {
        Self { current: initial }
    }

    /// Log the starting state and anchor its residency clock.
    /// Call once after construction, before the first tick.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        ctx.state_entered_ms = ctx.now_ms;
        info!("fsm starting in state: {}", self.current.name());
    }

    /// The current state's identity.
    pub fn current_state(&self) -> MotorState {
        self.current
    }

    /// Drive the state to a fixpoint for this tick's context.
    ///
    /// Returns the number of transitions applied. Exceeding
    /// [`MAX_STABILIZE_PASSES`] indicates a defective guard table: the loop
    /// is abandoned at the cap (panicking in debug builds) rather than spun
    /// forever.
    pub fn stabilize(&mut self, ctx: &mut FsmContext) -> u32 {
        for pass in 0..MAX_STABILIZE_PASSES {
            match states::next_state(self.current, ctx) {
                Some(next) => self.transition(next, ctx),
                None => return pass,
            }
        }
        debug_assert!(
            false,
            "guard table failed to stabilize within {MAX_STABILIZE_PASSES} passes"
        );
        error!(
            "fsm: guard table failed to stabilize within {} passes, holding {}",
            MAX_STABILIZE_PASSES,
            self.current.name()
        );
        MAX_STABILIZE_PASSES
    }

    /// Force the machine into the error state with an explicit message.
    ///
    /// The error-trigger action reachable from any state; used for faults
    /// detected outside the guard table (e.g. a platform failure reported
    /// by the host). No-op if the machine is already in `Error`.
    pub fn raise_error(&mut self, ctx: &mut FsmContext, message: &str) {
        if self.current == MotorState::Error {
            return;
        }
        warn!("fsm: error raised externally: {message}");
        self.transition_with_message(MotorState::Error, ctx, message);
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: MotorState, ctx: &mut FsmContext) {
        if next == MotorState::Error {
            let message = states::fault_leaving(self.current)
                .map_or("Error occurred", crate::error::StartFault::message);
            self.transition_with_message(next, ctx, message);
        } else {
            self.transition_with_message(next, ctx, "");
        }
    }

    fn transition_with_message(&mut self, next: MotorState, ctx: &mut FsmContext, message: &str) {
        info!("fsm transition: {} -> {}", self.current.name(), next.name());

        // Exit actions
        if self.current.is_starting() && !next.is_starting() {
            ctx.start_attempt = None;
        }
        if self.current == MotorState::Error {
            ctx.last_error = None;
        }

        self.current = next;
        ctx.state_entered_ms = ctx.now_ms;

        // Entry actions
        match next {
            MotorState::StartingUser | MotorState::StartingAuto => {
                if ctx.start_attempt.is_none() {
                    ctx.start_attempt = Some(StartAttempt::new(ctx.now_ms));
                }
            }
            MotorState::Error => {
                let mut text = ErrorString::new();
                // Overlength messages are truncated, not rejected.
                if text.push_str(message).is_err() {
                    for ch in message.chars() {
                        if text.push(ch).is_err() {
                            break;
                        }
                    }
                }
                ctx.last_error = Some(text.clone());
                ctx.pending_notification = Some(text);
            }
            _ => {}
        }
    }
}
