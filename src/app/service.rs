//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the state machine, the input conditioner, the
//! derived signals, and the relay bank. It exposes a clean,
//! hardware-agnostic API. All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!                  ┌──────────────────────────────┐ ──▶ EventSink
//!  PlatformPort ◀─▶│          AppService          │ ──▶ NotificationPort
//!                  │  conditioner · fsm · relays  │
//!                  └──────────────────────────────┘
//! ```
//!
//! Tick order is fixed: read and condition inputs → refresh the derived
//! running/run-request signals → stabilize the state machine → consume the
//! command latches → compute and apply relay outputs → emit events. A tick
//! either runs to completion or is skipped whole by the caller; there is
//! no suspension point inside.

use log::{debug, info};

use crate::config::SystemConfig;
use crate::drivers::relays::RelayBank;
use crate::fsm::context::{FsmContext, RelayCommands};
use crate::fsm::{Fsm, MotorState, states};
use crate::sensors::InputConditioner;
use crate::sensors::running::RunningSignal;

use super::commands::AppCommand;
use super::events::{AppEvent, StatusData};
use super::ports::{EventSink, NotificationPort, PlatformPort};
use super::run_request::{ReasonString, RunRequestLatch};
use super::status::StatusReport;

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    conditioner: InputConditioner,
    running: RunningSignal,
    run_latch: RunRequestLatch,
    relays: RelayBank,
    /// Latest value reported by the run-request source, fed into the
    /// latch each tick.
    reported_reason: Option<ReasonString>,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the state machine — call [`start`](Self::start)
    /// next.
    pub fn new(config: SystemConfig) -> Self {
        let conditioner = InputConditioner::new(&config);
        let running = RunningSignal::new(&config);
        let run_latch = RunRequestLatch::new(&config);
        let relays = RelayBank::new(&config);
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(MotorState::IgnitionOff);

        Self {
            fsm,
            ctx,
            conditioner,
            running,
            run_latch,
            relays,
            reported_reason: None,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the state machine in its resting state.
    pub fn start(&mut self, now_ms: u64, sink: &mut impl EventSink) {
        self.ctx.now_ms = now_ms;
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: condition inputs → stabilize the state
    /// machine → drive relays.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut impl PlatformPort,
        sink: &mut impl EventSink,
        notifier: &mut impl NotificationPort,
    ) {
        self.tick_count += 1;
        let prev_state = self.fsm.current_state();
        self.ctx.now_ms = now_ms;

        // 1. Read and condition the sense inputs.
        self.ctx.inputs = self.conditioner.read(hw);

        // 2. Derived signals, frozen for the rest of the tick.
        self.ctx.is_running = self.running.update(&self.ctx.inputs, now_ms);
        self.ctx.has_run_request = self
            .run_latch
            .resolve(self.reported_reason.as_deref(), now_ms)
            .is_some();

        // 3. Stabilize across chained guarded transitions.
        let passes = self.fsm.stabilize(&mut self.ctx);
        debug!(
            "tick {}: state {} after {} transition(s)",
            self.tick_count,
            self.fsm.current_state().name(),
            passes
        );

        // 4. The command latches were visible for exactly this tick.
        self.ctx.commands.clear();

        // 5. Deliver the error notification queued by the entry action.
        if let Some(message) = self.ctx.pending_notification.take() {
            notifier.notify(&message);
            sink.emit(&AppEvent::ErrorRaised(message));
        }

        // 6. Compute and apply relay outputs for the settled state.
        self.ctx.outputs = self.compute_outputs(now_ms);
        self.relays.apply(hw, &self.ctx.outputs);

        // 7. Emit the net state change, if any.
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            if prev_state == MotorState::Error {
                sink.emit(&AppEvent::ErrorCleared);
            }
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (from the remote UI, serial, or a
    /// supervising system). Operator commands latch until the next tick
    /// consumes them.
    pub fn handle_command(&mut self, cmd: AppCommand) {
        match cmd {
            AppCommand::StartNow => {
                info!("command: start now");
                // The two motion commands are mutually exclusive; the later
                // one wins. Both latched at once would let the guard table
                // cycle through off -> starting -> running -> off forever.
                self.ctx.commands.start_now = true;
                self.ctx.commands.stop_now = false;
            }
            AppCommand::StopNow => {
                info!("command: stop now");
                self.ctx.commands.stop_now = true;
                self.ctx.commands.start_now = false;
            }
            AppCommand::ClearError => {
                info!("command: clear error");
                self.ctx.commands.clear_error = true;
            }
            AppCommand::SetRunRequest(reason) => {
                if reason.as_deref() != self.reported_reason.as_deref() {
                    info!("run request source now reports {:?}", reason.as_deref());
                }
                self.reported_reason = reason;
            }
        }
    }

    /// Force the controller into the error state with an explicit message
    /// (platform faults detected outside the guard table). The
    /// notification is delivered on the next tick.
    pub fn raise_error(&mut self, message: &str) {
        self.fsm.raise_error(&mut self.ctx, message);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current state.
    pub fn state(&self) -> MotorState {
        self.fsm.current_state()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Stored error message while in the error state.
    pub fn last_error(&self) -> Option<&str> {
        self.ctx.last_error.as_deref()
    }

    /// Relay commands applied on the last tick.
    pub fn outputs(&self) -> RelayCommands {
        self.ctx.outputs
    }

    /// Derive the operator page for the current state.
    pub fn status(&self) -> StatusReport {
        StatusReport::derive(
            self.fsm.current_state(),
            self.ctx.inputs.ignition,
            self.ctx.is_running,
            self.run_latch.current().cloned(),
            self.ctx.last_error.clone(),
        )
    }

    /// Build a status snapshot for the periodic event.
    pub fn build_status(&self) -> StatusData {
        StatusData {
            state: self.fsm.current_state(),
            label: states::display_label(self.fsm.current_state()),
            ignition_on: self.ctx.inputs.ignition,
            is_running: self.ctx.is_running,
            outputs: self.ctx.outputs,
            run_reason: self.run_latch.current().cloned(),
            error: self.ctx.last_error.clone(),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// Relay outputs for the settled state: starting states follow the
    /// crank sequencer, running states hold ignition, everything else
    /// releases all relays (manual running is powered by the physical
    /// key, not by us).
    fn compute_outputs(&self, now_ms: u64) -> RelayCommands {
        match self.fsm.current_state() {
            state if state.is_starting() => {
                self.ctx
                    .start_attempt
                    .map_or_else(RelayCommands::all_off, |attempt| RelayCommands {
                        ignition: attempt.ignition_on(now_ms),
                        starter: attempt.starter_on(now_ms),
                        horn: attempt.horn_on(now_ms),
                    })
            }
            MotorState::RunningUser | MotorState::RunningAuto => RelayCommands {
                ignition: true,
                starter: false,
                horn: false,
            },
            _ => RelayCommands::all_off(),
        }
    }
}
