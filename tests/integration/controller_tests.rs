//! End-to-end scenarios for the controller: conditioned inputs in, relay
//! writes out, with the state machine and sequencer in between.
//!
//! These run on the host and drive [`AppService`] tick by tick with an
//! explicit clock, so every grace window and timeout is exercised at its
//! exact boundary.

use crate::mock_hw::{MockIo, RecordingNotifier, RecordingSink};

use gensentry::app::commands::AppCommand;
use gensentry::app::run_request::reason;
use gensentry::app::service::AppService;
use gensentry::config::SystemConfig;
use gensentry::fsm::MotorState;

/// Test rig: service + mock ports + explicit clock.
struct Rig {
    app: AppService,
    io: MockIo,
    sink: RecordingSink,
    notifier: RecordingNotifier,
}

impl Rig {
    fn new() -> Self {
        let mut rig = Self {
            app: AppService::new(SystemConfig::default()),
            io: MockIo::new(),
            sink: RecordingSink::new(),
            notifier: RecordingNotifier::new(),
        };
        rig.app.start(0, &mut rig.sink);
        rig
    }

    fn tick_at(&mut self, now_ms: u64) {
        self.app
            .tick(now_ms, &mut self.io, &mut self.sink, &mut self.notifier);
    }
}

// ── Estop dominance ───────────────────────────────────────────

#[test]
fn estop_preempts_idle_and_blocks_commands() {
    let mut rig = Rig::new();

    rig.io.set_estop(true);
    rig.tick_at(250);
    assert_eq!(rig.app.state(), MotorState::Estopped);

    // Commands and run requests are ignored while the loop is open.
    rig.app.handle_command(AppCommand::StartNow);
    rig.app
        .handle_command(AppCommand::SetRunRequest(Some(reason("tank low"))));
    rig.tick_at(500);
    assert_eq!(rig.app.state(), MotorState::Estopped);
    assert!(rig.io.all_relays_released());

    let status = rig.app.status();
    assert_eq!(status.label, "E-Stopped");
    assert!(status.estop_warning);
    assert!(!status.show_start && !status.show_stop);
}

#[test]
fn estop_mid_crank_releases_everything() {
    let mut rig = Rig::new();

    rig.app.handle_command(AppCommand::StartNow);
    rig.tick_at(250);
    assert_eq!(rig.app.state(), MotorState::StartingUser);
    assert!(rig.io.horn_relay(), "horn leads the crank sequence");

    rig.io.set_estop(true);
    rig.tick_at(500);
    assert_eq!(rig.app.state(), MotorState::Estopped);
    assert!(rig.io.all_relays_released());

    // Release drops back to off, not into the interrupted crank.
    rig.io.set_estop(false);
    rig.tick_at(750);
    assert_eq!(rig.app.state(), MotorState::IgnitionOff);
}

// ── Manual (key) operation ────────────────────────────────────

#[test]
fn manual_key_flow_tracks_the_operator() {
    let mut rig = Rig::new();

    // Key on, engine not yet turning: the no-charge lamp is lit.
    rig.io.set_ignition_sense(true);
    rig.io.set_no_charge_sense(true);
    rig.tick_at(250);
    assert_eq!(rig.app.state(), MotorState::IgnitionManualOn);
    assert_eq!(rig.app.status().label, "Key On");
    assert!(rig.app.status().manual_mode_warning);
    assert!(rig.io.all_relays_released(), "manual mode drives nothing");

    // Operator cranks by hand; charge appears at t=1s.
    rig.io.set_no_charge_sense(false);
    rig.tick_at(1_000);
    assert_eq!(
        rig.app.state(),
        MotorState::IgnitionManualOn,
        "running grace still suppressing"
    );

    rig.tick_at(3_000);
    assert_eq!(rig.app.state(), MotorState::RunningManual);
    assert_eq!(rig.app.status().label, "Running");

    // Key off kills it immediately, no grace on the way down.
    rig.io.set_ignition_sense(false);
    rig.tick_at(3_250);
    assert_eq!(rig.app.state(), MotorState::IgnitionOff);
}

// ── User-commanded start ──────────────────────────────────────

#[test]
fn crank_sequence_phases_reach_the_relays() {
    let mut rig = Rig::new();

    rig.app.handle_command(AppCommand::StartNow);
    rig.tick_at(250); // attempt anchored here
    assert_eq!(rig.app.state(), MotorState::StartingUser);

    // e = 0s: horn only.
    assert!(rig.io.horn_relay());
    assert!(!rig.io.ignition_relay());
    assert!(!rig.io.starter_relay());

    // e = 4s: everything quiet between horn bursts.
    rig.tick_at(4_250);
    assert!(!rig.io.horn_relay());
    assert!(!rig.io.ignition_relay());
    assert!(!rig.io.starter_relay());

    // e = 7s: second horn burst.
    rig.tick_at(7_250);
    assert!(rig.io.horn_relay());
    assert!(!rig.io.ignition_relay());
    assert!(!rig.io.starter_relay());

    // e = 12s: first crank pulse, ignition live.
    rig.tick_at(12_250);
    assert!(!rig.io.horn_relay());
    assert!(rig.io.ignition_relay());
    assert!(rig.io.starter_relay());

    // e = 30s: profile exhausted, still inside the crank window.
    rig.tick_at(30_250);
    assert_eq!(rig.app.state(), MotorState::StartingUser);
    assert!(!rig.io.horn_relay());
    assert!(rig.io.ignition_relay());
    assert!(!rig.io.starter_relay());
}

#[test]
fn failed_crank_escalates_to_error_with_one_notification() {
    let mut rig = Rig::new();

    rig.app.handle_command(AppCommand::StartNow);
    rig.tick_at(250);
    rig.tick_at(15_000);
    rig.tick_at(30_250); // exactly 30s resident — still inside the window
    assert_eq!(rig.app.state(), MotorState::StartingUser);

    rig.tick_at(30_500);
    assert_eq!(rig.app.state(), MotorState::Error);
    assert!(rig.io.all_relays_released());
    assert_eq!(rig.notifier.messages, vec!["Engine failed to start"]);
    assert_eq!(rig.sink.count_containing("ErrorRaised"), 1);

    let status = rig.app.status();
    assert_eq!(status.label, "Problem");
    assert!(status.error_warning);
    assert!(status.show_clear_error);

    // Resident error ticks stay quiet.
    rig.tick_at(31_000);
    assert_eq!(rig.notifier.messages.len(), 1);
}

#[test]
fn crank_catch_settles_into_running_user() {
    let mut rig = Rig::new();

    rig.app.handle_command(AppCommand::StartNow);
    rig.tick_at(250);

    // Engine catches on the first starter pulse.
    rig.io.set_engine_running(true);
    rig.tick_at(12_250);
    assert_eq!(
        rig.app.state(),
        MotorState::StartingUser,
        "running grace holds the state for 2s"
    );

    rig.tick_at(14_250);
    assert_eq!(rig.app.state(), MotorState::RunningUser);
    assert!(rig.io.ignition_relay(), "running state holds ignition");
    assert!(!rig.io.starter_relay());
    assert!(!rig.io.horn_relay());
    assert!(rig.app.status().show_stop);
}

#[test]
fn stop_during_crank_aborts_cleanly() {
    let mut rig = Rig::new();

    rig.app.handle_command(AppCommand::StartNow);
    rig.tick_at(250);
    assert_eq!(rig.app.state(), MotorState::StartingUser);

    rig.app.handle_command(AppCommand::StopNow);
    rig.tick_at(500);
    assert_eq!(rig.app.state(), MotorState::IgnitionOff);
    assert!(rig.io.all_relays_released());
    assert!(rig.notifier.messages.is_empty(), "an abort is not an error");
}

#[test]
fn unexpected_stall_raises_error() {
    let mut rig = Rig::new();

    rig.app.handle_command(AppCommand::StartNow);
    rig.tick_at(250);
    rig.io.set_engine_running(true);
    rig.tick_at(14_250);
    assert_eq!(rig.app.state(), MotorState::RunningUser);

    // Charge drops with no stop command: stall.
    rig.io.set_engine_running(false);
    rig.tick_at(14_500);
    assert_eq!(rig.app.state(), MotorState::Error);
    assert_eq!(rig.notifier.messages, vec!["Engine stopped unexpectedly"]);
    assert!(rig.io.all_relays_released());
}

// ── Remote (auto) operation ───────────────────────────────────

#[test]
fn run_request_starts_and_survives_transient_loss() {
    let mut rig = Rig::new();

    rig.app
        .handle_command(AppCommand::SetRunRequest(Some(reason("tank low"))));
    rig.tick_at(250);
    assert_eq!(rig.app.state(), MotorState::StartingAuto);

    let status = rig.app.status();
    assert_eq!(status.label, "Starting");
    assert!(status.show_run_reason);
    assert_eq!(status.run_reason.as_deref(), Some("tank low"));

    // Source drops out for a couple of seconds, then returns.
    rig.app.handle_command(AppCommand::SetRunRequest(None));
    rig.tick_at(1_250);
    rig.tick_at(2_250);
    assert_eq!(
        rig.app.state(),
        MotorState::StartingAuto,
        "null gap inside the 6s grace must not abort the start"
    );

    rig.app
        .handle_command(AppCommand::SetRunRequest(Some(reason("tank low"))));
    rig.tick_at(3_250);
    assert_eq!(rig.app.state(), MotorState::StartingAuto);
}

#[test]
fn withdrawn_request_aborts_a_pending_start() {
    let mut rig = Rig::new();

    rig.app
        .handle_command(AppCommand::SetRunRequest(Some(reason("tank low"))));
    rig.tick_at(250);
    assert_eq!(rig.app.state(), MotorState::StartingAuto);

    rig.app.handle_command(AppCommand::SetRunRequest(None));
    rig.tick_at(1_000); // grace window opens here
    rig.tick_at(7_250);
    assert_eq!(rig.app.state(), MotorState::IgnitionOff);
    assert!(rig.io.all_relays_released());
    assert!(rig.notifier.messages.is_empty(), "a withdrawal is not an error");
}

#[test]
fn auto_start_timeout_notifies_exactly_once() {
    let mut rig = Rig::new();

    rig.app
        .handle_command(AppCommand::SetRunRequest(Some(reason("tank low"))));
    rig.tick_at(250);
    assert_eq!(rig.app.state(), MotorState::StartingAuto);

    rig.tick_at(10_000);
    rig.tick_at(20_000);
    rig.tick_at(30_000);
    assert_eq!(rig.app.state(), MotorState::StartingAuto);

    rig.tick_at(31_250); // 31s resident, no running signal
    assert_eq!(rig.app.state(), MotorState::Error);
    assert_eq!(rig.notifier.messages, vec!["Engine failed to start"]);

    // The standing run request does not restart out of the error state.
    rig.tick_at(32_000);
    assert_eq!(rig.app.state(), MotorState::Error);
    assert_eq!(rig.notifier.messages.len(), 1);
}

#[test]
fn auto_run_reaches_running_and_follows_withdrawal() {
    let mut rig = Rig::new();

    rig.app
        .handle_command(AppCommand::SetRunRequest(Some(reason("tank low"))));
    rig.tick_at(250);

    rig.io.set_engine_running(true);
    rig.tick_at(10_250);
    rig.tick_at(12_250);
    assert_eq!(rig.app.state(), MotorState::RunningAuto);
    assert!(rig.io.ignition_relay());

    // Request withdrawn for good; relays must release on the expiry tick.
    rig.app.handle_command(AppCommand::SetRunRequest(None));
    rig.tick_at(13_000);
    assert_eq!(rig.app.state(), MotorState::RunningAuto);

    rig.tick_at(19_250);
    assert!(
        rig.io.all_relays_released(),
        "withdrawal expiry must release the ignition relay"
    );

    // With the relay released the engine winds down; the sense inputs
    // decay and the controller settles at off.
    rig.io.set_engine_running(false);
    rig.io.set_ignition_sense(false);
    rig.tick_at(19_500);
    assert_eq!(rig.app.state(), MotorState::IgnitionOff);
}

// ── Error state lifecycle ─────────────────────────────────────

#[test]
fn clear_error_command_returns_to_off() {
    let mut rig = Rig::new();

    rig.app.handle_command(AppCommand::StartNow);
    rig.tick_at(250);
    rig.tick_at(30_500);
    assert_eq!(rig.app.state(), MotorState::Error);

    rig.app.handle_command(AppCommand::ClearError);
    rig.tick_at(30_750);
    assert_eq!(rig.app.state(), MotorState::IgnitionOff);
    assert_eq!(rig.app.last_error(), None);
    assert_eq!(rig.sink.count_containing("ErrorCleared"), 1);
    assert!(rig.app.status().show_start);
}

#[test]
fn start_command_restarts_straight_out_of_error() {
    let mut rig = Rig::new();

    rig.app.handle_command(AppCommand::StartNow);
    rig.tick_at(250);
    rig.tick_at(30_500);
    assert_eq!(rig.app.state(), MotorState::Error);

    rig.app.handle_command(AppCommand::StartNow);
    rig.tick_at(31_000);
    assert_eq!(rig.app.state(), MotorState::StartingUser);
    assert!(rig.io.horn_relay(), "fresh attempt restarts the profile");
    assert_eq!(rig.app.last_error(), None);
}

#[test]
fn error_self_clears_after_two_days() {
    let mut rig = Rig::new();

    rig.app.handle_command(AppCommand::StartNow);
    rig.tick_at(250);
    rig.tick_at(30_500);
    assert_eq!(rig.app.state(), MotorState::Error);
    let entered_ms = 30_500u64;

    let timeout_ms = u64::from(SystemConfig::default().error_timeout_secs) * 1000;
    rig.tick_at(entered_ms + timeout_ms);
    assert_eq!(rig.app.state(), MotorState::Error, "not a moment early");

    rig.tick_at(entered_ms + timeout_ms + 250);
    assert_eq!(rig.app.state(), MotorState::IgnitionOff);
    assert_eq!(rig.sink.count_containing("ErrorCleared"), 1);
}
