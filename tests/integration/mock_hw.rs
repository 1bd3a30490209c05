//! Mock platform adapter for integration tests.
//!
//! Backs every board channel with a plain cell and records the full write
//! history so tests can assert on relay behaviour without real GPIO. The
//! helper methods speak the default wiring: ignition sense on DI1,
//! no-charge sense on DI2, estop on DI3; ignition relay on DO0, starter on
//! AO0 (pin 6), horn on AO1 (pin 7).

use gensentry::app::events::AppEvent;
use gensentry::app::ports::{EventSink, NotificationPort, PlatformPort};

// ── Write record ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoWrite {
    Digital { channel: u8, level: bool },
    Analog { channel: u8, value: u8 },
}

// ── MockIo ────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockIo {
    pub digital_in: [bool; 4],
    pub analog_in: [u8; 2],
    pub digital_out: [bool; 6],
    pub analog_out: [u8; 2],
    pub writes: Vec<IoWrite>,
}

#[allow(dead_code)]
impl MockIo {
    pub fn new() -> Self {
        Self::default()
    }

    // Input helpers (default pin map)

    pub fn set_ignition_sense(&mut self, level: bool) {
        self.digital_in[1] = level;
    }

    pub fn set_no_charge_sense(&mut self, level: bool) {
        self.digital_in[2] = level;
    }

    pub fn set_estop(&mut self, level: bool) {
        self.digital_in[3] = level;
    }

    /// Make the engine look running (or not) to the conditioner.
    pub fn set_engine_running(&mut self, running: bool) {
        self.set_ignition_sense(running);
        self.set_no_charge_sense(!running);
    }

    // Output helpers (default pin map)

    pub fn ignition_relay(&self) -> bool {
        self.digital_out[0]
    }

    pub fn starter_relay(&self) -> bool {
        self.analog_out[0] > 0
    }

    pub fn horn_relay(&self) -> bool {
        self.analog_out[1] > 0
    }

    pub fn all_relays_released(&self) -> bool {
        !self.ignition_relay() && !self.starter_relay() && !self.horn_relay()
    }
}

impl PlatformPort for MockIo {
    fn read_digital(&mut self, channel: u8) -> bool {
        self.digital_in.get(channel as usize).copied().unwrap_or(false)
    }

    fn read_analog(&mut self, channel: u8) -> u8 {
        self.analog_in.get(channel as usize).copied().unwrap_or(0)
    }

    fn write_digital(&mut self, channel: u8, level: bool) {
        if let Some(cell) = self.digital_out.get_mut(channel as usize) {
            *cell = level;
        }
        self.writes.push(IoWrite::Digital { channel, level });
    }

    fn write_analog(&mut self, channel: u8, value: u8) {
        if let Some(cell) = self.analog_out.get_mut(channel as usize) {
            *cell = value;
        }
        self.writes.push(IoWrite::Analog { channel, value });
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<String>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.events.iter().filter(|e| e.contains(needle)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(format!("{:?}", event));
    }
}

// ── RecordingNotifier ─────────────────────────────────────────

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Vec<String>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotificationPort for RecordingNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
