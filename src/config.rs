//! System configuration parameters
//!
//! All tunable parameters for the GenSentry controller. Values are loaded
//! once at startup (from NVS or defaults) and are fixed for the life of the
//! process — there is no hot reload path.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Input pins ---
    /// Sense pin for the ignition/key circuit. Analog inputs are pins 4-5.
    pub ignition_in_pin: u8,
    /// Sense pin for the alternator no-charge lamp circuit. Analog inputs
    /// are pins 4-5.
    pub no_charge_in_pin: u8,
    /// Sense pin for the emergency-stop loop.
    pub estop_in_pin: u8,

    // --- Output pins ---
    /// Relay pin driving the ignition circuit. Analog outputs are pins 6-7.
    pub ignition_out_pin: u8,
    /// Relay pin driving the starter solenoid. Analog outputs are pins 6-7.
    pub starter_out_pin: u8,
    /// Relay pin driving the pre-start warning horn. Analog outputs are
    /// pins 6-7.
    pub horn_out_pin: u8,

    // --- Debounce / grace windows ---
    /// Suppress the running signal for this long after its rising edge
    /// (relay bounce at crank catch).
    pub running_grace_secs: u16,
    /// Keep the last remote run request alive for this long after the
    /// source reports none (transient signal loss).
    pub run_request_grace_secs: u16,

    // --- State timeouts ---
    /// A starting state that has not reached running within this window
    /// escalates to the error state.
    pub start_timeout_secs: u16,
    /// The error state self-clears back to off after this long without a
    /// clear command.
    pub error_timeout_secs: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Status report interval (seconds)
    pub status_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Inputs
            ignition_in_pin: 1,
            no_charge_in_pin: 2,
            estop_in_pin: 3,

            // Outputs
            ignition_out_pin: 0,
            starter_out_pin: 6,
            horn_out_pin: 7,

            // Grace windows
            running_grace_secs: 2,
            run_request_grace_secs: 6,

            // Timeouts
            start_timeout_secs: 30,
            error_timeout_secs: 60 * 60 * 24 * 2, // 2 days

            // Timing
            control_loop_interval_ms: 250, // 4 Hz
            status_interval_secs: 60,      // 1/min
        }
    }
}

impl SystemConfig {
    /// Running-signal grace window in milliseconds.
    pub fn running_grace_ms(&self) -> u64 {
        u64::from(self.running_grace_secs) * 1000
    }

    /// Run-request grace window in milliseconds.
    pub fn run_request_grace_ms(&self) -> u64 {
        u64::from(self.run_request_grace_secs) * 1000
    }

    /// Crank window in milliseconds.
    pub fn start_timeout_ms(&self) -> u64 {
        u64::from(self.start_timeout_secs) * 1000
    }

    /// Error self-clear window in milliseconds.
    pub fn error_timeout_ms(&self) -> u64 {
        u64::from(self.error_timeout_secs) * 1000
    }
}
