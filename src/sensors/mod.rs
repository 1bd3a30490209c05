//! Sense-input subsystem — conditioning raw platform reads into the
//! [`InputSnapshot`] consumed by the state machine.
//!
//! The conditioner owns the configured input pin assignments and produces
//! one snapshot per control tick. Pin indices at or above
//! [`pins::FIRST_ANALOG_IN_PIN`] address the analog front end (0–100 full
//! scale, thresholded to a boolean); lower indices are plain digital reads.
//! There are no error paths: an input the platform cannot serve reads as
//! `false` at the adapter.

pub mod running;

use crate::app::ports::PlatformPort;
use crate::config::SystemConfig;
use crate::fsm::context::InputSnapshot;
use crate::pins;

/// Conditions the three sense lines into a per-tick snapshot.
pub struct InputConditioner {
    ignition_pin: u8,
    no_charge_pin: u8,
    estop_pin: u8,
}

impl InputConditioner {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            ignition_pin: config.ignition_in_pin,
            no_charge_pin: config.no_charge_in_pin,
            estop_pin: config.estop_in_pin,
        }
    }

    /// Read every sense line and return a unified snapshot.
    pub fn read(&mut self, io: &mut impl PlatformPort) -> InputSnapshot {
        InputSnapshot {
            estop: read_bool(io, self.estop_pin),
            ignition: read_bool(io, self.ignition_pin),
            no_charge: read_bool(io, self.no_charge_pin),
        }
    }
}

/// Read one input pin as a boolean, routing by the board's channel split.
fn read_bool(io: &mut impl PlatformPort, pin: u8) -> bool {
    if pin >= pins::FIRST_ANALOG_IN_PIN {
        io.read_analog(pin - pins::FIRST_ANALOG_IN_PIN) > pins::ANALOG_TRUE_THRESHOLD
    } else {
        io.read_digital(pin)
    }
}
