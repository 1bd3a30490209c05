//! Relay bank — maps the three logical output signals onto board channels.
//!
//! Trivial but load-bearing: this is the single place that knows which
//! configured pin index drives which relay and how a pin index splits into
//! digital vs analog channels. An analog-routed output is driven to full
//! scale for ON and zero for OFF, matching how the 0–10 V driver feeds a
//! relay coil through the loom.

use log::debug;

use crate::app::ports::PlatformPort;
use crate::config::SystemConfig;
use crate::fsm::context::RelayCommands;
use crate::pins;

/// Owns the output pin assignments; applies [`RelayCommands`] each tick.
pub struct RelayBank {
    ignition_pin: u8,
    starter_pin: u8,
    horn_pin: u8,
}

impl RelayBank {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            ignition_pin: config.ignition_out_pin,
            starter_pin: config.starter_out_pin,
            horn_pin: config.horn_out_pin,
        }
    }

    /// Drive all three relays to the commanded levels.
    pub fn apply(&mut self, io: &mut impl PlatformPort, cmds: &RelayCommands) {
        write_bool(io, self.ignition_pin, cmds.ignition, "ignition");
        write_bool(io, self.starter_pin, cmds.starter, "starter");
        write_bool(io, self.horn_pin, cmds.horn, "horn");
    }

    /// Release every relay (shutdown path).
    pub fn all_off(&mut self, io: &mut impl PlatformPort) {
        self.apply(io, &RelayCommands::all_off());
    }
}

/// Drive one output pin, routing by the board's channel split.
fn write_bool(io: &mut impl PlatformPort, pin: u8, level: bool, name: &str) {
    debug!("setting {name} to {level} on pin {pin}");
    if pin >= pins::FIRST_ANALOG_OUT_PIN {
        let value = if level { pins::ANALOG_FULL_SCALE } else { 0 };
        io.write_analog(pin - pins::FIRST_ANALOG_OUT_PIN, value);
    } else {
        io.write_digital(pin, level);
    }
}
