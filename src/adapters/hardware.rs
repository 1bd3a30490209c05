//! Hardware adapter — bridges the I/O board to [`PlatformPort`].
//!
//! This is the only module in the system that touches actual terminal
//! channels. On ESP-IDF it routes through the raw GPIO/ADC/LEDC helpers in
//! [`hw_init`](crate::drivers::hw_init); on the host it backs every channel
//! with plain in-memory cells so the control loop and tests can run
//! anywhere.
//!
//! Out-of-range channels follow the platform contract: reads return
//! `false`/`0`, writes are logged and dropped. Nothing here blocks.

use crate::app::ports::PlatformPort;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;
use log::warn;

/// Concrete adapter for the controller board's terminal blocks.
pub struct HardwareAdapter {
    #[cfg(not(target_os = "espidf"))]
    sim: SimChannels,
}

/// Host-side channel cells. Inputs are set by the simulation driver;
/// outputs are recorded for inspection.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default, Clone, Copy)]
struct SimChannels {
    digital_in: [bool; 4],
    analog_in: [u8; 2],
    digital_out: [bool; 6],
    analog_out: [u8; 2],
}

impl Default for HardwareAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            sim: SimChannels::default(),
        }
    }
}

// ── Host simulation controls ──────────────────────────────────

#[cfg(not(target_os = "espidf"))]
impl HardwareAdapter {
    /// Set a simulated digital input level.
    pub fn sim_set_digital_in(&mut self, channel: u8, level: bool) {
        if let Some(cell) = self.sim.digital_in.get_mut(channel as usize) {
            *cell = level;
        }
    }

    /// Set a simulated analog input value (0–100).
    pub fn sim_set_analog_in(&mut self, channel: u8, value: u8) {
        if let Some(cell) = self.sim.analog_in.get_mut(channel as usize) {
            *cell = value.min(100);
        }
    }

    /// Last level written to a digital output.
    pub fn sim_digital_out(&self, channel: u8) -> bool {
        self.sim
            .digital_out
            .get(channel as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Last value written to an analog output.
    pub fn sim_analog_out(&self, channel: u8) -> u8 {
        self.sim
            .analog_out
            .get(channel as usize)
            .copied()
            .unwrap_or(0)
    }
}

// ── PlatformPort implementation ───────────────────────────────

#[cfg(target_os = "espidf")]
impl PlatformPort for HardwareAdapter {
    fn read_digital(&mut self, channel: u8) -> bool {
        match pins::DI_GPIOS.get(channel as usize) {
            Some(&gpio) => hw_init::gpio_read(gpio),
            None => false,
        }
    }

    fn read_analog(&mut self, channel: u8) -> u8 {
        match hw_init::ADC1_CH_AI.get(channel as usize) {
            // 12-bit raw sample scaled onto the 0-100 interface range.
            Some(&adc_ch) => ((u32::from(hw_init::adc1_read(adc_ch)) * 100) / 4095) as u8,
            None => 0,
        }
    }

    fn write_digital(&mut self, channel: u8, level: bool) {
        match pins::DO_GPIOS.get(channel as usize) {
            Some(&gpio) => hw_init::gpio_write(gpio, level),
            None => warn!("write to nonexistent digital output DO{channel} dropped"),
        }
    }

    fn write_analog(&mut self, channel: u8, value: u8) {
        match hw_init::LEDC_CH_AO.get(channel as usize) {
            // 0-100 interface range onto 8-bit LEDC duty.
            Some(&ledc_ch) => hw_init::ledc_set(ledc_ch, ((u32::from(value.min(100)) * 255) / 100) as u8),
            None => warn!("write to nonexistent analog output AO{channel} dropped"),
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl PlatformPort for HardwareAdapter {
    fn read_digital(&mut self, channel: u8) -> bool {
        self.sim
            .digital_in
            .get(channel as usize)
            .copied()
            .unwrap_or(false)
    }

    fn read_analog(&mut self, channel: u8) -> u8 {
        self.sim
            .analog_in
            .get(channel as usize)
            .copied()
            .unwrap_or(0)
    }

    fn write_digital(&mut self, channel: u8, level: bool) {
        match self.sim.digital_out.get_mut(channel as usize) {
            Some(cell) => *cell = level,
            None => warn!("write to nonexistent digital output DO{channel} dropped"),
        }
    }

    fn write_analog(&mut self, channel: u8, value: u8) {
        match self.sim.analog_out.get_mut(channel as usize) {
            Some(cell) => *cell = value.min(100),
            None => warn!("write to nonexistent analog output AO{channel} dropped"),
        }
    }
}
