//! I/O channel map for the GenSentry controller board.
//!
//! Single source of truth — every module references this rather than
//! hard-coding channel numbers or GPIO assignments.
//!
//! The board exposes a flat pin index space to configuration, split into
//! digital and analog ranges the same way the terminal blocks are labelled:
//! input pins 0–3 are digital (DI0–DI3), 4–5 are analog (AI0–AI1); output
//! pins 0–5 are relay drivers (DO0–DO5), 6–7 are analog drivers (AO0–AO1).

// ---------------------------------------------------------------------------
// Pin index space (configuration-facing)
// ---------------------------------------------------------------------------

/// First input pin index that maps to an analog channel.
/// `pin >= FIRST_ANALOG_IN_PIN` reads `AI(pin - FIRST_ANALOG_IN_PIN)`.
pub const FIRST_ANALOG_IN_PIN: u8 = 4;

/// First output pin index that maps to an analog channel.
/// `pin >= FIRST_ANALOG_OUT_PIN` drives `AO(pin - FIRST_ANALOG_OUT_PIN)`.
pub const FIRST_ANALOG_OUT_PIN: u8 = 6;

/// Analog inputs read 0–100 (percent of full scale). Anything above this
/// threshold counts as a logical HIGH when the channel is used as a
/// boolean sense line.
pub const ANALOG_TRUE_THRESHOLD: u8 = 2;

/// Analog output value driven for a logical ON (0 for OFF).
pub const ANALOG_FULL_SCALE: u8 = 100;

// ---------------------------------------------------------------------------
// Physical GPIO routing (ESP32-S3 main board)
// ---------------------------------------------------------------------------

/// Digital sense inputs DI0–DI3 (opto-isolated, active HIGH).
pub const DI_GPIOS: [i32; 4] = [4, 5, 6, 7];

/// Analog sense inputs AI0–AI1 (0–10 V front end into ADC1).
pub const AI_GPIOS: [i32; 2] = [8, 9];

/// Relay outputs DO0–DO5 (driver transistors, active HIGH).
pub const DO_GPIOS: [i32; 6] = [10, 11, 12, 13, 14, 15];

/// Analog outputs AO0–AO1 (0–10 V drivers, PWM + RC filter).
pub const AO_GPIOS: [i32; 2] = [16, 17];

/// LEDC PWM frequency for the analog output drivers (1 kHz, RC-filtered).
pub const AO_PWM_FREQ_HZ: u32 = 1_000;
