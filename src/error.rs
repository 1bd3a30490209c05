#![allow(dead_code)] // Error types reserved for future PlatformPort typed returns

//! Unified error types for the GenSentry firmware.
//!
//! Follows embedded best practice: a single `Error` enum that every subsystem
//! can convert into, keeping the top-level control loop's error handling
//! uniform. All variants are `Copy` so they can be cheaply passed through the
//! state machine without allocation.
//!
//! Note that an engaged emergency stop is *not* an error — it is a regular
//! controller state (`MotorState::Estopped`) cleared by releasing the
//! physical input. Only genuine start/run failures become a [`StartFault`].

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sense input could not be read or returned out-of-range data.
    Input(InputError),
    /// A relay or analog output command failed.
    Relay(RelayError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(e) => write!(f, "input: {e}"),
            Self::Relay(e) => write!(f, "relay: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// ADC read returned an error or timed out.
    AdcReadFailed,
    /// GPIO read returned an error.
    GpioReadFailed,
    /// Reading is outside the 0–100 full-scale range.
    OutOfRange,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed => write!(f, "ADC read failed"),
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<InputError> for Error {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Relay errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayError {
    /// GPIO set failed.
    GpioWriteFailed,
    /// PWM duty write for an analog output failed.
    PwmWriteFailed,
    /// Output pin index is outside the board's channel map.
    NoSuchChannel,
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::NoSuchChannel => write!(f, "no such output channel"),
        }
    }
}

impl From<RelayError> for Error {
    fn from(e: RelayError) -> Self {
        Self::Relay(e)
    }
}

// ---------------------------------------------------------------------------
// Start/run faults
// ---------------------------------------------------------------------------

/// Failures that route the state machine into `MotorState::Error`.
///
/// Recorded by the guard that requests the transition, consumed by the
/// `Error` entry action, which stores the message and notifies the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartFault {
    /// A running state observed loss of the running signal with no stop
    /// command — the engine stalled or the charge circuit dropped out.
    Stall,
    /// A starting state exhausted its crank window without the engine
    /// catching.
    StartTimeout,
}

impl StartFault {
    /// Message stored in the error record and sent to the notification sink.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Stall => "Engine stopped unexpectedly",
            Self::StartTimeout => "Engine failed to start",
        }
    }
}

impl fmt::Display for StartFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stall => write!(f, "unexpected stall"),
            Self::StartTimeout => write!(f, "start timeout"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
