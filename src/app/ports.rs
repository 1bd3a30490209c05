//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (the I/O board, event sinks, notification transports,
//! config storage) implement these traits. The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the domain core never touches hardware directly.

use crate::config::SystemConfig;

// ───────────────────────────────────────────────────────────────
// Platform I/O port (driven adapter: I/O board ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Channel-addressed access to the controller board's terminal blocks.
///
/// Digital and analog channels are numbered independently; the flat
/// configuration pin index is split onto them by
/// [`pins`](crate::pins)' `FIRST_ANALOG_*` constants. Analog values are
/// 0–100 (percent of full scale). Reads are infallible by contract: an
/// unavailable channel must read `false` / `0`, never block or panic.
pub trait PlatformPort {
    /// Read digital input channel `DIn`.
    fn read_digital(&mut self, channel: u8) -> bool;

    /// Read analog input channel `AIn` (0–100).
    fn read_analog(&mut self, channel: u8) -> u8;

    /// Drive digital output channel `DOn`.
    fn write_digital(&mut self, channel: u8, level: bool);

    /// Drive analog output channel `AOn` (0–100).
    fn write_analog(&mut self, channel: u8, value: u8);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, remote
/// channel, display page, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Notification port (driven adapter: domain → user alerting)
// ───────────────────────────────────────────────────────────────

/// Receives the human-readable message produced when the controller
/// enters the error state — exactly one call per error episode.
pub trait NotificationPort {
    fn notify(&mut self, message: &str);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Configuration is read once at startup; there is no hot-reload path, so
/// `save` only matters for provisioning flows. Implementations MUST
/// validate before persisting — invalid ranges are rejected with
/// [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError>;
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Underlying storage is full.
    StorageFull,
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::StorageFull => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
