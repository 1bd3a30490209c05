//! Log-based event sink and notification adapters.
//!
//! Implements [`EventSink`] and [`NotificationPort`] by writing to the
//! logger (UART / USB-CDC in production, stderr on the host). A remote
//! channel adapter would implement the same traits; the controller core
//! does not care where the messages land.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, NotificationPort};

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Status(s) => {
                info!(
                    "STATUS | {} ({:?}) | key={} running={} | ign={} start={} horn={} | reason={:?} | error={:?}",
                    s.label,
                    s.state,
                    s.ignition_on,
                    s.is_running,
                    s.outputs.ignition,
                    s.outputs.starter,
                    s.outputs.horn,
                    s.run_reason.as_deref(),
                    s.error.as_deref(),
                );
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from.name(), to.name());
            }
            AppEvent::ErrorRaised(message) => {
                warn!("ERROR | {}", message);
            }
            AppEvent::ErrorCleared => {
                info!("ERROR | cleared");
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state.name());
            }
        }
    }
}

/// Adapter that logs user notifications.
///
/// In a deployment this is where the significant-alerts transport would
/// hang off; the controller only guarantees one call per error episode.
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationPort for LogNotifier {
    fn notify(&mut self, message: &str) {
        warn!("NOTIFY | {}", message);
    }
}
