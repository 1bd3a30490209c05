//! Grace-debounced engine-running signal.
//!
//! The raw condition is `ignition && !no_charge`: with the key circuit live
//! and the alternator charging, the engine must be turning. Right after the
//! crank catches, though, the charge relay bounces for a moment — so the
//! rising edge is suppressed for a grace window before the signal reads
//! true. The falling edge is never delayed: a genuine stall must be acted
//! on immediately.

use crate::config::SystemConfig;
use crate::fsm::context::InputSnapshot;

/// Hysteresis-debounced running detector.
pub struct RunningSignal {
    grace_ms: u64,
    /// Time the raw condition last rose, while it stays high.
    raw_high_since_ms: Option<u64>,
}

impl RunningSignal {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            grace_ms: config.running_grace_ms(),
            raw_high_since_ms: None,
        }
    }

    /// Fold in this tick's snapshot and return the debounced signal.
    pub fn update(&mut self, snap: &InputSnapshot, now_ms: u64) -> bool {
        let raw = snap.ignition && !snap.no_charge;
        if !raw {
            self.raw_high_since_ms = None;
            return false;
        }
        let since = *self.raw_high_since_ms.get_or_insert(now_ms);
        now_ms.saturating_sub(since) >= self.grace_ms
    }

    /// When the raw condition last rose, if it is currently high.
    pub fn since_ms(&self) -> Option<u64> {
        self.raw_high_since_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on() -> InputSnapshot {
        InputSnapshot {
            estop: false,
            ignition: true,
            no_charge: false,
        }
    }

    fn off() -> InputSnapshot {
        InputSnapshot {
            estop: false,
            ignition: true,
            no_charge: true,
        }
    }

    #[test]
    fn rising_edge_suppressed_for_grace_window() {
        let mut sig = RunningSignal::new(&SystemConfig::default());
        assert!(!sig.update(&on(), 1_000));
        assert!(!sig.update(&on(), 2_000));
        assert!(!sig.update(&on(), 2_999));
        assert!(sig.update(&on(), 3_000), "grace expires at exactly 2s");
        assert!(sig.update(&on(), 10_000));
    }

    #[test]
    fn falling_edge_is_immediate() {
        let mut sig = RunningSignal::new(&SystemConfig::default());
        sig.update(&on(), 0);
        assert!(sig.update(&on(), 5_000));
        assert!(!sig.update(&off(), 5_250), "no grace on the way down");
    }

    #[test]
    fn bounce_restarts_the_grace_window() {
        let mut sig = RunningSignal::new(&SystemConfig::default());
        sig.update(&on(), 0);
        sig.update(&off(), 1_000);
        assert!(!sig.update(&on(), 1_250));
        assert!(!sig.update(&on(), 3_000), "window restarted at 1.25s");
        assert!(sig.update(&on(), 3_250));
    }

    #[test]
    fn ignition_off_means_not_running() {
        let mut sig = RunningSignal::new(&SystemConfig::default());
        let snap = InputSnapshot {
            estop: false,
            ignition: false,
            no_charge: false,
        };
        for t in [0u64, 5_000, 10_000] {
            assert!(!sig.update(&snap, t));
        }
        assert_eq!(sig.since_ms(), None);
    }
}
