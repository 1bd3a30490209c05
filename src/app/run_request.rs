//! Remote run-request latch.
//!
//! Another system (a tank level controller, an irrigation scheduler) can
//! ask for the engine by supplying a human-readable reason string. The
//! transport refreshes that value at its own cadence and drops out for
//! seconds at a time, so a raw `None` cannot be trusted immediately: the
//! latch keeps the last non-null reason alive for a grace window before
//! conceding that the request was really withdrawn.

use crate::config::SystemConfig;

/// Run-request reason text, sized for a short display line.
pub type ReasonString = heapless::String<64>;

/// Build a reason string, truncating overlength input at a char boundary.
pub fn reason(text: &str) -> ReasonString {
    let mut s = ReasonString::new();
    if s.push_str(text).is_err() {
        for ch in text.chars() {
            if s.push(ch).is_err() {
                break;
            }
        }
    }
    s
}

/// Latches the externally supplied run-request reason across transient
/// signal loss.
pub struct RunRequestLatch {
    grace_ms: u64,
    /// Last non-null reason observed.
    reason: Option<ReasonString>,
    /// Time the source first reported null while a reason was latched.
    went_null_at_ms: Option<u64>,
}

impl RunRequestLatch {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            grace_ms: config.run_request_grace_ms(),
            reason: None,
            went_null_at_ms: None,
        }
    }

    /// Fold in the currently reported value and return the effective
    /// request for this tick.
    ///
    /// A non-null `current` always wins and re-arms the latch. A null
    /// `current` keeps returning the previous reason until the grace
    /// window runs out, then clears.
    pub fn resolve(&mut self, current: Option<&str>, now_ms: u64) -> Option<&ReasonString> {
        match current {
            Some(text) => {
                if self.reason.as_deref() != Some(text) {
                    self.reason = Some(reason(text));
                }
                self.went_null_at_ms = None;
                self.reason.as_ref()
            }
            None => {
                if self.reason.is_some() {
                    let since = *self.went_null_at_ms.get_or_insert(now_ms);
                    if now_ms.saturating_sub(since) <= self.grace_ms {
                        return self.reason.as_ref();
                    }
                    self.reason = None;
                }
                None
            }
        }
    }

    /// The reason in effect as of the last [`resolve`](Self::resolve) call.
    pub fn current(&self) -> Option<&ReasonString> {
        self.reason.as_ref()
    }
}
