//! Output drivers and board bring-up.
//!
//! `relays` is pure mapping logic (logical signal → channel write) and
//! runs everywhere; `hw_init` and `watchdog` wrap ESP-IDF peripherals and
//! compile to stubs on the host.

pub mod hw_init;
pub mod relays;
pub mod watchdog;
