//! Control laws — pure, hardware-free computation.

pub mod sequencer;
