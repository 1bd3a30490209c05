//! Presentation adapter — derives the operator page from controller state.
//!
//! Thin by design: one pure function from the controller's observable
//! state to display strings, indicator values, and control visibility.
//! The rendering layer (remote UI, local display) consumes this struct
//! verbatim; nothing here feeds back into control decisions.

use super::run_request::ReasonString;
use crate::fsm::context::ErrorString;
use crate::fsm::{MotorState, states};

/// Everything the operator page needs for one refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub state: MotorState,
    /// Display string for the state indicator.
    pub label: &'static str,

    // Indicator values
    pub ignition_on: bool,
    pub is_running: bool,
    pub run_reason: Option<ReasonString>,
    pub error: Option<ErrorString>,

    // Control visibility
    pub show_start: bool,
    pub show_stop: bool,
    pub show_clear_error: bool,
    pub show_run_reason: bool,

    // Warning banners
    pub estop_warning: bool,
    pub error_warning: bool,
    pub manual_mode_warning: bool,
}

impl StatusReport {
    /// Derive the page from the controller's current observables.
    ///
    /// Exactly one of the banner/control groups is shown, in fixed
    /// precedence: estop beats error beats manual mode beats an active
    /// run request beats the start/stop controls.
    pub fn derive(
        state: MotorState,
        ignition_on: bool,
        is_running: bool,
        run_reason: Option<ReasonString>,
        error: Option<ErrorString>,
    ) -> Self {
        let mut report = Self {
            state,
            label: states::display_label(state),
            ignition_on,
            is_running,
            run_reason,
            error,
            show_start: false,
            show_stop: false,
            show_clear_error: false,
            show_run_reason: false,
            estop_warning: false,
            error_warning: false,
            manual_mode_warning: false,
        };

        if state == MotorState::Estopped {
            report.estop_warning = true;
        } else if report.error.is_some() {
            report.error_warning = true;
            report.show_clear_error = true;
        } else if state.is_manual() {
            report.manual_mode_warning = true;
        } else if report.run_reason.is_some() {
            report.show_run_reason = true;
        } else if is_running || state.is_starting() {
            report.show_stop = true;
        } else {
            report.show_start = true;
        }

        report
    }
}
