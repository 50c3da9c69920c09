//! Controller event stream.
//!
//! Observable state changes are published on a broadcast channel so view
//! layers can re-render without the controller knowing about them. This
//! replaces implicit observable tracking with an explicit subscription.

/// An observable controller state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// The confirmation modal opened.
    ModalOpened,
    /// The confirmation modal closed.
    ModalClosed,
    /// A trip was committed and progression started (or resumed).
    TripStarted,
    /// The trip was aborted and the engine returned to idle.
    TripStopped,
    /// Progression was suspended.
    TripPaused,
    /// Progression was resumed.
    TripResumed,
    /// A travel mode was selected (name is from the fixed table).
    ModeSelected(&'static str),
    /// The destination input widget was cleared.
    InputCleared,
}
