//! Autopilot controller: the command mediation layer.
//!
//! Every user-facing action (destination chosen, suggestion previewed,
//! travel mode clicked, shortcut click, keyboard key) flows through
//! [`AutopilotController`], which validates it, derives parameters, and
//! issues commands against the trip engine. The controller also owns the
//! transient UI-adjacent state that gates commands: whether the
//! confirmation modal is open and which travel mode is selected.
//!
//! # Architecture
//!
//! ```text
//! search widget ──► request_destination / preview_suggestion ─┐
//! mode buttons ───► select_travel_mode                        │
//! map shortcut ───► shortcut_trigger                          ├──► Engine
//! keyboard ───────► handle_key (Escape/Space)                 │
//! pause button ───► toggle_pause                              │
//!                                                             │
//!                   broadcast ControllerEvent ◄───────────────┘
//! ```
//!
//! The only suspension point is route scheduling. A monotonically
//! increasing schedule token guards against a stale scheduling response
//! mutating state after a newer request or a stop superseded it.

mod command;
mod events;
mod input;
mod keys;

pub use command::{AutopilotController, CommandOutcome, ControlSnapshot, ControllerError};
pub use events::ControllerEvent;
pub use input::{DestinationInput, NullDestinationInput, ShortcutEvent, ShortcutPoint};
pub use keys::{Key, KeyBus, KeySubscription, KEY_CODE_ESCAPE, KEY_CODE_SPACE};
