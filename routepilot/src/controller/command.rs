//! Controller command surface.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::coord::LatLng;
use crate::engine::Engine;
use crate::travel_mode::{Speed, TravelModeError, TravelModeTable};

use super::events::ControllerEvent;
use super::input::{DestinationInput, ShortcutEvent};
use super::keys::Key;

/// Capacity of the controller event channel.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Default selected travel mode at construction.
const DEFAULT_TRAVEL_MODE: &str = "cycling";

/// Errors the controller surfaces to its caller.
///
/// Route resolution failures are not here: they are recovered locally
/// (the destination input is cleared) and reported as
/// [`CommandOutcome::RouteFailed`].
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A travel mode name outside the fixed table. Programming error;
    /// never defaulted away.
    #[error(transparent)]
    InvalidTravelMode(#[from] TravelModeError),

    /// Commit requested with no previewed route.
    #[error("no previewed route to commit")]
    PrematureCommit,
}

/// What a command did, for callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A route was committed and the trip started.
    Committed,
    /// The command applied directly without scheduling (pause/resume).
    Applied,
    /// A route was previewed and the confirmation modal is open.
    PreviewOpened,
    /// Route resolution failed; the destination input was cleared and
    /// nothing else changed.
    RouteFailed,
    /// Preconditions not met; nothing happened.
    Ignored,
    /// A newer schedule or a stop superseded this command while its
    /// route was resolving; the stale result was discarded.
    Superseded,
}

/// Label for the commit button, derived from the engine's clean flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitLabel {
    /// No trip has ever been committed.
    Start,
    /// A trip was committed before; this commit updates it.
    Update,
}

/// Point-in-time view of controller and engine state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSnapshot {
    /// Whether a trip is active.
    pub running: bool,
    /// Whether the active trip is suspended.
    pub paused: bool,
    /// Whether the confirmation modal is open.
    pub modal_open: bool,
    /// Selected travel mode name.
    pub travel_mode: &'static str,
    /// Selected travel mode glyph.
    pub travel_mode_icon: &'static str,
    /// Selected travel mode nominal speed.
    pub speed: Speed,
    /// Planned route length, when a route has been resolved.
    pub distance_km: Option<f64>,
    /// Estimated travel time at the selected speed. Suppressed for the
    /// unbounded speed and when no route is planned.
    pub estimated_time: Option<Duration>,
    /// Start vs Update labeling for the commit button.
    pub commit_label: CommitLabel,
}

/// Mediates all user-facing commands into engine calls.
///
/// Owns the transient UI-adjacent state (modal open/closed, selected
/// travel mode) and the stale-schedule guard. The engine and the
/// destination input widget are collaborators reached through their
/// respective seams.
pub struct AutopilotController<E: Engine, I: DestinationInput> {
    engine: E,
    input: I,
    table: TravelModeTable,
    travel_mode: &'static str,
    modal_open: bool,
    schedule_seq: u64,
    events: broadcast::Sender<ControllerEvent>,
}

impl<E: Engine, I: DestinationInput> AutopilotController<E, I> {
    /// Create a controller around an engine and a destination input.
    pub fn new(engine: E, input: I) -> Self {
        let (events, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            engine,
            input,
            table: TravelModeTable,
            travel_mode: DEFAULT_TRAVEL_MODE,
            modal_open: false,
            schedule_seq: 0,
            events,
        }
    }

    /// Subscribe to observable state changes.
    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    /// The underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable engine access, for the embedding progression loop.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// The destination input widget handle.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Whether the confirmation modal is open.
    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Name of the selected travel mode.
    pub fn travel_mode(&self) -> &'static str {
        self.travel_mode
    }

    // ── Command surface ──────────────────────────────────────────────

    /// Deterministic destination choice: cancel any in-flight trip, plan
    /// a route, and on success commit and start immediately, with no
    /// confirmation step.
    pub async fn request_destination(&mut self, destination: LatLng) -> CommandOutcome {
        self.engine.stop();

        let token = self.begin_schedule();
        let result = self.engine.schedule_trip(destination).await;
        if !self.schedule_is_current(token) {
            debug!("destination request superseded while scheduling");
            return CommandOutcome::Superseded;
        }

        match result {
            Ok(()) => {
                self.commit_and_start();
                CommandOutcome::Committed
            }
            Err(e) => {
                warn!(error = %e, "destination request failed");
                self.clear_input();
                CommandOutcome::RouteFailed
            }
        }
    }

    /// Suggestion preview: plan a route without stopping the current
    /// trip, and on success open the confirmation modal. Never starts
    /// the engine.
    pub async fn preview_suggestion(&mut self, destination: LatLng) -> CommandOutcome {
        let token = self.begin_schedule();
        let result = self.engine.schedule_trip(destination).await;
        if !self.schedule_is_current(token) {
            debug!("suggestion preview superseded while scheduling");
            return CommandOutcome::Superseded;
        }

        match result {
            Ok(()) => {
                self.open_modal();
                CommandOutcome::PreviewOpened
            }
            Err(e) => {
                warn!(error = %e, "suggestion preview failed");
                self.clear_input();
                CommandOutcome::RouteFailed
            }
        }
    }

    /// Commit the previewed route and start the trip, closing the modal.
    ///
    /// Fails loudly when no previewed route exists; the UI is expected to
    /// disable the commit button in that case.
    pub fn confirm_start(&mut self) -> Result<CommandOutcome, ControllerError> {
        if self.engine.accurate_route().is_empty() {
            return Err(ControllerError::PrematureCommit);
        }

        self.clear_input();
        self.commit_and_start();
        self.close_modal();
        Ok(CommandOutcome::Committed)
    }

    /// Dismiss the modal and clear the input. Leaves engine run state
    /// alone; a running trip keeps running. Idempotent.
    pub fn cancel(&mut self) {
        self.clear_input();
        self.close_modal();
    }

    /// Select a travel mode by name, writing its speed into the engine.
    ///
    /// Does not start or interrupt a trip; the speed takes effect on the
    /// next commit or tick.
    pub fn select_travel_mode(&mut self, name: &str) -> Result<(), ControllerError> {
        let mode = self.table.lookup(name)?;
        self.engine.set_speed(mode.speed.to_trip_speed());
        self.travel_mode = mode.name;
        self.emit(ControllerEvent::ModeSelected(mode.name));
        debug!(mode = mode.name, "travel mode selected");
        Ok(())
    }

    /// Mid-trip speed change: pause, re-plan a fresh route from the
    /// current position to the current destination, and reopen the
    /// confirmation modal on success. Ignored when no trip has a
    /// destination.
    pub async fn request_speed_change(&mut self) -> CommandOutcome {
        let Some(destination) = self.engine.destination() else {
            warn!("speed change requested with no active destination");
            return CommandOutcome::Ignored;
        };

        self.engine.pause();
        self.emit(ControllerEvent::TripPaused);

        let token = self.begin_schedule();
        let result = self.engine.schedule_trip(destination).await;
        if !self.schedule_is_current(token) {
            debug!("speed change superseded while scheduling");
            return CommandOutcome::Superseded;
        }

        match result {
            Ok(()) => {
                self.open_modal();
                CommandOutcome::PreviewOpened
            }
            Err(e) => {
                warn!(error = %e, "speed change rescheduling failed");
                self.clear_input();
                CommandOutcome::RouteFailed
            }
        }
    }

    /// Quick trip from a map shortcut click: stop, select a mode by the
    /// fixed positional rule, plan, and on success commit and start with
    /// no confirmation step.
    pub async fn shortcut_trigger(&mut self, event: ShortcutEvent) -> CommandOutcome {
        let destination = match event.point.to_lat_lng() {
            Ok(coords) => coords,
            Err(e) => {
                warn!(error = %e, "shortcut coordinates rejected");
                return CommandOutcome::Ignored;
            }
        };

        self.engine.stop();

        let mode = self.table.shortcut_mode(event.secondary_modifier);
        self.engine.set_speed(mode.speed.to_trip_speed());
        self.travel_mode = mode.name;
        self.emit(ControllerEvent::ModeSelected(mode.name));

        let token = self.begin_schedule();
        let result = self.engine.schedule_trip(destination).await;
        if !self.schedule_is_current(token) {
            debug!("shortcut trip superseded while scheduling");
            return CommandOutcome::Superseded;
        }

        match result {
            Ok(()) => {
                self.commit_and_start();
                CommandOutcome::Committed
            }
            Err(e) => {
                warn!(error = %e, "shortcut trip failed");
                self.clear_input();
                CommandOutcome::RouteFailed
            }
        }
    }

    /// Pause a running trip, resume a paused one, do nothing when idle.
    pub fn toggle_pause(&mut self) -> CommandOutcome {
        if self.engine.is_running() && !self.engine.is_paused() {
            self.engine.pause();
            self.emit(ControllerEvent::TripPaused);
            CommandOutcome::Applied
        } else if self.engine.is_paused() {
            self.engine.resume();
            self.emit(ControllerEvent::TripResumed);
            CommandOutcome::Applied
        } else {
            CommandOutcome::Ignored
        }
    }

    /// Abort the trip. Also invalidates any pending schedule continuation
    /// so a stale route resolution cannot commit after the stop.
    pub fn stop_trip(&mut self) {
        self.engine.stop();
        self.invalidate_pending_schedules();
        self.emit(ControllerEvent::TripStopped);
        info!("trip stopped by user");
    }

    /// React to a semantic key press.
    ///
    /// Escape closes the modal only when it is open; Space has the
    /// toggle-pause semantics regardless of focus.
    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Escape => {
                if self.modal_open {
                    self.cancel();
                }
            }
            Key::Space => {
                self.toggle_pause();
            }
        }
    }

    // ── Derived views ────────────────────────────────────────────────

    /// Point-in-time snapshot for rendering.
    ///
    /// Fails loudly if the selected mode name ever falls out of the
    /// fixed table rather than silently showing a different mode.
    pub fn snapshot(&self) -> Result<ControlSnapshot, TravelModeError> {
        let mode = self.table.lookup(self.travel_mode)?;
        let route = self.engine.accurate_route();

        Ok(ControlSnapshot {
            running: self.engine.is_running(),
            paused: self.engine.is_paused(),
            modal_open: self.modal_open,
            travel_mode: mode.name,
            travel_mode_icon: mode.icon,
            speed: mode.speed,
            distance_km: (!route.is_empty()).then(|| route.total_distance_km()),
            estimated_time: route.travel_time(mode.speed.to_trip_speed()),
            commit_label: if self.engine.is_clean() {
                CommitLabel::Start
            } else {
                CommitLabel::Update
            },
        })
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Copy the accurate route into the working route as an independent
    /// clone, then start (or resume) the engine.
    fn commit_and_start(&mut self) {
        let committed = self.engine.accurate_route().deep_clone();
        self.engine.set_working_route(committed);
        self.engine.start();
        self.emit(ControllerEvent::TripStarted);
    }

    fn open_modal(&mut self) {
        // Idempotent: repeated previews keep the modal open without a
        // duplicate open event.
        if !self.modal_open {
            self.modal_open = true;
            self.emit(ControllerEvent::ModalOpened);
        }
    }

    fn close_modal(&mut self) {
        if self.modal_open {
            self.modal_open = false;
            self.emit(ControllerEvent::ModalClosed);
        }
    }

    fn clear_input(&mut self) {
        self.input.clear_value();
        self.emit(ControllerEvent::InputCleared);
    }

    /// Issue a new schedule token, superseding any pending one.
    fn begin_schedule(&mut self) -> u64 {
        self.schedule_seq += 1;
        self.schedule_seq
    }

    /// Whether a captured token is still the latest issued.
    fn schedule_is_current(&self, token: u64) -> bool {
        token == self.schedule_seq
    }

    /// Invalidate pending schedule continuations (stop paths).
    fn invalidate_pending_schedules(&mut self) {
        self.schedule_seq += 1;
    }

    fn emit(&self, event: ControllerEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }
}
