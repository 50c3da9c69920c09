//! RoutePilot CLI - scripted trip control demo
//!
//! Wires the straight-segment planner, the trip engine, and the
//! controller together and drives one complete trip lifecycle from the
//! command line: select a mode, plan and preview a route, confirm, pause
//! and resume, change speed mid-trip, and stop.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use routepilot::controller::{AutopilotController, Key, NullDestinationInput};
use routepilot::coord::LatLng;
use routepilot::engine::{AutopilotEngine, Engine};
use routepilot::planner::DirectPlanner;

/// Trip autopilot control demo.
#[derive(Debug, Parser)]
#[command(name = "routepilot", version, about)]
struct Args {
    /// Starting latitude.
    #[arg(long, default_value_t = 48.8584)]
    from_lat: f64,

    /// Starting longitude.
    #[arg(long, default_value_t = 2.2945)]
    from_lng: f64,

    /// Destination latitude.
    #[arg(long, default_value_t = 48.8606)]
    to_lat: f64,

    /// Destination longitude.
    #[arg(long, default_value_t = 2.3376)]
    to_lng: f64,

    /// Travel mode to start with.
    #[arg(long, default_value = "cycling")]
    mode: String,

    /// Travel mode to switch to mid-trip.
    #[arg(long, default_value = "car")]
    change_to: String,

    /// Steps per planned route.
    #[arg(long, default_value_t = 32)]
    steps: usize,

    /// Default log filter when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log: String,
}

fn format_eta(eta: Option<Duration>) -> String {
    match eta {
        Some(d) => {
            let secs = d.as_secs();
            format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
        }
        None => "--:--:--".to_string(),
    }
}

fn print_snapshot<E: Engine>(ctl: &AutopilotController<E, NullDestinationInput>) {
    match ctl.snapshot() {
        Ok(snap) => {
            let distance = snap
                .distance_km
                .map(|d| format!("{:.2} km", d))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  mode={} ({}) speed={} distance={} eta={} running={} paused={} modal={}",
                snap.travel_mode,
                snap.travel_mode_icon,
                snap.speed,
                distance,
                format_eta(snap.estimated_time),
                snap.running,
                snap.paused,
                snap.modal_open,
            );
        }
        Err(e) => eprintln!("  snapshot unavailable: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    routepilot::log::init(&args.log);

    let origin = LatLng::checked(args.from_lat, args.from_lng)?;
    let destination = LatLng::checked(args.to_lat, args.to_lng)?;

    let planner = Arc::new(DirectPlanner::new().with_step_count(args.steps));
    let engine = AutopilotEngine::new(planner, origin);
    let mut ctl = AutopilotController::new(engine, NullDestinationInput);
    let mut events = ctl.subscribe();

    ctl.select_travel_mode(&args.mode)?;

    println!("Previewing trip {} -> {}", origin, destination);
    let outcome = ctl.preview_suggestion(destination).await;
    info!(?outcome, "preview");
    print_snapshot(&ctl);

    println!("Confirming trip");
    ctl.confirm_start()?;
    print_snapshot(&ctl);

    println!("Pausing via Space");
    ctl.handle_key(Key::Space);
    print_snapshot(&ctl);

    println!("Resuming via Space");
    ctl.handle_key(Key::Space);
    print_snapshot(&ctl);

    println!("Changing speed mid-trip to '{}'", args.change_to);
    let outcome = ctl.request_speed_change().await;
    info!(?outcome, "speed change");
    ctl.select_travel_mode(&args.change_to)?;
    ctl.confirm_start()?;
    print_snapshot(&ctl);

    println!("Stopping trip");
    ctl.stop_trip();
    print_snapshot(&ctl);

    println!("Events:");
    while let Ok(event) = events.try_recv() {
        println!("  {:?}", event);
    }

    Ok(())
}
