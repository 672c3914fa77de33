use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use orbit_sim::bodies;
use orbit_sim::physics::{MassPerturbation, OrbitalMetrics};
use orbit_sim::presets;
use orbit_sim::render::{CommandList, FrameOutcome};
use orbit_sim::sim::{ManualClock, SatelliteState};
use orbit_sim::{Command, SimConfig, Simulator};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> orbit_sim::Result<()> {
    let config = SimConfig::default();

    println!();
    println!("====================================================================");
    println!("  CIRCULAR ORBIT REPORT");
    println!("====================================================================");

    // -----------------------------------------------------------------------
    // Preset tiers for every catalogued body
    // -----------------------------------------------------------------------
    for body in bodies::all() {
        println!();
        println!(
            "  {:<8}  R = {:>8.1} km   M = {:.3e} kg   g = {:>5.2} m/s^2",
            body.name, body.radius, body.mass, body.surface_gravity
        );
        println!("  ──────────────────────────────────────────────────────────────────");
        println!(
            "  {:<13} {:>10} {:>9} {:>9} {:>9} {:>12}",
            "preset", "alt (km)", "v (km/s)", "T (h)", "ve (km/s)", "F (N)"
        );
        for def in presets::resolve_presets(body)?.values() {
            let sat = SatelliteState::circular(def.altitude, def.mass, def.derived_velocity);
            let m = OrbitalMetrics::compute(body, &sat, &MassPerturbation::disabled())?;
            println!(
                "  {:<13} {:>10.1} {:>9.3} {:>9.3} {:>9.3} {:>12.1}",
                def.display_name,
                def.altitude,
                m.orbital_velocity,
                m.period_hours,
                m.escape_velocity,
                m.gravitational_force,
            );
        }
    }

    // -----------------------------------------------------------------------
    // Short animated session against an off-screen canvas
    // -----------------------------------------------------------------------
    println!();
    println!("  Animated session ({}x{} px, {} rad/tick)",
        config.canvas_width, config.canvas_height, config.step_size);
    println!("  ──────────────────────────────────────────────────────────────────");

    let mut canvas = CommandList::new(config.canvas_width, config.canvas_height);
    let mut sim = Simulator::new(&config, ManualClock::new())?;
    sim.apply(Command::SetAltitude(400.0))?;
    sim.apply(Command::Start)?;

    let frames = (std::f64::consts::TAU / config.step_size).ceil() as usize;
    let mut drawn = 0;
    for _ in 0..frames {
        if let FrameOutcome::Drawn { .. } = sim.frame(&mut canvas) {
            drawn += 1;
        }
    }
    let m = sim.metrics()?;
    println!(
        "  {} frames ({} drawn), phase {:.3} rad, trail {} pts",
        frames,
        drawn,
        sim.state().phase_angle(),
        sim.state().trail().len()
    );
    println!(
        "  v = {:.2} {}   T = {:.2} h   ve = {:.2} {}   r = {:.0} {}",
        m.orbital_velocity,
        m.units.velocity_label(),
        m.period_hours,
        m.escape_velocity,
        m.units.velocity_label(),
        m.distance_from_center,
        m.units.distance_label(),
    );

    sim.apply(Command::SelectBody("moon".into()))?;
    sim.apply(Command::ToggleUnits)?;
    let m = sim.metrics()?;
    println!(
        "  -> Moon: alt {:.0} km, zoom {:.4} px/km, v = {:.0} {}",
        sim.state().satellite().altitude,
        sim.state().zoom(),
        m.orbital_velocity,
        m.units.velocity_label(),
    );

    sim.apply(Command::SetAltitude(50_000.0))?;
    let outcome = sim.frame(&mut canvas);
    println!("  -> 50 000 km lunar orbit at default zoom: {:?}", outcome);

    sim.shutdown();
    println!("====================================================================");
    println!();
    Ok(())
}
