use orbit_sim::bodies;
use orbit_sim::presets::PresetKey;
use orbit_sim::render::{CommandList, FrameOutcome};
use orbit_sim::sim::ManualClock;
use orbit_sim::{Command, SimConfig, Simulator};

fn main() -> orbit_sim::Result<()> {
    let config = SimConfig::default();
    let mut canvas = CommandList::new(config.canvas_width, config.canvas_height);
    let mut sim = Simulator::new(&config, ManualClock::new())?;
    sim.apply(Command::Start)?;

    for body in bodies::all() {
        sim.apply(Command::SelectBody(body.key.into()))?;
        println!("{} (zoom {:.4} px/km)", body.name, sim.state().zoom());

        for key in PresetKey::ALL {
            sim.apply(Command::SelectPreset(key))?;
            let outcome = sim.frame(&mut canvas);
            let m = sim.metrics()?;
            let shown = match outcome {
                FrameOutcome::Drawn { .. } => "visible",
                FrameOutcome::OrbitTooLarge => "zoom out",
                FrameOutcome::NoSurface => "no canvas",
            };
            println!(
                "  {:<13} {:>9.0} km  {:>6.2} km/s  {:>8.2} h  [{}]",
                key.display_name(),
                sim.state().satellite().altitude,
                m.orbital_velocity,
                m.period_hours,
                shown,
            );
        }
    }

    sim.shutdown();
    Ok(())
}
