use orbit_sim::render::{CommandList, Renderer};
use orbit_sim::sim::{AnimationScheduler, FrameClock, TickOutcome};
use orbit_sim::{bodies, SimulationState};

/// A clock that only allows a fixed budget of frames, as a host with a
/// frame limiter might.
struct BudgetClock {
    budget: u32,
    requested: u32,
}

impl FrameClock for BudgetClock {
    fn request_frame(&mut self) {
        self.requested += 1;
    }

    fn cancel_frame(&mut self) {
        println!("  clock: outstanding frame withdrawn");
    }
}

fn main() -> orbit_sim::Result<()> {
    let mut state = SimulationState::new(bodies::lookup("mars")?)?;
    let renderer = Renderer::default();
    let mut canvas = CommandList::new(600.0, 600.0);
    let mut scheduler = AnimationScheduler::new(BudgetClock { budget: 90, requested: 0 }, 0.05);

    let stale = scheduler.start(&mut state);
    while scheduler.clock().requested <= scheduler.clock().budget {
        let outcome = scheduler.poll(&mut state, |s| {
            renderer.render(s, Some(&mut canvas));
        });
        if !matches!(outcome, TickOutcome::Advanced { .. }) {
            break;
        }
    }
    scheduler.stop(&mut state);

    println!("Mars, {} ticks", scheduler.ticks());
    println!("  phase {:.2} rad, trail {} pts", state.phase_angle(), state.trail().len());

    // A callback captured before stop() is now harmless.
    let again = scheduler.fire(stale, &mut state, |s| {
        renderer.render(s, Some(&mut canvas));
    });
    println!("  stale tick after stop: {:?}", again);
    Ok(())
}
