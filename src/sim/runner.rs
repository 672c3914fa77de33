use tracing::{debug, warn};

use crate::bodies;
use crate::error::Result;
use crate::physics::MassPerturbation;
use crate::render::{DrawSurface, FrameOutcome, Renderer};
use crate::units::DisplayMetrics;

use super::command::Command;
use super::config::SimConfig;
use super::scheduler::{AnimationScheduler, FrameClock, TickOutcome};
use super::state::SimulationState;

// ---------------------------------------------------------------------------
// Simulator: state + scheduler + renderer behind one command surface
// ---------------------------------------------------------------------------

/// Everything the host talks to. Commands and ticks run on the caller's
/// thread, so a frame never sees a half-applied command.
pub struct Simulator<C: FrameClock> {
    state: SimulationState,
    scheduler: AnimationScheduler<C>,
    renderer: Renderer,
}

impl<C: FrameClock> Simulator<C> {
    pub fn new(config: &SimConfig, clock: C) -> Result<Self> {
        Ok(Self {
            state: SimulationState::from_config(config)?,
            scheduler: AnimationScheduler::new(clock, config.step_size),
            renderer: Renderer::default(),
        })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn scheduler(&self) -> &AnimationScheduler<C> {
        &self.scheduler
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// Apply one control command. On error the previous state is kept and
    /// the rejection is logged.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        debug!(%command, "applying command");
        let result = self.apply_inner(&command);
        if let Err(err) = &result {
            warn!(%command, %err, "command rejected");
        }
        result
    }

    fn apply_inner(&mut self, command: &Command) -> Result<()> {
        let state = &mut self.state;
        match command {
            Command::Start => {
                self.scheduler.start(state);
            }
            Command::Pause => self.scheduler.stop(state),
            Command::ToggleRunning => {
                if state.is_running() {
                    self.scheduler.stop(state);
                } else {
                    self.scheduler.start(state);
                }
            }
            Command::Reset => state.reset(),
            Command::SelectBody(key) => state.change_body(bodies::lookup(key)?)?,
            Command::SelectPreset(key) => state.select_preset(*key)?,
            Command::SetAltitude(km) => state.set_altitude(*km)?,
            Command::SetMass(kg) => state.set_mass(*kg)?,
            Command::SetZoom(level) => {
                state.set_zoom(*level)?;
            }
            Command::ZoomBy(factor) => {
                state.zoom_by(*factor)?;
            }
            Command::ResetZoom => {
                state.reset_zoom();
            }
            Command::ToggleUnits => {
                state.toggle_unit_system();
            }
        }
        Ok(())
    }

    /// Service one display refresh: fire the pending tick, if any, and
    /// render it. Returns the frame produced, or `None` when no tick ran.
    pub fn tick(&mut self, surface: Option<&mut dyn DrawSurface>) -> Option<FrameOutcome> {
        let mut frame = None;
        let renderer = &self.renderer;
        let outcome = self.scheduler.poll(&mut self.state, |state| {
            frame = Some(renderer.render(state, surface));
        });
        match outcome {
            TickOutcome::Advanced { .. } => frame,
            TickOutcome::Stale | TickOutcome::NotScheduled => None,
        }
    }

    /// Redraw the current state without advancing or recording anything.
    pub fn repaint(&self, surface: Option<&mut dyn DrawSurface>) -> FrameOutcome {
        self.renderer.draw(&self.state, surface)
    }

    /// One host frame: a tick while running, a plain repaint otherwise.
    pub fn frame(&mut self, surface: &mut dyn DrawSurface) -> FrameOutcome {
        if self.scheduler.pending().is_some() {
            if let Some(outcome) = self.tick(Some(&mut *surface)) {
                return outcome;
            }
        }
        self.repaint(Some(surface))
    }

    /// Derived metrics for the current satellite, converted for display.
    pub fn metrics(&self) -> Result<DisplayMetrics> {
        let raw = self.state.metrics()?;
        Ok(DisplayMetrics::from_metrics(&raw, self.state.unit_system()))
    }

    /// Switch the non-physical mass correction on or off.
    pub fn set_perturbation(&mut self, perturbation: MassPerturbation) {
        self.state.set_perturbation(perturbation);
    }

    /// Pause and release the tick chain.
    pub fn shutdown(&mut self) {
        self.scheduler.stop(&mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::PresetKey;
    use crate::render::CommandList;
    use crate::sim::{ManualClock, Selection, TRAIL_CAPACITY};
    use crate::units::UnitSystem;
    use crate::SimError;

    fn sim() -> Simulator<ManualClock> {
        Simulator::new(&SimConfig::default(), ManualClock::new()).unwrap()
    }

    #[test]
    fn runs_only_while_started() {
        let mut s = sim();
        let mut canvas = CommandList::new(800.0, 800.0);
        assert!(s.tick(Some(&mut canvas)).is_none());

        s.apply(Command::Start).unwrap();
        for _ in 0..5 {
            assert!(matches!(s.tick(Some(&mut canvas)), Some(FrameOutcome::Drawn { .. })));
        }
        assert_eq!(s.state().trail().len(), 5);
        assert!((s.state().phase_angle() - 0.1).abs() < 1e-12);

        s.apply(Command::Pause).unwrap();
        for _ in 0..20 {
            assert!(s.tick(Some(&mut canvas)).is_none());
            s.frame(&mut canvas);
        }
        assert_eq!(s.state().trail().len(), 5);
        assert!((s.state().phase_angle() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn long_run_keeps_trail_bounded() {
        let mut s = sim();
        let mut canvas = CommandList::new(800.0, 800.0);
        s.apply(Command::Start).unwrap();
        for _ in 0..(3 * TRAIL_CAPACITY) {
            s.frame(&mut canvas);
        }
        assert_eq!(s.state().trail().len(), TRAIL_CAPACITY);
    }

    #[test]
    fn toggle_flips_run_state() {
        let mut s = sim();
        s.apply(Command::ToggleRunning).unwrap();
        assert!(s.state().is_running());
        assert!(s.scheduler().pending().is_some());
        s.apply(Command::ToggleRunning).unwrap();
        assert!(!s.state().is_running());
        assert!(s.scheduler().pending().is_none());
    }

    #[test]
    fn body_switch_resets_history_but_keeps_running() {
        let mut s = sim();
        let mut canvas = CommandList::new(800.0, 800.0);
        s.apply(Command::Start).unwrap();
        for _ in 0..10 {
            s.tick(Some(&mut canvas));
        }
        s.apply(Command::SelectBody("moon".into())).unwrap();
        assert_eq!(s.state().body().key, "moon");
        assert_eq!(s.state().phase_angle(), 0.0);
        assert!(s.state().trail().is_empty());
        assert!(s.state().is_running());
        assert_eq!(s.state().satellite().altitude, 200.0);
    }

    #[test]
    fn unknown_body_keeps_current_one() {
        let mut s = sim();
        let err = s.apply(Command::SelectBody("krypton".into())).unwrap_err();
        assert!(matches!(err, SimError::UnknownBody { .. }));
        assert_eq!(s.state().body().key, "earth");
    }

    #[test]
    fn rejected_slider_values_keep_last_good_state() {
        let mut s = sim();
        s.apply(Command::SetAltitude(1_000.0)).unwrap();
        assert!(s.apply(Command::SetAltitude(-10.0)).is_err());
        assert!(s.apply(Command::SetMass(0.0)).is_err());
        assert!(s.apply(Command::ZoomBy(f64::NAN)).is_err());
        assert_eq!(s.state().satellite().altitude, 1_000.0);
        assert!(s.metrics().unwrap().orbital_velocity.is_finite());
    }

    #[test]
    fn metrics_follow_unit_toggle() {
        let mut s = sim();
        s.apply(Command::SetAltitude(400.0)).unwrap();
        let metric = s.metrics().unwrap();
        assert!((metric.orbital_velocity - 7.67).abs() < 0.01);
        assert!((metric.distance_from_center - 6_771.0).abs() < 1e-9);

        s.apply(Command::ToggleUnits).unwrap();
        let imperial = s.metrics().unwrap();
        assert_eq!(imperial.units, UnitSystem::Imperial);
        assert!((imperial.orbital_velocity - metric.orbital_velocity * 2_236.94).abs() < 1e-6);
        assert_eq!(imperial.period_hours, metric.period_hours);
        assert_eq!(s.state().satellite().altitude, 400.0, "internal state stays metric");
    }

    #[test]
    fn preset_then_slider_goes_custom() {
        let mut s = sim();
        s.apply(Command::SelectPreset(PresetKey::Medium)).unwrap();
        assert_eq!(s.state().selection(), Selection::Preset(PresetKey::Medium));
        s.apply(Command::SetMass(750.0)).unwrap();
        assert_eq!(s.state().selection(), Selection::Custom);
    }

    #[test]
    fn zoom_commands() {
        let mut s = sim();
        let default = s.state().zoom();
        s.apply(Command::SetZoom(1.0)).unwrap();
        assert_eq!(s.state().zoom(), 0.1);
        s.apply(Command::ZoomBy(0.0001)).unwrap();
        assert_eq!(s.state().zoom(), 0.005);
        s.apply(Command::ResetZoom).unwrap();
        assert_eq!(s.state().zoom(), default);
    }

    #[test]
    fn perturbation_is_opt_in() {
        let mut s = sim();
        s.apply(Command::SetMass(100_000.0)).unwrap();
        let strict = s.metrics().unwrap();
        s.set_perturbation(MassPerturbation::enabled());
        let perturbed = s.metrics().unwrap();
        assert!(perturbed.orbital_velocity > strict.orbital_velocity);
        assert!(perturbed.period_hours < strict.period_hours);
        assert_eq!(perturbed.escape_velocity, strict.escape_velocity);
    }

    #[test]
    fn shutdown_cancels_pending_tick() {
        let mut s = sim();
        s.apply(Command::Start).unwrap();
        s.shutdown();
        assert!(s.scheduler().pending().is_none());
        assert!(!s.scheduler().clock().has_outstanding());
        assert!(!s.state().is_running());
    }
}
