use tracing::{debug, trace};

use super::state::SimulationState;

// ---------------------------------------------------------------------------
// Frame clock: the host's display-refresh callback source
// ---------------------------------------------------------------------------

/// Host hook that delivers one callback per display refresh.
///
/// Implement this to plug the scheduler into a windowing toolkit. The
/// scheduler asks for at most one outstanding frame at a time.
pub trait FrameClock {
    /// Ask for a callback on the next display refresh.
    fn request_frame(&mut self);

    /// Withdraw the outstanding request, if the host supports that.
    fn cancel_frame(&mut self) {}
}

/// Clock driven by hand: records requests, fires nothing on its own.
/// Used by headless runs and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    pub requested: u64,
    pub cancelled: u64,
    outstanding: bool,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame request is waiting to be serviced.
    pub fn has_outstanding(&self) -> bool {
        self.outstanding
    }
}

impl FrameClock for ManualClock {
    fn request_frame(&mut self) {
        self.requested += 1;
        self.outstanding = true;
    }

    fn cancel_frame(&mut self) {
        self.cancelled += 1;
        self.outstanding = false;
    }
}

impl<C: FrameClock + ?Sized> FrameClock for &mut C {
    fn request_frame(&mut self) {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self) {
        (**self).cancel_frame()
    }
}

// ---------------------------------------------------------------------------
// Animation scheduler
// ---------------------------------------------------------------------------

/// Identifies one scheduled tick. A token is only honoured if it is still
/// the scheduler's pending token; anything issued before a `stop()` or an
/// earlier tick of the same run is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken {
    generation: u64,
    seq: u64,
}

impl TickToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Phase advanced, frame rendered, next tick scheduled.
    Advanced { next: TickToken },
    /// The token was superseded or the simulation is no longer running.
    Stale,
    /// No tick is pending.
    NotScheduled,
}

/// Cooperative per-refresh tick driver. Each fired tick advances the phase
/// by a fixed angle, renders, and reschedules itself. Dropping the
/// scheduler cancels the pending tick.
pub struct AnimationScheduler<C: FrameClock> {
    clock: C,
    step_size: f64,
    generation: u64,
    seq: u64,
    pending: Option<TickToken>,
    ticks: u64,
}

impl<C: FrameClock> AnimationScheduler<C> {
    pub fn new(clock: C, step_size: f64) -> Self {
        Self { clock, step_size, generation: 0, seq: 0, pending: None, ticks: 0 }
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn pending(&self) -> Option<TickToken> {
        self.pending
    }

    /// Ticks fired since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mark the simulation running and schedule the first tick. If a tick
    /// is already pending it is reused.
    pub fn start(&mut self, state: &mut SimulationState) -> TickToken {
        state.start();
        if let Some(token) = self.pending {
            return token;
        }
        self.generation += 1;
        debug!(generation = self.generation, "tick chain started");
        self.schedule()
    }

    /// Pause the simulation and cancel the pending tick.
    pub fn stop(&mut self, state: &mut SimulationState) {
        state.pause();
        self.cancel();
    }

    /// Drop the pending tick and invalidate every token issued so far.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            self.clock.cancel_frame();
            debug!(generation = self.generation, "pending tick cancelled");
        }
        self.generation += 1;
    }

    /// Service a display refresh for `token`. Running state is checked here,
    /// at fire time, so a tick that outlived a pause does nothing.
    pub fn fire<F>(&mut self, token: TickToken, state: &mut SimulationState, render: F) -> TickOutcome
    where
        F: FnOnce(&mut SimulationState),
    {
        if self.pending != Some(token) {
            trace!(?token, "stale tick ignored");
            return TickOutcome::Stale;
        }
        if !state.is_running() {
            // Paused without going through stop(): end the chain here.
            self.cancel();
            return TickOutcome::Stale;
        }

        self.pending = None;
        self.ticks += 1;
        state.advance_phase(self.step_size);
        render(state);
        TickOutcome::Advanced { next: self.schedule() }
    }

    /// Fire the pending tick, if there is one.
    pub fn poll<F>(&mut self, state: &mut SimulationState, render: F) -> TickOutcome
    where
        F: FnOnce(&mut SimulationState),
    {
        match self.pending {
            Some(token) => self.fire(token, state, render),
            None => TickOutcome::NotScheduled,
        }
    }

    fn schedule(&mut self) -> TickToken {
        self.seq += 1;
        let token = TickToken { generation: self.generation, seq: self.seq };
        self.pending = Some(token);
        self.clock.request_frame();
        token
    }
}

impl<C: FrameClock> Drop for AnimationScheduler<C> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies;
    use nalgebra::Point2;

    fn state() -> SimulationState {
        SimulationState::new(bodies::lookup("earth").unwrap()).unwrap()
    }

    fn append(s: &mut SimulationState) {
        s.record_trail_point(Point2::new(s.phase_angle(), 0.0));
    }

    #[test]
    fn each_tick_advances_by_fixed_step() {
        let mut s = state();
        let mut sched = AnimationScheduler::new(ManualClock::new(), 0.02);
        sched.start(&mut s);
        for _ in 0..10 {
            assert!(matches!(sched.poll(&mut s, append), TickOutcome::Advanced { .. }));
        }
        assert!((s.phase_angle() - 0.2).abs() < 1e-12);
        assert_eq!(s.trail().len(), 10);
        assert_eq!(sched.ticks(), 10);
        // one request per scheduled tick, including the one now pending
        assert_eq!(sched.clock().requested, 11);
    }

    #[test]
    fn pause_stops_all_further_frames() {
        let mut s = state();
        let mut sched = AnimationScheduler::new(ManualClock::new(), 0.02);
        sched.start(&mut s);
        sched.poll(&mut s, append);
        let stale = sched.pending().unwrap();

        sched.stop(&mut s);
        let phase = s.phase_angle();
        let trail = s.trail().len();

        assert_eq!(sched.fire(stale, &mut s, append), TickOutcome::Stale);
        for _ in 0..100 {
            assert_eq!(sched.poll(&mut s, append), TickOutcome::NotScheduled);
        }
        assert_eq!(s.phase_angle(), phase);
        assert_eq!(s.trail().len(), trail);
        assert_eq!(sched.clock().cancelled, 1);
        assert!(!sched.clock().has_outstanding());
    }

    #[test]
    fn stale_token_from_previous_run_is_ignored() {
        let mut s = state();
        let mut sched = AnimationScheduler::new(ManualClock::new(), 0.02);
        let first = sched.start(&mut s);
        sched.stop(&mut s);
        let second = sched.start(&mut s);
        assert_ne!(first, second);
        assert!(second.generation() > first.generation());

        assert_eq!(sched.fire(first, &mut s, append), TickOutcome::Stale);
        assert_eq!(s.phase_angle(), 0.0);
        assert!(matches!(sched.fire(second, &mut s, append), TickOutcome::Advanced { .. }));
    }

    #[test]
    fn token_fires_at_most_once() {
        let mut s = state();
        let mut sched = AnimationScheduler::new(ManualClock::new(), 0.5);
        let t = sched.start(&mut s);
        assert!(matches!(sched.fire(t, &mut s, append), TickOutcome::Advanced { .. }));
        assert_eq!(sched.fire(t, &mut s, append), TickOutcome::Stale);
        assert_eq!(s.phase_angle(), 0.5);
    }

    #[test]
    fn external_pause_is_caught_at_fire_time() {
        let mut s = state();
        let mut sched = AnimationScheduler::new(ManualClock::new(), 0.02);
        let t = sched.start(&mut s);
        s.pause();
        assert_eq!(sched.fire(t, &mut s, append), TickOutcome::Stale);
        assert!(sched.pending().is_none());
        assert_eq!(s.phase_angle(), 0.0);
        assert!(s.trail().is_empty());
    }

    #[test]
    fn start_twice_keeps_one_chain() {
        let mut s = state();
        let mut sched = AnimationScheduler::new(ManualClock::new(), 0.02);
        let a = sched.start(&mut s);
        let b = sched.start(&mut s);
        assert_eq!(a, b);
        assert_eq!(sched.clock().requested, 1);
    }

    #[test]
    fn drop_releases_pending_tick() {
        let mut clock = ManualClock::new();
        {
            let mut s = state();
            let mut sched = AnimationScheduler::new(&mut clock, 0.02);
            sched.start(&mut s);
        }
        assert_eq!(clock.requested, 1);
        assert_eq!(clock.cancelled, 1);
        assert!(!clock.has_outstanding());
    }
}
