use nalgebra::{Point2, Vector2};
use tracing::trace;

use crate::sim::SimulationState;

use super::surface::{DrawCommand, DrawSurface, Rgba, Stroke};

pub const ORBIT_TOO_LARGE: &str = "Orbit too large - zoom out";

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Colours and fixed pixel sizes of the scene.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    pub glow_gap: f64,
    pub glow_width: f64,
    pub glow_alpha: f32,
    pub orbit_path: Stroke,
    pub satellite: Rgba,
    pub satellite_radius: f64,
    pub satellite_glow_radius: f64,
    pub satellite_glow_alpha: f32,
    pub velocity: Stroke,
    pub velocity_length: f64,
    pub trail: Stroke,
    pub notice: Rgba,
    pub notice_size: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        let blue = Rgba::rgb(0x3b, 0x82, 0xf6);
        let orange = Rgba::rgb(0xf9, 0x73, 0x16);
        Self {
            glow_gap: 5.0,
            glow_width: 3.0,
            glow_alpha: 0.3,
            orbit_path: Stroke::dashed(blue.with_alpha(0.5), 2.0, 5.0, 5.0),
            satellite: orange,
            satellite_radius: 4.0,
            satellite_glow_radius: 8.0,
            satellite_glow_alpha: 0.3,
            velocity: Stroke::solid(Rgba::rgb(0x22, 0xc5, 0x5e), 2.0),
            velocity_length: 10.0,
            trail: Stroke::solid(orange.with_alpha(0.3), 1.0),
            notice: Rgba::rgb(0xf8, 0xfa, 0xfc),
            notice_size: 18.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// No surface to draw on; nothing happened.
    NoSurface,
    /// Orbit does not fit at the current zoom; a notice was drawn instead.
    OrbitTooLarge,
    /// Full scene drawn with the satellite at this screen position.
    Drawn { satellite: Point2<f64> },
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    pub style: RenderStyle,
}

impl Renderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    /// Draw a frame and append the satellite position to the trail. Nothing
    /// is appended when the orbit is undrawable or there is no surface.
    pub fn render(
        &self,
        state: &mut SimulationState,
        surface: Option<&mut dyn DrawSurface>,
    ) -> FrameOutcome {
        let outcome = self.draw(state, surface);
        if let FrameOutcome::Drawn { satellite } = outcome {
            state.record_trail_point(satellite);
        }
        outcome
    }

    /// Draw a frame without touching the state (repaints while paused).
    pub fn draw(&self, state: &SimulationState, surface: Option<&mut dyn DrawSurface>) -> FrameOutcome {
        let Some(surface) = surface else {
            return FrameOutcome::NoSurface;
        };
        let s = &self.style;
        let size = surface.size();
        let center = surface.center();
        let extent = size.x.min(size.y) / 2.0;
        let zoom = state.zoom();
        let body = state.body();

        surface.draw(DrawCommand::Clear);

        let body_px = body.radius * zoom;
        surface.draw(DrawCommand::RadialGradientDisc {
            center,
            radius: body_px,
            inner: body.colors.core,
            outer: body.colors.limb,
        });
        surface.draw(DrawCommand::StrokeCircle {
            center,
            radius: body_px + s.glow_gap,
            stroke: Stroke::solid(body.colors.limb.with_alpha(s.glow_alpha), s.glow_width),
        });

        let orbit_px = state.orbit_radius() * zoom;
        if orbit_px >= extent {
            trace!(orbit_px, extent, "orbit exceeds canvas");
            surface.draw(DrawCommand::Text {
                center,
                text: ORBIT_TOO_LARGE.to_string(),
                size: s.notice_size,
                color: s.notice,
            });
            return FrameOutcome::OrbitTooLarge;
        }

        surface.draw(DrawCommand::StrokeCircle { center, radius: orbit_px, stroke: s.orbit_path });

        if state.trail().len() > 1 {
            surface.draw(DrawCommand::Polyline {
                points: state.trail().iter().copied().collect(),
                stroke: s.trail,
            });
        }

        let (sin, cos) = state.phase_angle().sin_cos();
        let satellite = center + Vector2::new(cos, sin) * orbit_px;
        surface.draw(DrawCommand::FillCircle {
            center: satellite,
            radius: s.satellite_glow_radius,
            color: s.satellite.with_alpha(s.satellite_glow_alpha),
        });
        surface.draw(DrawCommand::FillCircle { center: satellite, radius: s.satellite_radius, color: s.satellite });

        // Direction of travel only: perpendicular to the radius, fixed length.
        let tangent = Vector2::new(-sin, cos) * s.velocity_length;
        surface.draw(DrawCommand::Line { from: satellite, to: satellite + tangent, stroke: s.velocity });

        FrameOutcome::Drawn { satellite }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::bodies;
    use crate::render::CommandList;
    use crate::sim::TRAIL_CAPACITY;

    fn earth_state() -> SimulationState {
        SimulationState::new(bodies::lookup("earth").unwrap()).unwrap()
    }

    #[test]
    fn satellite_starts_on_positive_x_axis() {
        let mut state = earth_state();
        let mut canvas = CommandList::new(800.0, 800.0);
        let outcome = Renderer::default().render(&mut state, Some(&mut canvas));

        let expected_r = state.orbit_radius() * state.zoom();
        match outcome {
            FrameOutcome::Drawn { satellite } => {
                assert!((satellite.x - (400.0 + expected_r)).abs() < 1e-9);
                assert!((satellite.y - 400.0).abs() < 1e-9);
            }
            other => panic!("expected a drawn frame, got {:?}", other),
        }
        assert_eq!(state.trail().len(), 1);
        assert_eq!(canvas.commands()[0], DrawCommand::Clear);
        assert!(canvas.commands().iter().any(|c| matches!(
            c,
            DrawCommand::StrokeCircle { stroke: Stroke { dash: Some(_), .. }, .. }
        )), "dashed orbit path missing");
    }

    #[test]
    fn velocity_indicator_is_tangential() {
        let mut state = earth_state();
        state.advance_phase(FRAC_PI_2);
        let mut canvas = CommandList::new(800.0, 800.0);
        let r = Renderer::default();
        let FrameOutcome::Drawn { satellite } = r.draw(&state, Some(&mut canvas)) else {
            panic!("frame not drawn");
        };
        let line = canvas.commands().iter().find_map(|c| match c {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        }).unwrap();
        assert_eq!(line.0, satellite);
        let dir = line.1 - line.0;
        let radial = satellite - Point2::new(400.0, 400.0);
        assert!(dir.dot(&radial).abs() < 1e-9, "indicator must be perpendicular");
        assert!((dir.norm() - r.style.velocity_length).abs() < 1e-9);
    }

    #[test]
    fn oversize_orbit_shows_notice_and_skips_trail() {
        let mut state = earth_state();
        state.set_altitude(500_000.0).unwrap();
        state.set_zoom(0.1).unwrap();
        let mut canvas = CommandList::new(800.0, 800.0);
        let outcome = Renderer::default().render(&mut state, Some(&mut canvas));

        assert_eq!(outcome, FrameOutcome::OrbitTooLarge);
        assert!(state.trail().is_empty());
        let cmds = canvas.commands();
        assert!(cmds.iter().any(|c| matches!(c, DrawCommand::Text { text, .. } if text == ORBIT_TOO_LARGE)));
        assert!(!cmds.iter().any(|c| matches!(c, DrawCommand::FillCircle { .. } | DrawCommand::Polyline { .. } | DrawCommand::Line { .. })));
    }

    #[test]
    fn orbit_exactly_at_extent_is_too_large() {
        let mut state = earth_state();
        state.set_zoom(0.01).unwrap();
        // orbit radius 40_000 km * 0.01 px/km = 400 px = half of 800
        state.set_altitude(40_000.0 - state.body().radius).unwrap();
        let mut canvas = CommandList::new(800.0, 1_000.0);
        assert_eq!(Renderer::default().draw(&state, Some(&mut canvas)), FrameOutcome::OrbitTooLarge);
    }

    #[test]
    fn missing_surface_is_a_no_op() {
        let mut state = earth_state();
        assert_eq!(Renderer::default().render(&mut state, None), FrameOutcome::NoSurface);
        assert!(state.trail().is_empty());
    }

    #[test]
    fn trail_drawn_from_history_and_capped() {
        let mut state = earth_state();
        let renderer = Renderer::default();
        let mut canvas = CommandList::new(800.0, 800.0);
        for _ in 0..(TRAIL_CAPACITY + 50) {
            state.advance_phase(0.02);
            renderer.render(&mut state, Some(&mut canvas));
        }
        assert_eq!(state.trail().len(), TRAIL_CAPACITY);
        let drawn = canvas.commands().iter().find_map(|c| match c {
            DrawCommand::Polyline { points, .. } => Some(points.len()),
            _ => None,
        });
        assert_eq!(drawn, Some(TRAIL_CAPACITY));
    }

    #[test]
    fn draw_does_not_append() {
        let state = earth_state();
        let mut canvas = CommandList::new(800.0, 800.0);
        Renderer::default().draw(&state, Some(&mut canvas));
        assert!(state.trail().is_empty());
    }
}
