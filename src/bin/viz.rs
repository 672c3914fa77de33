use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};
use nalgebra::{Point2, Vector2};
use tracing_subscriber::EnvFilter;

use orbit_sim::bodies;
use orbit_sim::physics::{self, MassPerturbation};
use orbit_sim::presets::PresetKey;
use orbit_sim::render::{DrawCommand, DrawSurface, Rgba, Stroke};
use orbit_sim::sim::{FrameClock, Selection};
use orbit_sim::{Command, SimConfig, Simulator};

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(15, 23, 42);
const GRADIENT_RINGS: usize = 24;
const CIRCLE_SEGMENTS: usize = 128;

type AppError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = SimConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Orbital Mechanics Simulator",
        options,
        Box::new(move |cc: &eframe::CreationContext<'_>| -> Result<Box<dyn eframe::App>, AppError> {
            let clock = EguiClock(cc.egui_ctx.clone());
            let sim = Simulator::new(&config, clock)?;
            Ok(Box::new(OrbitViz { sim, config }))
        }),
    )
}

// ---------------------------------------------------------------------------
// Host glue: repaint requests as the tick source, painter as the surface
// ---------------------------------------------------------------------------

struct EguiClock(egui::Context);

impl FrameClock for EguiClock {
    fn request_frame(&mut self) {
        self.0.request_repaint();
    }
}

struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
}

impl PainterSurface<'_> {
    fn pos(&self, p: Point2<f64>) -> egui::Pos2 {
        self.rect.min + egui::vec2(p.x as f32, p.y as f32)
    }

    fn circle_points(&self, center: Point2<f64>, radius: f64) -> Vec<egui::Pos2> {
        (0..=CIRCLE_SEGMENTS)
            .map(|i| {
                let a = std::f64::consts::TAU * i as f64 / CIRCLE_SEGMENTS as f64;
                self.pos(center + Vector2::new(a.cos(), a.sin()) * radius)
            })
            .collect()
    }
}

fn color(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn stroke(s: &Stroke) -> egui::Stroke {
    egui::Stroke::new(s.width as f32, color(s.color))
}

fn lerp(a: Rgba, b: Rgba, t: f64) -> Rgba {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    Rgba::rgba(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}

impl DrawSurface for PainterSurface<'_> {
    fn size(&self) -> Vector2<f64> {
        Vector2::new(self.rect.width() as f64, self.rect.height() as f64)
    }

    fn draw(&mut self, command: DrawCommand) {
        let p = self.painter;
        match command {
            DrawCommand::Clear => {
                p.rect_filled(self.rect, 0.0, BACKGROUND);
            }
            DrawCommand::RadialGradientDisc { center, radius, inner, outer } => {
                // Painted outside-in so each ring covers the previous one.
                for i in (1..=GRADIENT_RINGS).rev() {
                    let t = i as f64 / GRADIENT_RINGS as f64;
                    let c = color(lerp(inner, outer, t));
                    p.circle_filled(self.pos(center), (radius * t) as f32, c);
                }
            }
            DrawCommand::FillCircle { center, radius, color: c } => {
                p.circle_filled(self.pos(center), radius as f32, color(c));
            }
            DrawCommand::StrokeCircle { center, radius, stroke: s } => match s.dash {
                Some((dash, gap)) => {
                    let points = self.circle_points(center, radius);
                    p.extend(egui::Shape::dashed_line(&points, stroke(&s), dash as f32, gap as f32));
                }
                None => {
                    p.circle_stroke(self.pos(center), radius as f32, stroke(&s));
                }
            },
            DrawCommand::Line { from, to, stroke: s } => {
                p.line_segment([self.pos(from), self.pos(to)], stroke(&s));
            }
            DrawCommand::Polyline { points, stroke: s } => {
                let points = points.into_iter().map(|q| self.pos(q)).collect();
                p.add(egui::Shape::line(points, stroke(&s)));
            }
            DrawCommand::Text { center, text, size, color: c } => {
                p.text(
                    self.pos(center),
                    egui::Align2::CENTER_CENTER,
                    text,
                    egui::FontId::proportional(size as f32),
                    color(c),
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

struct OrbitViz {
    sim: Simulator<EguiClock>,
    config: SimConfig,
}

impl OrbitViz {
    fn send(&mut self, command: Command) {
        // Rejections are logged by the simulator; the last good state stays.
        let _ = self.sim.apply(command);
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let state = self.sim.state();
        let running = state.is_running();
        let body_key = state.body().key;
        let selection = state.selection();
        let mut altitude = state.satellite().altitude;
        let mut mass = state.satellite().mass;
        let mut perturbed = state.perturbation().enabled;

        ui.heading("Controls");
        ui.horizontal(|ui| {
            if ui.button(if running { "Pause" } else { "Start" }).clicked() {
                self.send(Command::ToggleRunning);
            }
            if ui.button("Reset").clicked() {
                self.send(Command::Reset);
            }
        });

        ui.separator();
        egui::ComboBox::from_label("Central body")
            .selected_text(bodies::lookup_or_default(body_key).name)
            .show_ui(ui, |ui| {
                for body in bodies::all() {
                    if ui.selectable_label(body.key == body_key, body.name).clicked() {
                        self.send(Command::SelectBody(body.key.to_string()));
                    }
                }
            });

        let preset_label = match selection {
            Selection::Preset(key) => key.display_name(),
            Selection::Custom => "Custom",
        };
        egui::ComboBox::from_label("Preset orbit")
            .selected_text(preset_label)
            .show_ui(ui, |ui| {
                for key in PresetKey::ALL {
                    let current = selection == Selection::Preset(key);
                    if ui.selectable_label(current, key.display_name()).clicked() {
                        self.send(Command::SelectPreset(key));
                    }
                }
            });

        ui.separator();
        let alt = ui.add(
            egui::Slider::new(&mut altitude, 0.0..=250_000.0)
                .logarithmic(true)
                .text("altitude (km)"),
        );
        if alt.changed() {
            self.send(Command::SetAltitude(altitude));
        }
        let m = ui.add(
            egui::Slider::new(&mut mass, 100.0..=500_000.0)
                .logarithmic(true)
                .text("mass (kg)"),
        );
        if m.changed() {
            self.send(Command::SetMass(mass));
        }

        ui.horizontal(|ui| {
            ui.label("Zoom");
            if ui.button("-").clicked() {
                self.send(Command::ZoomBy(1.0 / 1.25));
            }
            if ui.button("+").clicked() {
                self.send(Command::ZoomBy(1.25));
            }
            if ui.button("fit").clicked() {
                self.send(Command::ResetZoom);
            }
        });
        if ui.button("Toggle metric / imperial").clicked() {
            self.send(Command::ToggleUnits);
        }
        if ui
            .checkbox(&mut perturbed, "Mass affects speed (non-physical)")
            .changed()
        {
            let p = if perturbed { MassPerturbation::enabled() } else { self.config.perturbation };
            self.sim.set_perturbation(p);
        }
    }

    fn metrics(&self, ui: &mut egui::Ui) {
        ui.heading("Orbital parameters");
        match self.sim.metrics() {
            Ok(m) => {
                let v = m.units.velocity_label();
                let d = m.units.distance_label();
                egui::Grid::new("metrics").num_columns(2).show(ui, |ui| {
                    ui.label("Orbital velocity");
                    ui.monospace(format!("{:.2} {}", m.orbital_velocity, v));
                    ui.end_row();
                    ui.label("Orbital period");
                    ui.monospace(format!("{:.2} h", m.period_hours));
                    ui.end_row();
                    ui.label("Escape velocity");
                    ui.monospace(format!("{:.2} {}", m.escape_velocity, v));
                    ui.end_row();
                    ui.label("Gravitational force");
                    ui.monospace(format!("{:.1} N", m.gravitational_force));
                    ui.end_row();
                    ui.label("Distance from center");
                    ui.monospace(format!("{:.0} {}", m.distance_from_center, d));
                    ui.end_row();
                    ui.label("Surface gravity");
                    ui.monospace(format!("{:.2} m/s²", self.sim.state().body().surface_gravity));
                    ui.end_row();
                });
            }
            Err(err) => {
                ui.colored_label(egui::Color32::LIGHT_RED, err.to_string());
            }
        }
    }

    fn speed_curve(&self, ui: &mut egui::Ui) {
        let state = self.sim.state();
        let body = state.body();
        let current = state.satellite().altitude;
        let max_alt = (current * 2.0).max(body.radius * 4.0);
        let curve: PlotPoints = (0..=200)
            .filter_map(|i| {
                let alt = max_alt * i as f64 / 200.0;
                physics::orbital_velocity(body, alt).ok().map(|v| [alt, v])
            })
            .collect();
        let marker: PlotPoints = physics::orbital_velocity(body, current)
            .map(|v| vec![[current, v]])
            .unwrap_or_default()
            .into();

        ui.label(format!("Circular speed around {} (km/s vs km)", body.name));
        Plot::new("speed_curve")
            .height(180.0)
            .x_axis_label("Altitude (km)")
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new("v(alt)", curve));
                plot_ui.points(Points::new("satellite", marker).radius(4.0));
            });
    }
}

impl eframe::App for OrbitViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("controls").min_width(320.0).show(ctx, |ui| {
            self.controls(ui);
            ui.separator();
            self.metrics(ui);
            ui.separator();
            self.speed_curve(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let side = (self.config.canvas_width.min(self.config.canvas_height) as f32)
                .min(ui.available_width())
                .min(ui.available_height());
            let (response, painter) =
                ui.allocate_painter(egui::vec2(side, side), egui::Sense::hover());
            let mut surface = PainterSurface { painter: &painter, rect: response.rect };
            self.sim.frame(&mut surface);
        });
    }
}
