use nalgebra::{Point2, Vector2};

// ---------------------------------------------------------------------------
// Colours and strokes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with opacity `alpha` in [0, 1].
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
    /// (dash, gap) lengths in px; `None` for a solid line.
    pub dash: Option<(f64, f64)>,
}

impl Stroke {
    pub fn solid(color: Rgba, width: f64) -> Self {
        Self { color, width, dash: None }
    }

    pub fn dashed(color: Rgba, width: f64, dash: f64, gap: f64) -> Self {
        Self { color, width, dash: Some((dash, gap)) }
    }
}

// ---------------------------------------------------------------------------
// Draw commands and the surface they target
// ---------------------------------------------------------------------------

/// One primitive issued against a 2D surface. Coordinates are pixels with
/// the origin at the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    RadialGradientDisc { center: Point2<f64>, radius: f64, inner: Rgba, outer: Rgba },
    FillCircle { center: Point2<f64>, radius: f64, color: Rgba },
    StrokeCircle { center: Point2<f64>, radius: f64, stroke: Stroke },
    Line { from: Point2<f64>, to: Point2<f64>, stroke: Stroke },
    Polyline { points: Vec<Point2<f64>>, stroke: Stroke },
    Text { center: Point2<f64>, text: String, size: f64, color: Rgba },
}

/// Fixed-size drawing target.
pub trait DrawSurface {
    /// Width and height in pixels.
    fn size(&self) -> Vector2<f64>;

    fn draw(&mut self, command: DrawCommand);

    fn center(&self) -> Point2<f64> {
        Point2::from(self.size() * 0.5)
    }
}

/// Surface that records commands instead of rasterizing them. A `Clear`
/// discards everything recorded before it, like clearing a canvas.
#[derive(Debug, Clone)]
pub struct CommandList {
    size: Vector2<f64>,
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new(width: f64, height: f64) -> Self {
        Self { size: Vector2::new(width, height), commands: Vec::new() }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = Vector2::new(width, height);
    }
}

impl DrawSurface for CommandList {
    fn size(&self) -> Vector2<f64> {
        self.size
    }

    fn draw(&mut self, command: DrawCommand) {
        if command == DrawCommand::Clear {
            self.commands.clear();
        }
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_discards_previous_frame() {
        let mut list = CommandList::new(100.0, 50.0);
        list.draw(DrawCommand::Clear);
        list.draw(DrawCommand::FillCircle { center: Point2::origin(), radius: 1.0, color: Rgba::rgb(1, 2, 3) });
        list.draw(DrawCommand::Clear);
        assert_eq!(list.commands(), &[DrawCommand::Clear]);
        assert_eq!(list.center(), Point2::new(50.0, 25.0));
    }

    #[test]
    fn alpha_scaling() {
        let c = Rgba::rgb(59, 130, 246).with_alpha(0.3);
        assert_eq!(c.a, 77);
        assert_eq!(Rgba::rgb(0, 0, 0).with_alpha(2.0).a, 255);
    }
}
