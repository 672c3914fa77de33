pub mod renderer;
pub mod surface;

pub use renderer::{FrameOutcome, RenderStyle, Renderer, ORBIT_TOO_LARGE};
pub use surface::{CommandList, DrawCommand, DrawSurface, Rgba, Stroke};
