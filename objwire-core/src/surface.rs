/// Abstract drawing surface and draw styles
use nalgebra::Point2;

/// An RGB colour, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const WHITE: Colour = Colour::new(0xff, 0xff, 0xff);
    pub const BLUE: Colour = Colour::new(0x00, 0x00, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Marker and outline styling for wireframe output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub point_size: f32,
    pub point_colour: Colour,
    pub line_colour: Colour,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            point_size: 2.0,
            point_colour: Colour::WHITE,
            line_colour: Colour::BLUE,
        }
    }
}

/// A 2D drawing surface supplied by the host.
///
/// The projection engine issues commands in a fixed order per frame:
/// `clear`, then one `draw_point` per visible vertex, then one
/// `draw_polygon` per visible face. Implementations decide what a pixel
/// is; coordinates may fall outside the surface and should be clipped,
/// not rejected.
pub trait Surface {
    fn clear(&mut self);

    fn draw_point(&mut self, point: Point2<f32>, size: f32, colour: Colour);

    /// Stroke an unfilled closed outline through `points` in order.
    fn draw_polygon(&mut self, points: &[Point2<f32>], outline: Colour);
}
