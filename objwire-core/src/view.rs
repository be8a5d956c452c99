/// View parameters owned by the projection engine
use nalgebra::Vector2;

use crate::transform::Rotation;

/// Pan direction in screen space. Screen Y grows downward, so `Up`
/// decreases the Y offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Mutable rotation/zoom/pan/spin parameters controlling projection.
///
/// One instance lives inside each `Projector`; there is no process-wide
/// view state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub rotation: Rotation,
    /// Perspective divisor base; must stay positive and larger than the
    /// rotated Z of any vertex for a finite projection.
    pub zoom: f32,
    /// Pan offset in screen-space pixels. Unclamped.
    pub position: Vector2<f32>,
    /// Constant projection scale.
    pub scale: f32,
    pub spin: bool,
}

impl ViewState {
    pub const DEFAULT_ZOOM: f32 = 20.0;
    pub const DEFAULT_SCALE: f32 = 2500.0;

    pub fn new(zoom: f32, scale: f32, position: Vector2<f32>) -> Self {
        Self {
            rotation: Rotation::zero(),
            zoom,
            position,
            scale,
            spin: false,
        }
    }

    /// Shift the pan offset by `amount` pixels in `direction`.
    pub fn pan(&mut self, direction: Direction, amount: f32) {
        match direction {
            Direction::Up => self.position.y -= amount,
            Direction::Down => self.position.y += amount,
            Direction::Left => self.position.x -= amount,
            Direction::Right => self.position.x += amount,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_ZOOM,
            Self::DEFAULT_SCALE,
            Vector2::new(420.0, 540.0),
        )
    }
}
