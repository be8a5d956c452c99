/// Euler rotation state and its rotation matrix
use nalgebra::Matrix3;

/// Rotation around the three axes, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Rotation {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians).
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// All three angles multiplied by a factor.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    /// The net rotation matrix R = Rz * Rx * Ry.
    ///
    /// The composition order is fixed; changing it changes the on-screen
    /// orientation. The Y matrix carries the sine signs of the reference
    /// viewer, which spin the opposite way from the textbook form.
    pub fn matrix(&self) -> Matrix3<f32> {
        let (sx, cx) = self.x.sin_cos();
        let (sy, cy) = self.y.sin_cos();
        let (sz, cz) = self.z.sin_cos();

        #[rustfmt::skip]
        let rot_x = Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, cx, -sx,
            0.0, sx, cx,
        );

        #[rustfmt::skip]
        let rot_y = Matrix3::new(
            cy, 0.0, -sy,
            0.0, 1.0, 0.0,
            sy, 0.0, cy,
        );

        #[rustfmt::skip]
        let rot_z = Matrix3::new(
            cz, -sz, 0.0,
            sz, cz, 0.0,
            0.0, 0.0, 1.0,
        );

        rot_z * rot_x * rot_y
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::zero()
    }
}
