/// A single normalized landmark reported by the detector.
///
/// `x` and `y` are relative to frame width/height, so values usually sit in
/// `[0, 1]` but may stray slightly outside when a hand leaves the frame. `z` is
/// depth relative to the wrist and is `0.0` for 2D detectors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LandmarkPoint {
    /// Horizontal position, 0 = left edge.
    pub x: f32,
    /// Vertical position, 0 = top edge.
    pub y: f32,
    /// Depth relative to the wrist.
    pub z: f32,
}

impl LandmarkPoint {
    /// Create a 2D point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Create a 3D point.
    pub const fn with_depth(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in the image plane.
    pub fn distance_2d(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Euclidean distance including depth.
    pub fn distance_3d(&self, other: &Self) -> f32 {
        let dz = self.z - other.z;
        let planar = self.distance_2d(other);
        (planar * planar + dz * dz).sqrt()
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(&self, other: &Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            z: (self.z + other.z) / 2.0,
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}
