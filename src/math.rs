//! Vector and matrix primitives for the projection pipeline.

use std::fmt;

use nalgebra::{Matrix3, Point2, Point3, Rotation3, Unit, Vector2, Vector3};

use crate::error::{EngineError, Result};
use crate::face::{POS_X, POS_Y, POS_Z};

/// Edge length of the whole puzzle in object-space units
pub const CUBE_SIZE: f64 = 600.0;
/// Distance pushed onto every view-space z so the camera sits outside the puzzle
pub const SCREEN_DISTANCE: f64 = 2000.0;
/// Projection scale as a fraction of the screen size
pub const TRANSFER_RATE: f64 = 1.4;
/// View rotation in radians for a drag across the full screen
pub const TURN_RATE: f64 = 5.0;

pub type ScreenPoint = Point2<f64>;
pub type ScreenVector = Vector2<f64>;

/// One of the three lattice axes, used both for layer turns and for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis in an `[x, y, z]` triple.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }

    /// Index of the cube face whose outward normal points along `+self`.
    pub fn positive_face(self) -> usize {
        match self {
            Axis::X => POS_X,
            Axis::Y => POS_Y,
            Axis::Z => POS_Z,
        }
    }

    /// Axes of the (layer, line, cell) decomposition used by the painter's sort
    /// when `self` is the active axis.
    pub(crate) fn sort_frame(self) -> [Axis; 3] {
        match self {
            Axis::X => [Axis::X, Axis::Y, Axis::Z],
            Axis::Y => [Axis::Y, Axis::Z, Axis::X],
            Axis::Z => [Axis::Z, Axis::X, Axis::Y],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Viewing rotation applied to every vertex before projection.
///
/// New rotations are multiplied in from the left, so each one acts in view
/// space regardless of how the puzzle is currently oriented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewMatrix(Matrix3<f64>);

impl Default for ViewMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewMatrix {
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    pub fn rotate_about_x(&mut self, angle: f64) {
        self.0 = Rotation3::from_axis_angle(&Vector3::x_axis(), angle).matrix() * self.0;
    }

    pub fn rotate_about_y(&mut self, angle: f64) {
        self.0 = Rotation3::from_axis_angle(&Vector3::y_axis(), angle).matrix() * self.0;
    }

    pub fn product(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.0 * point.coords)
    }
}

/// Screen-dependent parameters of the projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferParams {
    /// Perspective scale in pixels
    pub transfer_rate: f64,
    /// Side length of the square drawing area in pixels
    pub screen_size: f64,
    /// Pixel coordinate of the projection center on both axes
    pub center: f64,
    /// View rotation in radians per pixel of drag
    pub turn_rate: f64,
}

impl TransferParams {
    pub fn new(screen_size: f64) -> Result<Self> {
        if !screen_size.is_finite() || screen_size <= 0.0 {
            return Err(EngineError::InvalidScreenSize(screen_size));
        }
        Ok(Self {
            transfer_rate: screen_size * TRANSFER_RATE,
            screen_size,
            center: (screen_size / 2.0).floor(),
            turn_rate: TURN_RATE / screen_size,
        })
    }
}

/// Unit vector in the direction of `v`, or zero for a degenerate vector.
pub(crate) fn unit_or_zero(v: ScreenVector) -> ScreenVector {
    v.try_normalize(f64::EPSILON).unwrap_or_else(Vector2::zeros)
}

/// Signed area test: positive when `p` lies on the interior side of the edge
/// `a -> b` for the winding used by visible faces (y grows downwards).
pub(crate) fn edge_side(a: &ScreenPoint, b: &ScreenPoint, p: &ScreenPoint) -> f64 {
    let edge = b - a;
    let to_point = p - a;
    edge.x * to_point.y - edge.y * to_point.x
}
