//! Cube corners and their path through the projection pipeline.

use nalgebra::{Point2, Point3, Rotation3};

use crate::math::{Axis, SCREEN_DISTANCE, ScreenPoint, TransferParams, ViewMatrix};

/// A single cube corner.
///
/// Every [`Cube`](crate::cube::Cube) owns its eight vertices outright, so a
/// turning layer never drags a neighbouring cell's corners along with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Object-space position, rotated while a layer turn is animating
    original: Point3<f64>,
    /// Position captured before a turn; rotations are always taken from here
    rest: Point3<f64>,
    /// Position after the view rotation and the screen distance offset
    view: Point3<f64>,
    /// Projected pixel position
    screen: ScreenPoint,
}

impl Vertex {
    pub fn new(point: Point3<f64>) -> Self {
        Self {
            original: point,
            rest: point,
            view: point,
            screen: Point2::origin(),
        }
    }

    /// Projects the vertex onto the screen.
    pub fn transfer(&mut self, matrix: &ViewMatrix, params: &TransferParams) {
        let mut view = matrix.product(&self.original);
        view.z += SCREEN_DISTANCE;
        self.view = view;
        self.screen = Point2::new(
            (view.x * params.transfer_rate / view.z).round() + params.center,
            (view.y * params.transfer_rate / view.z).round() + params.center,
        );
    }

    /// Records the current position as the basis for the next turn.
    pub fn snapshot(&mut self) {
        self.rest = self.original;
    }

    /// Sets the position to the rest point rotated by `rad` about `axis`.
    pub fn rotate(&mut self, rad: f64, axis: Axis) {
        self.original = Rotation3::from_axis_angle(&axis.unit(), rad) * self.rest;
    }

    /// Restores the rest point exactly.
    pub fn revert(&mut self) {
        self.original = self.rest;
    }

    pub fn original(&self) -> &Point3<f64> {
        &self.original
    }

    pub fn rest(&self) -> &Point3<f64> {
        &self.rest
    }

    pub fn view(&self) -> &Point3<f64> {
        &self.view
    }

    pub fn screen(&self) -> &ScreenPoint {
        &self.screen
    }
}
