//! Cube faces: visibility, screen polygons, hit tests and drag inference.

use nalgebra::Point3;

use crate::math::{Axis, ScreenPoint, ScreenVector, edge_side, unit_or_zero};
use crate::vertex::Vertex;

/// Face whose outward normal is `+y`
pub const POS_Y: usize = 0;
/// Face whose outward normal is `+x`
pub const POS_X: usize = 1;
/// Face whose outward normal is `-z`
pub const NEG_Z: usize = 2;
/// Face whose outward normal is `-x`
pub const NEG_X: usize = 3;
/// Face whose outward normal is `+z`
pub const POS_Z: usize = 4;
/// Face whose outward normal is `-y`
pub const NEG_Y: usize = 5;

/// Number of regular sticker colors.
pub const COLOR_COUNT: u8 = 6;
/// Color of faces that never carry a sticker (the inside of the puzzle).
pub const INTERIOR_COLOR: u8 = COLOR_COUNT;

/// Result of mapping a drag onto a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisAndDirection {
    pub axis: Axis,
    /// `true` turns the layer by a positive angle about `axis`
    pub direction: bool,
}

/// One square side of a cube cell.
///
/// Corners are stored as indices into the owning cube's vertex array, wound so
/// that `(c2 - c1) x (c3 - c2)` points into the cell. The auxiliary vertex is
/// the corner across the cell from `c1`, so `aux - c1` is the inward normal
/// (scaled) and visibility reduces to a single dot product.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    corners: [usize; 4],
    aux: usize,
    /// Sign applied to the screen edges `c1 -> c2` and `c1 -> c4` before
    /// projecting a drag onto them
    edge_signs: [f64; 2],
    color: u8,
    visible: bool,
}

impl Face {
    pub(crate) fn new(corners: [usize; 4], aux: usize, edge_signs: [f64; 2]) -> Self {
        Self {
            corners,
            aux,
            edge_signs,
            color: INTERIOR_COLOR,
            visible: false,
        }
    }

    pub fn color(&self) -> u8 {
        self.color
    }

    pub fn set_color(&mut self, color: u8) {
        assert!(color <= INTERIOR_COLOR, "color index {color} out of range");
        self.color = color;
    }

    /// Indices of the four corners in the owning cube's vertex array.
    pub fn corners(&self) -> [usize; 4] {
        self.corners
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Recomputes [`Face::visible`] from the transformed vertices.
    pub fn calc_visible(&mut self, vertices: &[Vertex; 8]) {
        let c1 = vertices[self.corners[0]].view();
        let inward = vertices[self.aux].view() - c1;
        self.visible = inward.dot(&c1.coords) > 0.0;
    }

    pub fn screen_points(&self, vertices: &[Vertex; 8]) -> [ScreenPoint; 4] {
        self.corners.map(|i| *vertices[i].screen())
    }

    pub fn view_points(&self, vertices: &[Vertex; 8]) -> [Point3<f64>; 4] {
        self.corners.map(|i| *vertices[i].view())
    }

    /// Whether `p` lies within the projected quad of a visible face.
    pub fn is_inside(&self, vertices: &[Vertex; 8], p: &ScreenPoint) -> bool {
        if !self.visible {
            return false;
        }
        let points = self.screen_points(vertices);
        (0..4).all(|i| edge_side(&points[i], &points[(i + 1) % 4], p) >= 0.0)
    }

    /// Picks the turn axis and direction for a drag `v` that started on this
    /// face.
    ///
    /// The drag is projected onto the two screen edges leaving the first
    /// corner. Whichever edge it follows more closely is the direction of
    /// travel; the layer turns about the other edge, whose endpoints differ in
    /// exactly one object-space coordinate.
    pub fn detect_axis(&self, vertices: &[Vertex; 8], v: &ScreenVector) -> AxisAndDirection {
        let [c1, c2, _, c4] = self.corners.map(|i| &vertices[i]);
        let along_first = unit_or_zero((c2.screen() - c1.screen()) * self.edge_signs[0]);
        let along_second = unit_or_zero((c4.screen() - c1.screen()) * self.edge_signs[1]);
        let a = along_first.dot(v);
        let b = along_second.dot(v);

        let follows_second = a.abs() < b.abs();
        let (pivot_end, product) = if follows_second { (c2, b) } else { (c4, a) };
        let p1 = c1.rest();
        let p2 = pivot_end.rest();
        let axis = if p1.x != p2.x {
            Axis::X
        } else if p1.y != p2.y {
            Axis::Y
        } else {
            Axis::Z
        };

        AxisAndDirection {
            axis,
            direction: product > 0.0,
        }
    }
}
