//! Single lattice cells of the puzzle.
//!
//! A [`Cube`] is one axis-aligned unit cell: eight corners it owns outright and
//! six faces built from a fixed vertex table. Cells never leave their lattice
//! slot; during a layer turn only their vertices move, and they snap back once
//! the turn settles.

use nalgebra::{Point3, Vector3};

use crate::face::{AxisAndDirection, Face};
use crate::math::{Axis, ScreenPoint, ScreenVector, TransferParams, ViewMatrix};
use crate::vertex::Vertex;

/// Corner offsets from the cell center, in units of the half side length.
#[rustfmt::skip]
const CORNER_SIGNS: [[f64; 3]; 8] = [
    [ 1.0,  1.0,  1.0], // 0
    [ 1.0,  1.0, -1.0], // 1
    [-1.0,  1.0, -1.0], // 2
    [-1.0,  1.0,  1.0], // 3
    [ 1.0, -1.0,  1.0], // 4
    [ 1.0, -1.0, -1.0], // 5
    [-1.0, -1.0, -1.0], // 6
    [-1.0, -1.0,  1.0], // 7
];

/// Per face: the four corners, the auxiliary corner across the cell from the
/// first one, and the signs of the `c1 -> c2` / `c1 -> c4` drag edges.
#[rustfmt::skip]
const FACE_TABLE: [([usize; 4], usize, [f64; 2]); 6] = [
    ([0, 3, 2, 1], 4, [ 1.0, -1.0]), // +y
    ([5, 4, 0, 1], 6, [-1.0,  1.0]), // +x
    ([1, 2, 6, 5], 0, [ 1.0, -1.0]), // -z
    ([2, 3, 7, 6], 1, [ 1.0,  1.0]), // -x
    ([3, 0, 4, 7], 2, [ 1.0,  1.0]), // +z
    ([7, 4, 5, 6], 3, [ 1.0,  1.0]), // -y
];

/// One cell of the puzzle lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    /// Slot `[x, y, z]` in the lattice
    lattice: [usize; 3],
    vertices: [Vertex; 8],
    faces: [Face; 6],
}

impl Cube {
    /// Creates a cell centered at `center` whose faces lie `half_side` away.
    ///
    /// # Arguments
    /// * `lattice` - Slot of the cell in the lattice, `[x, y, z]`
    /// * `center` - Object-space center of the cell
    /// * `half_side` - Half of the cell's edge length
    pub fn new(lattice: [usize; 3], center: Point3<f64>, half_side: f64) -> Self {
        let vertices = CORNER_SIGNS
            .map(|[x, y, z]| Vertex::new(center + Vector3::new(x, y, z) * half_side));
        let faces = FACE_TABLE.map(|(corners, aux, signs)| Face::new(corners, aux, signs));
        Self {
            lattice,
            vertices,
            faces,
        }
    }

    pub fn lattice(&self) -> [usize; 3] {
        self.lattice
    }

    /// Lattice coordinate of this cell along `axis`.
    pub fn coord(&self, axis: Axis) -> usize {
        self.lattice[axis.index()]
    }

    pub fn vertices(&self) -> &[Vertex; 8] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face; 6] {
        &self.faces
    }

    pub fn face(&self, index: usize) -> &Face {
        &self.faces[index]
    }

    /// Projects all vertices and refreshes face visibility.
    pub fn transfer(&mut self, matrix: &ViewMatrix, params: &TransferParams) {
        for vertex in &mut self.vertices {
            vertex.transfer(matrix, params);
        }
        for face in &mut self.faces {
            face.calc_visible(&self.vertices);
        }
    }

    /// Faces currently turned towards the camera, with their indices.
    pub fn visible_faces(&self) -> impl Iterator<Item = (usize, &Face)> {
        self.faces.iter().enumerate().filter(|(_, face)| face.visible())
    }

    pub fn is_face_visible(&self, index: usize) -> bool {
        self.faces[index].visible()
    }

    pub fn screen_points(&self, face_index: usize) -> [ScreenPoint; 4] {
        self.faces[face_index].screen_points(&self.vertices)
    }

    /// Index of the visible face containing `p`, if any.
    pub fn touch(&self, p: &ScreenPoint) -> Option<usize> {
        self.faces
            .iter()
            .position(|face| face.is_inside(&self.vertices, p))
    }

    pub fn detect_axis(&self, face_index: usize, v: &ScreenVector) -> AxisAndDirection {
        self.faces[face_index].detect_axis(&self.vertices, v)
    }

    pub fn snapshot(&mut self) {
        for vertex in &mut self.vertices {
            vertex.snapshot();
        }
    }

    pub fn rotate(&mut self, rad: f64, axis: Axis) {
        for vertex in &mut self.vertices {
            vertex.rotate(rad, axis);
        }
    }

    pub fn revert(&mut self) {
        for vertex in &mut self.vertices {
            vertex.revert();
        }
    }

    pub fn set_color(&mut self, face_index: usize, color: u8) {
        self.faces[face_index].set_color(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::{INTERIOR_COLOR, NEG_X, NEG_Y, NEG_Z, POS_X, POS_Y, POS_Z};
    use nalgebra::{Point2, Vector2};

    fn params() -> TransferParams {
        TransferParams::new(600.0).unwrap()
    }

    fn centered_cube() -> Cube {
        let mut cube = Cube::new([0, 0, 0], Point3::origin(), 100.0);
        cube.transfer(&ViewMatrix::identity(), &params());
        cube
    }

    fn centroid(points: &[ScreenPoint; 4]) -> ScreenPoint {
        let sum = points.iter().fold(Vector2::zeros(), |acc, p| acc + p.coords);
        Point2::from(sum / 4.0)
    }

    #[test]
    fn faces_sit_on_their_named_sides() {
        let cube = Cube::new([0, 0, 0], Point3::origin(), 1.0);
        let expected = [
            (POS_Y, 1, 1.0),
            (POS_X, 0, 1.0),
            (NEG_Z, 2, -1.0),
            (NEG_X, 0, -1.0),
            (POS_Z, 2, 1.0),
            (NEG_Y, 1, -1.0),
        ];
        for (face_index, component, value) in expected {
            let (corners, _, _) = FACE_TABLE[face_index];
            for corner in corners {
                assert_eq!(cube.vertices()[corner].original()[component], value);
            }
        }
    }

    #[test]
    fn auxiliary_vertex_differs_only_along_the_normal() {
        for (corners, aux, _) in FACE_TABLE {
            let a = CORNER_SIGNS[corners[0]];
            let b = CORNER_SIGNS[aux];
            let differing = (0..3).filter(|&i| a[i] != b[i]).count();
            assert_eq!(differing, 1);
        }
    }

    #[test]
    fn only_front_face_visible_head_on() {
        let cube = centered_cube();
        let visible: Vec<usize> = cube.visible_faces().map(|(i, _)| i).collect();
        assert_eq!(visible, vec![NEG_Z]);
    }

    #[test]
    fn three_faces_visible_from_a_corner() {
        let mut matrix = ViewMatrix::identity();
        matrix.rotate_about_y(0.6);
        matrix.rotate_about_x(0.45);
        let mut cube = Cube::new([0, 0, 0], Point3::origin(), 100.0);
        cube.transfer(&matrix, &params());
        let visible: Vec<usize> = cube.visible_faces().map(|(i, _)| i).collect();
        assert_eq!(visible, vec![POS_X, NEG_Z, NEG_Y]);
    }

    #[test]
    fn touch_hits_the_front_face_only_inside() {
        let cube = centered_cube();
        let center = centroid(&cube.screen_points(NEG_Z));
        assert_eq!(cube.touch(&center), Some(NEG_Z));
        assert_eq!(cube.touch(&Point2::new(5.0, 5.0)), None);
    }

    #[test]
    fn hidden_faces_are_never_inside() {
        let cube = centered_cube();
        let center = centroid(&cube.screen_points(NEG_Z));
        // The back face projects onto the same region but faces away
        assert!(!cube.face(POS_Z).is_inside(cube.vertices(), &center));
    }

    #[test]
    fn horizontal_drag_on_front_face_turns_about_y() {
        let cube = centered_cube();
        let right = cube.detect_axis(NEG_Z, &ScreenVector::new(40.0, 3.0));
        assert_eq!(right.axis, Axis::Y);
        assert!(!right.direction);
        let left = cube.detect_axis(NEG_Z, &ScreenVector::new(-40.0, 3.0));
        assert_eq!(left.axis, Axis::Y);
        assert!(left.direction);
    }

    #[test]
    fn vertical_drag_on_front_face_turns_about_x() {
        let cube = centered_cube();
        let down = cube.detect_axis(NEG_Z, &ScreenVector::new(2.0, 40.0));
        assert_eq!(down.axis, Axis::X);
        // Dragging the front face downwards rolls it towards +y, a positive
        // turn about +x
        assert!(down.direction);
    }

    #[test]
    fn new_faces_start_uncolored() {
        let cube = Cube::new([1, 2, 3], Point3::origin(), 1.0);
        assert!(cube.faces().iter().all(|f| f.color() == INTERIOR_COLOR));
        assert_eq!(cube.coord(Axis::Z), 3);
    }

    #[test]
    fn rotate_and_revert_round_trip() {
        let mut cube = Cube::new([0, 0, 0], Point3::new(50.0, -50.0, 50.0), 50.0);
        let before = cube.clone();
        cube.snapshot();
        cube.rotate(0.7, Axis::X);
        assert_ne!(cube, before);
        cube.revert();
        assert_eq!(cube, before);
    }
}
