//! Rendering seam between the engine and whatever paints the polygons.
//!
//! The engine never rasterizes anything itself. Each frame it clears the
//! target and then emits the visible faces back to front; a backend only has to
//! fill quadrilaterals in the order it receives them.

use crate::math::ScreenPoint;

/// A visible face ready to be painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnFace {
    /// Canonical lattice index of the owning cell
    pub cube_index: usize,
    /// Index of the face within its cell
    pub face_index: usize,
    /// Corner pixels in winding order
    pub points: [ScreenPoint; 4],
    /// Palette index, `0..=5` for stickers and `6` for the puzzle's inside
    pub color: u8,
}

/// Consumer of the back-to-front face sequence.
pub trait Renderer {
    /// Starts a new frame on a square target of `screen_size` pixels.
    fn clear(&mut self, screen_size: f64);

    /// Paints `face` over everything drawn so far.
    fn fill_quad(&mut self, face: &DrawnFace);
}

/// Renderer that records the face sequence so it can be inspected or replayed
/// on another backend later.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceList {
    screen_size: f64,
    faces: Vec<DrawnFace>,
}

impl FaceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen_size(&self) -> f64 {
        self.screen_size
    }

    pub fn faces(&self) -> &[DrawnFace] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Sends the recorded frame to `renderer` in the original order.
    pub fn replay<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.clear(self.screen_size);
        for face in &self.faces {
            renderer.fill_quad(face);
        }
    }
}

impl Renderer for FaceList {
    fn clear(&mut self, screen_size: f64) {
        self.screen_size = screen_size;
        self.faces.clear();
    }

    fn fill_quad(&mut self, face: &DrawnFace) {
        self.faces.push(*face);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn face(cube_index: usize, color: u8) -> DrawnFace {
        DrawnFace {
            cube_index,
            face_index: 0,
            points: [Point2::origin(); 4],
            color,
        }
    }

    #[test]
    fn clear_discards_the_previous_frame() {
        let mut list = FaceList::new();
        list.clear(100.0);
        list.fill_quad(&face(0, 1));
        list.clear(200.0);
        assert!(list.is_empty());
        assert_eq!(list.screen_size(), 200.0);
    }

    #[test]
    fn replay_preserves_order() {
        let mut list = FaceList::new();
        list.clear(50.0);
        list.fill_quad(&face(3, 0));
        list.fill_quad(&face(1, 5));

        let mut copy = FaceList::new();
        list.replay(&mut copy);
        assert_eq!(copy, list);
        assert_eq!(copy.faces()[0].cube_index, 3);
        assert_eq!(copy.len(), 2);
    }
}
