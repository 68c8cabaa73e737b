//! Logical color state of the puzzle.
//!
//! Each of the six macro-faces is a `columns × columns` grid stored row-major
//! as `i + j * columns`. The grids are independent of any geometry: a turn is
//! a pure permutation of color indices, and the cube cells only mirror this
//! state after every settled turn.

use rand::Rng;

use crate::math::Axis;

/// Number of random turns applied by [`Sticker::shuffle`].
pub const SHUFFLE_TURNS: usize = 100;

/// Colors of all stickers on the puzzle surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sticker {
    columns: usize,
    faces: [Vec<u8>; 6],
}

impl Sticker {
    /// Creates a solved sticker set where face `i` is entirely color `i`.
    pub fn new(columns: usize) -> Self {
        assert!(columns > 0, "a puzzle needs at least one column");
        Self {
            columns,
            faces: solved_faces(columns),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Colors of one face, indexed `i + j * columns`.
    pub fn face(&self, index: usize) -> &[u8] {
        &self.faces[index]
    }

    pub fn reset(&mut self) {
        self.faces = solved_faces(self.columns);
    }

    /// Turns layer `row` about `axis` by a quarter turn. `direction == false`
    /// is the opposite sense, applied as three forward turns.
    pub fn rotate(&mut self, axis: Axis, row: usize, direction: bool) {
        if !direction {
            self.rotate_right(axis, row);
            self.rotate_right(axis, row);
        }
        self.rotate_right(axis, row);
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Applies [`SHUFFLE_TURNS`] random turns drawn from `rng`.
    pub fn shuffle_with<R: Rng>(&mut self, rng: &mut R) {
        for _ in 0..SHUFFLE_TURNS {
            let axis = Axis::ALL[rng.random_range(0..Axis::ALL.len())];
            let row = rng.random_range(0..self.columns);
            for _ in 0..rng.random_range(1..=3) {
                self.rotate_right(axis, row);
            }
        }
    }

    /// Whether every face shows a single color.
    pub fn judge(&self) -> bool {
        self.faces
            .iter()
            .all(|face| face.iter().all(|&color| color == face[0]))
    }

    /// One positive quarter turn about `axis`.
    fn rotate_right(&mut self, axis: Axis, row: usize) {
        assert!(
            row < self.columns,
            "row {row} out of range for {} columns",
            self.columns
        );
        let max = self.columns - 1;
        let (sides, near, far) = match axis {
            Axis::X => ([5, 2, 0, 4], 3, 1),
            Axis::Y => ([2, 3, 4, 1], 5, 0),
            Axis::Z => ([3, 5, 1, 0], 2, 4),
        };
        self.rotate_side_right(row, sides);
        // With a single column both ends are the same layer
        if row == 0 {
            self.rotate_face_right(near);
        }
        if row == max {
            self.rotate_face_right(far);
        }
    }

    /// Cycles one strip of stickers through the four faces around an axis,
    /// moving `a -> b -> c -> d -> a`.
    fn rotate_side_right(&mut self, row: usize, [a, b, c, d]: [usize; 4]) {
        let col = self.columns;
        let max = col - 1;
        for i in 0..col {
            let e = i + row * col;
            let f = row + (max - i) * col;
            let g = max - i + row * col;
            let h = row + i * col;
            let last = self.faces[d][h];
            self.faces[d][h] = self.faces[c][g];
            self.faces[c][g] = self.faces[b][f];
            self.faces[b][f] = self.faces[a][e];
            self.faces[a][e] = last;
        }
    }

    /// Rotates a whole face a quarter turn in place.
    fn rotate_face_right(&mut self, face_index: usize) {
        let col = self.columns;
        let max = col - 1;
        let old = self.faces[face_index].clone();
        for (index, color) in self.faces[face_index].iter_mut().enumerate() {
            let i = index % col;
            let j = index / col;
            *color = old[(max - i) * col + j];
        }
    }
}

fn solved_faces(columns: usize) -> [Vec<u8>; 6] {
    std::array::from_fn(|i| vec![i as u8; columns * columns])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// A sticker set where every entry is distinct, so permutations are visible.
    fn labelled(columns: usize) -> Sticker {
        let mut sticker = Sticker::new(columns);
        let n = columns * columns;
        for (f, face) in sticker.faces.iter_mut().enumerate() {
            for (k, color) in face.iter_mut().enumerate() {
                *color = (f * n + k) as u8;
            }
        }
        sticker
    }

    #[test]
    fn new_sticker_is_solved() {
        for columns in 1..=6 {
            let sticker = Sticker::new(columns);
            assert!(sticker.judge());
            for f in 0..6 {
                assert_eq!(sticker.face(f).len(), columns * columns);
                assert!(sticker.face(f).iter().all(|&c| c == f as u8));
            }
        }
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        for columns in 1..=4 {
            for axis in Axis::ALL {
                for row in 0..columns {
                    let start = labelled(columns);
                    let mut sticker = start.clone();
                    for _ in 0..4 {
                        sticker.rotate(axis, row, true);
                    }
                    assert_eq!(sticker, start);
                }
            }
        }
    }

    #[test]
    fn three_turns_equal_the_inverse() {
        for axis in Axis::ALL {
            for row in 0..3 {
                let mut forward = labelled(3);
                for _ in 0..3 {
                    forward.rotate(axis, row, true);
                }
                let mut backward = labelled(3);
                backward.rotate(axis, row, false);
                assert_eq!(forward, backward);

                backward.rotate(axis, row, true);
                assert_eq!(backward, labelled(3));
            }
        }
    }

    #[test]
    fn middle_turn_moves_one_strip_per_side() {
        let mut sticker = Sticker::new(3);
        sticker.rotate(Axis::Y, 1, true);
        // -z receives from +x, -x from -z, +z from -x, +x from +z
        let expected_strip = [(2, 1), (3, 2), (4, 3), (1, 4)];
        for (face, color) in expected_strip {
            let changed: Vec<usize> = (0..9)
                .filter(|&k| sticker.face(face)[k] != face as u8)
                .collect();
            assert!(changed.iter().all(|&k| sticker.face(face)[k] == color));
            assert_eq!(changed.len(), 3);
        }
        // Faces flush with the outer layers are untouched by a middle turn
        assert!(sticker.face(0).iter().all(|&c| c == 0));
        assert!(sticker.face(5).iter().all(|&c| c == 5));
        assert!(!sticker.judge());
    }

    #[test]
    fn outer_turn_spins_the_flush_face() {
        let mut sticker = labelled(3);
        sticker.rotate(Axis::X, 0, true);
        let face = sticker.face(3);
        let base = 3 * 9;
        // new(i, j) = old(j, max - i)
        assert_eq!(face[0], (base + 6) as u8);
        assert_eq!(face[1], (base + 3) as u8);
        assert_eq!(face[2], (base) as u8);
        assert_eq!(face[4], (base + 4) as u8);
        // The opposite face stays put
        assert_eq!(sticker.face(1), labelled(3).face(1));
    }

    #[test]
    fn single_column_turn_spins_both_ends() {
        let mut sticker = labelled(1);
        sticker.rotate(Axis::Z, 0, true);
        // Every face holds one sticker; side faces cycle 3 -> 5 -> 1 -> 0 -> 3
        assert_eq!(sticker.face(5), &[3]);
        assert_eq!(sticker.face(1), &[5]);
        assert_eq!(sticker.face(0), &[1]);
        assert_eq!(sticker.face(3), &[0]);
        assert_eq!(sticker.face(2), &[2]);
        assert_eq!(sticker.face(4), &[4]);
    }

    #[test]
    fn shuffle_then_reset_is_solved() {
        let mut sticker = Sticker::new(2);
        sticker.shuffle_with(&mut StdRng::seed_from_u64(7));
        assert!(!sticker.judge());
        sticker.reset();
        assert!(sticker.judge());
    }

    #[test]
    fn shuffle_preserves_color_counts() {
        let mut sticker = Sticker::new(4);
        sticker.shuffle_with(&mut StdRng::seed_from_u64(99));
        let mut counts = [0usize; 6];
        for f in 0..6 {
            for &c in sticker.face(f) {
                counts[c as usize] += 1;
            }
        }
        assert_eq!(counts, [16; 6]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn rotating_a_missing_row_panics() {
        Sticker::new(3).rotate(Axis::X, 3, true);
    }
}
