//! The full puzzle: lattice geometry, draw order, touch routing and turns.
//!
//! The lattice is drawn without a depth buffer. Along the current axis it is
//! split into layers, each layer into lines and each line into cells; at every
//! level the `+` face of the first slab tells which side of the seam the
//! camera is on, so slabs are emitted far side first. Fully enclosed core
//! cells are never emitted.

use nalgebra::Point3;
use rand::Rng;

use crate::cube::Cube;
use crate::error::{EngineError, Result};
use crate::face::{NEG_X, NEG_Y, NEG_Z, POS_X, POS_Y, POS_Z};
use crate::math::{Axis, CUBE_SIZE, ScreenPoint, ScreenVector, TransferParams, ViewMatrix};
use crate::renderer::{DrawnFace, Renderer};
use crate::sticker::Sticker;

/// Drags shorter than this many pixels cannot pick an axis reliably.
pub const MIN_DRAG_DISTANCE: f64 = 8.0;

/// A layer turn resolved from a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub axis: Axis,
    /// Lattice coordinate of the turning layer along `axis`
    pub row: usize,
    /// `true` turns by a positive angle about `axis`
    pub direction: bool,
}

/// The face under the pointer when a drag started, plus the turn it resolved
/// to once the drag was long enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchDetail {
    pub cube_index: usize,
    pub face_index: usize,
    pub turn: Option<Turn>,
}

/// Every cell of an `n × n × n` puzzle together with its sticker state.
#[derive(Debug, Clone)]
pub struct WholeCube {
    columns: usize,
    /// Cells stored at `x + y * n + z * n * n`
    cubes: Vec<Cube>,
    /// Back-to-front draw order from the last [`WholeCube::draw`]
    sorted: Vec<usize>,
    sticker: Sticker,
    view: ViewMatrix,
    /// Axis of the last turn, which also drives the draw order
    axis: Axis,
    touch: Option<TouchDetail>,
}

impl WholeCube {
    /// Builds a solved puzzle with `columns` cells per edge, viewed head on.
    pub fn new(columns: usize) -> Result<Self> {
        Self::with_view(columns, ViewMatrix::identity())
    }

    /// Builds a solved puzzle seen through an existing view rotation.
    pub fn with_view(columns: usize, view: ViewMatrix) -> Result<Self> {
        if columns == 0 {
            return Err(EngineError::InvalidColumns(columns));
        }
        let half_side = CUBE_SIZE / columns as f64 / 2.0;
        let offset = |k: usize| (2.0 * k as f64 + 1.0 - columns as f64) * half_side;

        let mut cubes = Vec::with_capacity(columns.pow(3));
        for z in 0..columns {
            for y in 0..columns {
                for x in 0..columns {
                    let center = Point3::new(offset(x), offset(y), offset(z));
                    cubes.push(Cube::new([x, y, z], center, half_side));
                }
            }
        }

        let mut whole = Self {
            columns,
            cubes,
            sorted: Vec::new(),
            sticker: Sticker::new(columns),
            view,
            axis: Axis::X,
            touch: None,
        };
        whole.coloring();
        Ok(whole)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    pub fn cube(&self, index: usize) -> &Cube {
        &self.cubes[index]
    }

    /// Canonical storage index of the cell at lattice slot `[x, y, z]`.
    pub fn index_of(&self, [x, y, z]: [usize; 3]) -> usize {
        let n = self.columns;
        assert!(x < n && y < n && z < n, "lattice slot {:?} out of range", [x, y, z]);
        x + y * n + z * n * n
    }

    /// Draw order computed by the last [`WholeCube::draw`].
    pub fn sorted(&self) -> &[usize] {
        &self.sorted
    }

    pub fn sticker(&self) -> &Sticker {
        &self.sticker
    }

    pub fn view(&self) -> &ViewMatrix {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewMatrix {
        &mut self.view
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn touch_detail(&self) -> Option<TouchDetail> {
        self.touch
    }

    /// The turn currently in progress, if a drag has locked one.
    pub fn turn(&self) -> Option<Turn> {
        self.touch.and_then(|touch| touch.turn)
    }

    /// Projects the lattice, orders it and paints every visible face.
    pub fn draw<R: Renderer + ?Sized>(&mut self, renderer: &mut R, params: &TransferParams) {
        self.transfer(params);
        self.sort();
        renderer.clear(params.screen_size);
        for &cube_index in &self.sorted {
            let cube = &self.cubes[cube_index];
            for (face_index, face) in cube.visible_faces() {
                renderer.fill_quad(&DrawnFace {
                    cube_index,
                    face_index,
                    points: cube.screen_points(face_index),
                    color: face.color(),
                });
            }
        }
    }

    /// Rotates the view by a pointer drag of `v` pixels.
    pub fn move_angle(&mut self, v: ScreenVector, params: &TransferParams) {
        self.view.rotate_about_y(-v.x * params.turn_rate);
        self.view.rotate_about_x(v.y * params.turn_rate);
    }

    /// Finds the front-most visible face under `p` and remembers it as the
    /// start of a possible turn.
    ///
    /// Relies on the projection from the last [`WholeCube::draw`]. A turn that
    /// is still in progress is settled first so at most one touch is active.
    pub fn touch(&mut self, p: ScreenPoint) -> Option<TouchDetail> {
        if self.turn().is_some() {
            self.revert_and_coloring();
        }
        self.touch = self.sorted.iter().rev().find_map(|&cube_index| {
            self.cubes[cube_index].touch(&p).map(|face_index| TouchDetail {
                cube_index,
                face_index,
                turn: None,
            })
        });
        self.touch
    }

    /// Forgets a touch that never turned into a turn.
    pub fn release(&mut self) {
        if self.turn().is_none() {
            self.touch = None;
        }
    }

    /// Resolves the turn axis, row and direction from a drag of `v` pixels
    /// away from the touch point. Returns `false` when there is no pending
    /// touch, a turn is already locked, or the drag is too short.
    pub fn detect_axis(&mut self, v: ScreenVector) -> bool {
        let Some(touch) = self.touch.as_mut() else {
            return false;
        };
        if touch.turn.is_some() || v.norm_squared() < MIN_DRAG_DISTANCE * MIN_DRAG_DISTANCE {
            return false;
        }

        let cube = &self.cubes[touch.cube_index];
        let found = cube.detect_axis(touch.face_index, &v);
        let turn = Turn {
            axis: found.axis,
            row: cube.coord(found.axis),
            direction: found.direction,
        };
        touch.turn = Some(turn);
        self.axis = turn.axis;
        for cube in self.layer_mut(turn.axis, turn.row) {
            cube.snapshot();
        }
        log::debug!(
            "locked turn about {} at row {} ({})",
            turn.axis,
            turn.row,
            if turn.direction { "positive" } else { "negative" }
        );
        true
    }

    /// Poses the turning layer `rad` radians into its quarter turn.
    pub fn rotate(&mut self, rad: f64) {
        let Some(turn) = self.turn() else {
            return;
        };
        let angle = if turn.direction { rad } else { -rad };
        for cube in self.layer_mut(turn.axis, turn.row) {
            cube.rotate(angle, turn.axis);
        }
    }

    /// Finishes the active turn: the layer snaps back to its rest pose, the
    /// stickers take one quarter turn and the cells are recolored. Returns the
    /// settled turn, or `None` if there was nothing to settle.
    pub fn revert_and_coloring(&mut self) -> Option<Turn> {
        let turn = self.touch.take().and_then(|touch| touch.turn)?;
        for cube in self.layer_mut(turn.axis, turn.row) {
            cube.revert();
        }
        self.sticker.rotate(turn.axis, turn.row, turn.direction);
        self.coloring();
        log::debug!("settled turn about {} at row {}", turn.axis, turn.row);
        Some(turn)
    }

    /// Returns to the solved state without rebuilding the lattice.
    pub fn reset(&mut self) {
        self.discard_turn();
        self.sticker.reset();
        self.coloring();
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    pub fn shuffle_with<R: Rng>(&mut self, rng: &mut R) {
        self.discard_turn();
        self.sticker.shuffle_with(rng);
        self.coloring();
    }

    pub fn judge(&self) -> bool {
        self.sticker.judge()
    }

    /// Copies the sticker state onto the surface faces of every cell.
    pub fn coloring(&mut self) {
        let columns = self.columns;
        for cube in &mut self.cubes {
            let lattice = cube.lattice();
            for face_index in 0..6 {
                if let Some(slot) = sticker_slot(face_index, lattice, columns) {
                    cube.set_color(face_index, self.sticker.face(face_index)[slot]);
                }
            }
        }
    }

    fn discard_turn(&mut self) {
        if let Some(turn) = self.touch.take().and_then(|touch| touch.turn) {
            for cube in self.layer_mut(turn.axis, turn.row) {
                cube.revert();
            }
        }
    }

    fn layer_mut(&mut self, axis: Axis, row: usize) -> impl Iterator<Item = &mut Cube> {
        self.cubes
            .iter_mut()
            .filter(move |cube| cube.coord(axis) == row)
    }

    fn transfer(&mut self, params: &TransferParams) {
        for cube in &mut self.cubes {
            cube.transfer(&self.view, params);
        }
    }

    /// Storage index of the cell at (`layer`, `line`, `cell`) in the frame of
    /// the current axis.
    fn frame_index(&self, layer: usize, line: usize, cell: usize) -> usize {
        let [a, b, c] = self.axis.sort_frame();
        let mut slot = [0; 3];
        slot[a.index()] = layer;
        slot[b.index()] = line;
        slot[c.index()] = cell;
        self.index_of(slot)
    }

    fn layer_contact(&self, layer: usize) -> bool {
        let [a, _, _] = self.axis.sort_frame();
        self.cubes[self.frame_index(layer, 0, 0)].is_face_visible(a.positive_face())
    }

    fn line_contact(&self, layer: usize, line: usize) -> bool {
        let [_, b, _] = self.axis.sort_frame();
        self.cubes[self.frame_index(layer, line, 0)].is_face_visible(b.positive_face())
    }

    fn cube_contact(&self, layer: usize, line: usize, cell: usize) -> bool {
        let [_, _, c] = self.axis.sort_frame();
        self.cubes[self.frame_index(layer, line, cell)].is_face_visible(c.positive_face())
    }

    fn sort(&mut self) {
        self.sorted.clear();
        let n = self.columns;
        for layer in 0..n {
            if self.layer_contact(layer) {
                self.sort_layer(layer);
            } else {
                for rest in (layer..n).rev() {
                    self.sort_layer(rest);
                }
                break;
            }
        }
    }

    fn sort_layer(&mut self, layer: usize) {
        let n = self.columns;
        for line in 0..n {
            if self.line_contact(layer, line) {
                self.sort_line(layer, line);
            } else {
                for rest in (line..n).rev() {
                    self.sort_line(layer, rest);
                }
                break;
            }
        }
    }

    fn sort_line(&mut self, layer: usize, line: usize) {
        let n = self.columns;
        let max = n - 1;
        if layer == 0 || layer == max || line == 0 || line == max {
            for cell in 0..n {
                if self.cube_contact(layer, line, cell) {
                    self.add_sorted(layer, line, cell);
                } else {
                    for rest in (cell..n).rev() {
                        self.add_sorted(layer, line, rest);
                    }
                    break;
                }
            }
        } else if self.cube_contact(layer, line, 0) {
            self.add_sorted(layer, line, 0);
            self.add_sorted(layer, line, max);
        } else {
            self.add_sorted(layer, line, max);
            self.add_sorted(layer, line, 0);
        }
    }

    fn add_sorted(&mut self, layer: usize, line: usize, cell: usize) {
        let index = self.frame_index(layer, line, cell);
        self.sorted.push(index);
    }
}

/// Position within a sticker grid of the given face of the cell at `[x, y, z]`,
/// or `None` if that face is inside the puzzle.
fn sticker_slot(face_index: usize, [x, y, z]: [usize; 3], columns: usize) -> Option<usize> {
    let max = columns - 1;
    let (on_surface, i, j) = match face_index {
        POS_Y => (y == max, z, x),
        POS_X => (x == max, y, z),
        NEG_Z => (z == 0, x, y),
        NEG_X => (x == 0, y, z),
        POS_Z => (z == max, x, y),
        NEG_Y => (y == 0, z, x),
        _ => panic!("face index {face_index} out of range"),
    };
    on_surface.then_some(i + j * columns)
}
