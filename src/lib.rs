//! Interactive N×N×N twisty cube rendered with a software painter's algorithm.
//!
//! The engine projects every cell of the lattice through a perspective view,
//! orders the cells back to front without a depth buffer and hands the visible
//! faces to a [`Renderer`]. Pointer drags on a sticker resolve to layer turns
//! which animate over time and then settle into the [`Sticker`] color state;
//! drags beside the puzzle orbit the view.
//!
//! [`PuzzleController`] ties it together for a frame-driven host.

pub mod animation;
pub mod config;
pub mod controller;
pub mod cube;
pub mod error;
pub mod face;
pub mod input;
pub mod math;
pub mod renderer;
pub mod sticker;
pub mod vertex;
pub mod whole_cube;

pub use config::EngineConfig;
pub use controller::{FrameReport, Phase, PuzzleController, TurnSummary};
pub use error::{EngineError, Result};
pub use input::InputHandler;
pub use math::{Axis, ScreenPoint, ScreenVector, TransferParams, ViewMatrix};
pub use renderer::{DrawnFace, FaceList, Renderer};
pub use sticker::Sticker;
pub use whole_cube::{TouchDetail, Turn, WholeCube};
