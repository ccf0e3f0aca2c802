pub use self::{
    grid::Grid,
    piece::{PieceKind, PieceShape, Symmetry},
    state::{Action, ActivePiece, GameState, Seed},
};

pub mod grid;
pub mod piece;
pub mod state;

mod metrics;

/// Construction-time configuration error for degenerate board dimensions.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("grid dimensions must be positive, got {width}x{height}")]
pub struct GridSizeError {
    pub width: usize,
    pub height: usize,
}
