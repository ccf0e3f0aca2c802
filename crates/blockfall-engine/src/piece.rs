use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// Occupancy matrix of a piece in its spawn orientation.
///
/// Rows are listed top to bottom; `true` marks an occupied cell. The matrix
/// does not have to be square or trimmed — the engine derives bounding boxes
/// from the actual occupied cells.
pub type PieceShape = &'static [&'static [bool]];

/// Enum representing the type of piece.
///
/// The catalog is a pure data table: each kind carries an occupancy matrix
/// ([`PieceKind::shape`]) and a rotational symmetry class
/// ([`PieceKind::symmetry`]). Board logic never inspects kinds directly, so
/// the table can be swapped without touching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// L-piece.
    L = 1,
    /// J-piece (mirrored L).
    J = 2,
    /// T-piece.
    T = 3,
    /// Z-piece.
    Z = 4,
    /// S-piece.
    S = 5,
    /// O-piece.
    O = 6,
}

/// Uniform draw over the 7-piece catalog.
///
/// Each draw is independent of prior draws — deliberately *not* a bag
/// randomizer.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::I,
            1 => PieceKind::L,
            2 => PieceKind::J,
            3 => PieceKind::T,
            4 => PieceKind::Z,
            5 => PieceKind::S,
            _ => PieceKind::O,
        }
    }
}

/// Number of rotationally distinct orientations a piece shape has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    /// One orientation (rotation is a no-op).
    One,
    /// Two distinct orientations.
    Two,
    /// Four distinct orientations.
    Four,
}

impl Symmetry {
    /// Returns the number of distinct orientations for this class.
    #[must_use]
    pub const fn orientations(self) -> usize {
        match self {
            Symmetry::One => 1,
            Symmetry::Two => 2,
            Symmetry::Four => 4,
        }
    }
}

const C: bool = true;
const E: bool = false;

const I_SHAPE: PieceShape = &[&[E, C, E], &[E, C, E], &[E, C, E], &[E, C, E]];
const L_SHAPE: PieceShape = &[&[E, C, E], &[E, C, E], &[E, C, C]];
const J_SHAPE: PieceShape = &[&[E, C, C], &[E, C, E], &[E, C, E]];
const T_SHAPE: PieceShape = &[&[E, C, E], &[C, C, C]];
const Z_SHAPE: PieceShape = &[&[C, C, E], &[E, C, C]];
const S_SHAPE: PieceShape = &[&[E, C, C], &[C, C, E]];
const O_SHAPE: PieceShape = &[&[C, C, E], &[C, C, E]];

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in catalog order.
    pub const ALL: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::O,
    ];

    /// Returns the spawn-orientation occupancy matrix for this kind.
    #[must_use]
    pub const fn shape(self) -> PieceShape {
        match self {
            PieceKind::I => I_SHAPE,
            PieceKind::L => L_SHAPE,
            PieceKind::J => J_SHAPE,
            PieceKind::T => T_SHAPE,
            PieceKind::Z => Z_SHAPE,
            PieceKind::S => S_SHAPE,
            PieceKind::O => O_SHAPE,
        }
    }

    /// Returns the symmetry class bounding rotation search for this kind.
    #[must_use]
    pub const fn symmetry(self) -> Symmetry {
        match self {
            PieceKind::O => Symmetry::One,
            PieceKind::I | PieceKind::Z | PieceKind::S => Symmetry::Two,
            PieceKind::L | PieceKind::J | PieceKind::T => Symmetry::Four,
        }
    }

    /// Returns the single character representation of this piece kind.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
            PieceKind::S => 'S',
            PieceKind::O => 'O',
        }
    }
}
