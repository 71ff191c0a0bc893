//! Pieces and their four binary attributes.

use strum::{EnumIter, IntoEnumIterator};

/// Number of distinct pieces in a game.
pub const PIECE_COUNT: usize = 16;

/// Piece color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Color {
    /// Wire value `0`.
    Blue,
    /// Wire value `1`.
    Brown,
}

/// Piece footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Shape {
    /// Wire value `0`.
    Square,
    /// Wire value `1`.
    Round,
}

/// Piece height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Height {
    /// Wire value `0`.
    Short,
    /// Wire value `1`.
    Tall,
}

/// Piece top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Surface {
    /// Wire value `0`.
    Solid,
    /// Wire value `1`.
    Hollow,
}

/// A game piece. Two pieces are equal when all four attributes match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    shape: Shape,
    height: Height,
    surface: Surface,
}

impl Piece {
    /// Creates a piece from its attributes.
    pub fn new(color: Color, shape: Shape, height: Height, surface: Surface) -> Self {
        Self {
            color,
            shape,
            height,
            surface,
        }
    }

    /// Builds a piece from wire bits, each of which must be `0` or `1`.
    pub fn from_bits(color: u8, shape: u8, height: u8, surface: u8) -> Option<Self> {
        Some(Self {
            color: pick(color, Color::Blue, Color::Brown)?,
            shape: pick(shape, Shape::Square, Shape::Round)?,
            height: pick(height, Height::Short, Height::Tall)?,
            surface: pick(surface, Surface::Solid, Surface::Hollow)?,
        })
    }

    /// Returns the piece's color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the piece's shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the piece's height.
    pub fn height(&self) -> Height {
        self.height
    }

    /// Returns the piece's surface.
    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Stable index in `0..16`: color, shape, height, surface as bits 0 to 3.
    pub fn index(&self) -> usize {
        (self.color as usize)
            | (self.shape as usize) << 1
            | (self.height as usize) << 2
            | (self.surface as usize) << 3
    }

    /// Enumerates the sixteen-piece universe in index order.
    pub fn all() -> Vec<Piece> {
        let mut pieces = Vec::with_capacity(PIECE_COUNT);
        for surface in Surface::iter() {
            for height in Height::iter() {
                for shape in Shape::iter() {
                    for color in Color::iter() {
                        pieces.push(Piece::new(color, shape, height, surface));
                    }
                }
            }
        }
        pieces
    }
}

fn pick<T>(bit: u8, zero: T, one: T) -> Option<T> {
    match bit {
        0 => Some(zero),
        1 => Some(one),
        _ => None,
    }
}
