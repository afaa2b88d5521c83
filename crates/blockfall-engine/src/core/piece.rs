use serde::{Deserialize, Serialize};

use crate::InvalidCatalogIndexError;

use super::pos::{Pos, RotationDirection};

/// Number of blocks in every piece.
pub const PIECE_SIZE: usize = 4;

/// Index of the block used as the rotation pivot.
pub const PIVOT_INDEX: usize = 1;

/// A piece: four blocks moving and rotating together.
///
/// Block order is significant: the block at [`PIVOT_INDEX`] is the rotation pivot.
pub type Piece = [Block; PIECE_SIZE];

/// Display color of a block, fixed by the catalog entry it was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[display("yellow")]
    Yellow,
    #[display("blue")]
    Blue,
    #[display("pink")]
    Pink,
    #[display("dark blue")]
    DarkBlue,
    #[display("orange")]
    Orange,
    #[display("green")]
    Green,
    #[display("red")]
    Red,
}

/// One occupied cell.
///
/// The kick and rotation flags are copied from the piece the block was created with.
/// After settling, a block no longer knows which piece it belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub position: Pos,
    pub color: Color,
    pub rotatable: bool,
    pub wall_kick: bool,
    pub floor_kick: bool,
}

impl Block {
    #[must_use]
    pub fn moved_by(self, offset: Pos) -> Self {
        Self {
            position: self.position + offset,
            ..self
        }
    }

    #[must_use]
    pub const fn checked_moved_by(self, offset: Pos) -> Option<Self> {
        match self.position.checked_add(offset) {
            Some(position) => Some(Self { position, ..self }),
            None => None,
        }
    }
}

/// A shape template in the piece catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Conventional one-letter name of the shape.
    pub name: char,
    /// Block offsets relative to the piece origin, in block order.
    pub shape: [(i32, i32); PIECE_SIZE],
    pub rotatable: bool,
    pub wall_kick: bool,
    pub floor_kick: bool,
    pub color: Color,
}

/// The seven shapes, addressed by [`CatalogIndex`] `1..=7`.
pub static CATALOG: [CatalogEntry; CatalogIndex::COUNT] = [
    CatalogEntry {
        name: 'O',
        shape: [(0, 0), (1, 0), (0, 1), (1, 1)],
        rotatable: false,
        wall_kick: false,
        floor_kick: false,
        color: Color::Yellow,
    },
    CatalogEntry {
        name: 'I',
        shape: [(0, 0), (1, 0), (2, 0), (3, 0)],
        rotatable: true,
        wall_kick: true,
        floor_kick: true,
        color: Color::Blue,
    },
    CatalogEntry {
        name: 'L',
        shape: [(0, 1), (1, 1), (2, 1), (2, 0)],
        rotatable: true,
        wall_kick: true,
        floor_kick: false,
        color: Color::Pink,
    },
    CatalogEntry {
        name: 'J',
        shape: [(2, 1), (1, 1), (0, 1), (0, 0)],
        rotatable: true,
        wall_kick: true,
        floor_kick: false,
        color: Color::DarkBlue,
    },
    CatalogEntry {
        name: 'T',
        shape: [(0, 1), (1, 1), (2, 1), (1, 0)],
        rotatable: true,
        wall_kick: true,
        floor_kick: true,
        color: Color::Orange,
    },
    CatalogEntry {
        name: 'S',
        shape: [(0, 1), (1, 1), (1, 0), (2, 0)],
        rotatable: true,
        wall_kick: true,
        floor_kick: false,
        color: Color::Green,
    },
    CatalogEntry {
        name: 'Z',
        shape: [(0, 0), (1, 0), (1, 1), (2, 1)],
        rotatable: true,
        wall_kick: true,
        floor_kick: false,
        color: Color::Red,
    },
];

/// A validated index into [`CATALOG`], always in `1..=7`.
///
/// Serialized as its plain number; deserialization rejects out-of-range values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct CatalogIndex(u8);

impl CatalogIndex {
    /// Number of catalog entries.
    pub const COUNT: usize = 7;

    pub const O: Self = Self::new(1);
    pub const I: Self = Self::new(2);
    pub const L: Self = Self::new(3);
    pub const J: Self = Self::new(4);
    pub const T: Self = Self::new(5);
    pub const S: Self = Self::new(6);
    pub const Z: Self = Self::new(7);

    /// Creates an index, panicking when it is outside `1..=7`.
    ///
    /// An out-of-range index is a programming error. Use [`TryFrom<u8>`] for
    /// untrusted input.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(matches!(index, 1..=7), "catalog index must be in 1..=7");
        Self(index)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn entry(self) -> &'static CatalogEntry {
        &CATALOG[usize::from(self.0) - 1]
    }

    /// Iterates over every index in catalog order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=7).map(Self::new)
    }
}

impl TryFrom<u8> for CatalogIndex {
    type Error = InvalidCatalogIndexError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if (1..=7).contains(&index) {
            Ok(Self(index))
        } else {
            Err(InvalidCatalogIndexError { index })
        }
    }
}

impl From<CatalogIndex> for u8 {
    fn from(index: CatalogIndex) -> Self {
        index.0
    }
}

/// Builds the piece for `index` with its shape translated to `origin`.
#[must_use]
pub fn create_piece(origin: Pos, index: CatalogIndex) -> Piece {
    let entry = index.entry();
    entry.shape.map(|(dx, dy)| Block {
        position: origin + Pos::new(dx, dy),
        color: entry.color,
        rotatable: entry.rotatable,
        wall_kick: entry.wall_kick,
        floor_kick: entry.floor_kick,
    })
}

/// Returns `piece` with every block moved by `offset`.
#[must_use]
pub fn translated(piece: &Piece, offset: Pos) -> Piece {
    piece.map(|block| block.moved_by(offset))
}

/// Like [`translated`], but `None` when any block position would overflow.
#[must_use]
pub fn checked_translated(piece: &Piece, offset: Pos) -> Option<Piece> {
    let mut moved = *piece;
    for block in &mut moved {
        *block = block.checked_moved_by(offset)?;
    }
    Some(moved)
}

/// Returns `piece` rotated a quarter turn around its pivot block.
#[must_use]
pub fn rotated(piece: &Piece, direction: RotationDirection) -> Piece {
    let pivot = piece[PIVOT_INDEX].position;
    piece.map(|block| Block {
        position: block.position.rotated(pivot, direction),
        ..block
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(piece: &Piece) -> Vec<(i32, i32)> {
        piece.iter().map(|b| (b.position.x, b.position.y)).collect()
    }

    #[test]
    fn test_checked_translated() {
        let piece = create_piece(Pos::new(4, 1), CatalogIndex::I);
        assert_eq!(
            checked_translated(&piece, Pos::new(1, 3)),
            Some(translated(&piece, Pos::new(1, 3)))
        );
        assert_eq!(checked_translated(&piece, Pos::new(i32::MAX, 0)), None);
        assert_eq!(checked_translated(&piece, Pos::new(0, i32::MIN)), None);
    }

    #[test]
    fn test_create_piece_translates_shape() {
        let piece = create_piece(Pos::new(4, 1), CatalogIndex::T);
        assert_eq!(positions(&piece), vec![(4, 2), (5, 2), (6, 2), (5, 1)]);
        for block in piece {
            assert_eq!(block.color, Color::Orange);
            assert!(block.rotatable);
            assert!(block.wall_kick);
            assert!(block.floor_kick);
        }
    }

    #[test]
    fn test_create_piece_stamps_catalog_flags() {
        for index in CatalogIndex::all() {
            let entry = index.entry();
            let piece = create_piece(Pos::default(), index);
            for block in piece {
                assert_eq!(block.color, entry.color, "color of {}", entry.name);
                assert_eq!(block.rotatable, entry.rotatable);
                assert_eq!(block.wall_kick, entry.wall_kick);
                assert_eq!(block.floor_kick, entry.floor_kick);
            }
        }
    }

    #[test]
    fn test_catalog_blocks_are_distinct() {
        for index in CatalogIndex::all() {
            let mut cells = positions(&create_piece(Pos::default(), index));
            cells.sort_unstable();
            cells.dedup();
            assert_eq!(cells.len(), PIECE_SIZE, "{} has overlapping blocks", index);
        }
    }

    #[test]
    fn test_only_o_piece_is_not_rotatable() {
        let fixed: Vec<_> = CatalogIndex::all()
            .filter(|index| !index.entry().rotatable)
            .collect();
        assert_eq!(fixed, vec![CatalogIndex::O]);
    }

    #[test]
    fn test_catalog_index_try_from() {
        assert_eq!(CatalogIndex::try_from(1_u8), Ok(CatalogIndex::O));
        assert_eq!(CatalogIndex::try_from(7_u8), Ok(CatalogIndex::Z));
        assert!(CatalogIndex::try_from(0_u8).is_err());
        assert!(CatalogIndex::try_from(8_u8).is_err());
        assert_eq!(
            CatalogIndex::try_from(9_u8).unwrap_err().to_string(),
            "catalog index 9 is outside 1..=7"
        );
    }

    #[test]
    #[should_panic(expected = "catalog index must be in 1..=7")]
    fn test_catalog_index_new_panics_out_of_range() {
        let _ = CatalogIndex::new(0);
    }

    #[test]
    fn test_catalog_index_serde_validates() {
        assert_eq!(serde_json::to_string(&CatalogIndex::J).unwrap(), "4");
        assert_eq!(
            serde_json::from_str::<CatalogIndex>("5").unwrap(),
            CatalogIndex::T
        );
        assert!(serde_json::from_str::<CatalogIndex>("0").is_err());
        assert!(serde_json::from_str::<CatalogIndex>("12").is_err());
    }

    #[test]
    fn test_rotated_keeps_pivot_in_place() {
        let piece = create_piece(Pos::new(4, 5), CatalogIndex::L);
        let pivot = piece[PIVOT_INDEX].position;
        let turned = rotated(&piece, RotationDirection::Clockwise);
        assert_eq!(turned[PIVOT_INDEX].position, pivot);
        assert_ne!(positions(&turned), positions(&piece));
    }

    #[test]
    fn test_rotated_i_piece_becomes_vertical() {
        let piece = create_piece(Pos::new(4, 5), CatalogIndex::I);
        let turned = rotated(&piece, RotationDirection::Clockwise);
        assert_eq!(positions(&turned), vec![(5, 4), (5, 5), (5, 6), (5, 7)]);
    }

    #[test]
    fn test_translated_moves_every_block() {
        let piece = create_piece(Pos::new(4, 1), CatalogIndex::S);
        let moved = translated(&piece, Pos::new(-1, 3));
        for (before, after) in piece.iter().zip(&moved) {
            assert_eq!(after.position, before.position + Pos::new(-1, 3));
            assert_eq!(after.color, before.color);
        }
    }
}
