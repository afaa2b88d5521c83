use serde::{Deserialize, Serialize};

/// A cell address on the board.
///
/// # Coordinate System
///
/// - X increases rightward (columns)
/// - Y increases downward (rows)
/// - Values are plain integers; boundary rules live in the collision predicates,
///   so intermediate positions outside the board are representable.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Pos, RotationDirection};
///
/// let p = Pos::new(5, 1) + Pos::new(0, 2);
/// assert_eq!(p, Pos::new(5, 3));
///
/// let pivot = Pos::new(5, 2);
/// assert_eq!(p.rotated(pivot, RotationDirection::Clockwise), Pos::new(4, 2));
/// ```
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Add,
    derive_more::Sub,
    derive_more::Display,
)]
#[display("({x}, {y})")]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise addition, `None` if either coordinate overflows.
    #[must_use]
    pub const fn checked_add(self, other: Pos) -> Option<Self> {
        match (self.x.checked_add(other.x), self.y.checked_add(other.y)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }

    /// Rotates this position a quarter turn around `pivot`.
    #[must_use]
    pub const fn rotated(self, pivot: Pos, direction: RotationDirection) -> Self {
        let d = direction.sign();
        Self {
            x: pivot.x + d * (pivot.y - self.y),
            y: pivot.y - d * (pivot.x - self.x),
        }
    }
}

/// Direction of a quarter-turn rotation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// `+1` for clockwise, `-1` for counter-clockwise.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}
