pub use self::{piece::*, pos::*, sequence::*};

pub(crate) mod piece;
pub(crate) mod pos;
pub(crate) mod sequence;
