pub use self::{board::*, piece::*};

pub(crate) mod board;
pub(crate) mod kicks;
pub(crate) mod piece;
