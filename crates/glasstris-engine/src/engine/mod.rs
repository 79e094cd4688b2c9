pub use self::{bag::*, config::*, game::*, lock_delay::*, progression::*};

pub(crate) mod bag;
pub(crate) mod config;
pub(crate) mod game;
pub(crate) mod lock_delay;
pub(crate) mod progression;
