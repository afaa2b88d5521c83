pub use self::{
    play::PlayScreen,
    replay::{MAX_SPEED, MIN_SPEED, ReplayScreen},
};

mod play;
mod replay;
