use std::time::Duration;

use twilight_model::id::{marker::UserMarker, Id};

pub use self::game::{Game, GameSettings};

mod board;
mod game;
mod reactions;
mod state;

/// Who whacked the mole, and how long the game ran until they did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LastWinner {
    pub user: Id<UserMarker>,
    pub duration: Duration,
}
