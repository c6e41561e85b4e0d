use std::sync::Arc;

use eyre::{Result, WrapErr};
use parking_lot::{Mutex, RwLock};
use twilight_gateway::{Intents, Shard, ShardId};
use twilight_http::{client::InteractionClient, Client};
use twilight_model::id::{marker::ApplicationMarker, Id};

use crate::games::whack::{Game, LastWinner};

use super::BotConfig;

pub struct Context {
    pub http: Arc<Client>,
    application_id: Id<ApplicationMarker>,
    session: Mutex<Session>,
    active_game: RwLock<Option<Arc<Game>>>,
}

impl Context {
    pub async fn init() -> Result<(Arc<Self>, Shard)> {
        let config = BotConfig::get();
        let token = config.discord_token.to_string();

        let http = Arc::new(Client::new(token.clone()));

        let application_id = http
            .current_user_application()
            .await
            .wrap_err("failed to request current user application")?
            .model()
            .await
            .wrap_err("failed to deserialize application")?
            .id;

        // A typo'd channel id should show up in the logs right away
        // instead of on the first game.
        if let Err(err) = http.channel(config.game_channel).await {
            warn!(
                ?err,
                "Failed to fetch the game channel; check WHACK_CHANNEL_ID"
            );
        }

        let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;
        let shard = Shard::new(ShardId::ONE, token, intents);

        let ctx = Self {
            http,
            application_id,
            session: Mutex::new(Session::default()),
            active_game: RwLock::new(None),
        };

        Ok((Arc::new(ctx), shard))
    }

    pub fn interaction(&self) -> InteractionClient<'_> {
        self.http.interaction(self.application_id)
    }

    /// Claim the session for a new game.
    ///
    /// Returns the last recorded winner, or `None` if a game
    /// is already in progress.
    pub fn try_begin_game(&self) -> Option<Option<LastWinner>> {
        self.session.lock().try_begin()
    }

    pub fn set_active_game(&self, game: Arc<Game>) {
        *self.active_game.write() = Some(game);
    }

    pub fn active_game(&self) -> Option<Arc<Game>> {
        self.active_game.read().clone()
    }

    pub fn finish_game(&self, winner: Option<LastWinner>) {
        *self.active_game.write() = None;
        self.session.lock().finish(winner);
    }
}

/// One game at a time; the previous winner sticks around so the next
/// board can display them.
#[derive(Default)]
struct Session {
    game_in_progress: bool,
    last_winner: Option<LastWinner>,
}

impl Session {
    fn try_begin(&mut self) -> Option<Option<LastWinner>> {
        if self.game_in_progress {
            return None;
        }

        self.game_in_progress = true;

        Some(self.last_winner)
    }

    fn finish(&mut self, winner: Option<LastWinner>) {
        self.game_in_progress = false;

        if winner.is_some() {
            self.last_winner = winner;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use twilight_model::id::Id;

    use super::*;

    #[test]
    fn second_game_is_rejected_while_one_runs() {
        let mut session = Session::default();

        assert_eq!(session.try_begin(), Some(None));
        assert_eq!(session.try_begin(), None);

        session.finish(None);
        assert_eq!(session.try_begin(), Some(None));
    }

    #[test]
    fn winner_carries_over_to_the_next_game() {
        let mut session = Session::default();

        let winner = LastWinner {
            user: Id::new(1234),
            duration: Duration::from_millis(4200),
        };

        assert!(session.try_begin().is_some());
        session.finish(Some(winner));

        let carried = session.try_begin().expect("no game in progress");
        assert_eq!(carried.map(|w| w.user), Some(winner.user));

        // a winnerless game must not wipe the cache
        session.finish(None);
        let carried = session.try_begin().expect("no game in progress");
        assert_eq!(carried.map(|w| w.user), Some(winner.user));
    }
}
