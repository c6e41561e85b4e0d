use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use eyre::{Report, Result, WrapErr};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tokio::{sync::watch, time::sleep};
use twilight_model::{
    channel::message::component::ComponentType,
    id::{
        marker::{ChannelMarker, MessageMarker},
        Id,
    },
};
use uuid::Uuid;

use crate::{
    core::Context,
    util::{matcher, ChannelExt, ComponentExt, InteractionComponent, MessageBuilder, MessageExt},
};

use super::{
    board::{self, BoardParams},
    reactions::ReactionPoster,
    state::{ClickOutcome, GameState},
    LastWinner,
};

/// Discord won't take more than 5 action rows of 5 buttons each.
const MAX_GRID_ROWS: usize = 5;
const MAX_CELLS_PER_ROW: usize = 5;

/// Delay for the redundant final edit after a win.
const FINAL_EDIT_DELAY: Duration = Duration::from_secs(5);

/// Board geometry and tick timing, only obtainable through the
/// validating constructor.
#[derive(Copy, Clone, Debug)]
pub struct GameSettings {
    total_cells: usize,
    rows: usize,
    update_interval: Duration,
    update_increment: Duration,
}

impl GameSettings {
    pub fn new(
        total_cells: usize,
        rows: usize,
        update_interval: Duration,
        update_increment: Duration,
    ) -> Result<Self> {
        ensure!(total_cells > 0, "the board needs at least one cell");
        ensure!(rows > 0, "the board needs at least one row");

        ensure!(
            total_cells % rows == 0,
            "total cells ({total_cells}) must be divisible by rows ({rows})"
        );

        ensure!(
            rows <= MAX_GRID_ROWS,
            "Discord allows at most {MAX_GRID_ROWS} button rows per message, got {rows}"
        );

        ensure!(
            total_cells / rows <= MAX_CELLS_PER_ROW,
            "Discord allows at most {MAX_CELLS_PER_ROW} buttons per row, got {per_row}",
            per_row = total_cells / rows
        );

        Ok(Self {
            total_cells,
            rows,
            update_interval,
            update_increment,
        })
    }
}

pub struct Game {
    channel: Id<ChannelMarker>,
    game_id: Uuid,
    settings: GameSettings,
    last_winner: Option<LastWinner>,
    state: Mutex<GameState>,
    started: OnceCell<Instant>,
    /// Set after the initial post
    msg: OnceCell<Id<MessageMarker>>,
    /// Set by the one winning click
    winner: OnceCell<LastWinner>,
    stop_tx: watch::Sender<bool>,
    reactions: ReactionPoster,
}

impl Game {
    pub fn new(
        channel: Id<ChannelMarker>,
        settings: GameSettings,
        last_winner: Option<LastWinner>,
    ) -> Self {
        let (stop_tx, _) = watch::channel(false);

        Self {
            channel,
            game_id: Uuid::new_v4(),
            settings,
            last_winner,
            state: Mutex::new(GameState::new(settings.total_cells)),
            started: OnceCell::new(),
            msg: OnceCell::new(),
            winner: OnceCell::new(),
            stop_tx,
            reactions: ReactionPoster::new(),
        }
    }

    pub fn message_id(&self) -> Option<Id<MessageMarker>> {
        self.msg.get().copied()
    }

    /// Post the initial board, then re-render on a timer until the
    /// winning click stops the loop. Returns the winner, if any.
    pub async fn run(self: Arc<Self>, ctx: Arc<Context>) -> Result<Option<LastWinner>> {
        self.started
            .set(Instant::now())
            .map_err(|_| eyre!("game {} was already started", self.game_id))?;

        let target = self.state.lock().start(&mut rand::thread_rng());

        let board = board::render(&self.board_params(target), &mut rand::thread_rng());
        let builder = MessageBuilder::new()
            .embed(board.embed)
            .components(board.components);

        let msg = self
            .channel
            .create_message(&ctx, &builder)
            .wrap_err("failed to build initial board message")?
            .await
            .wrap_err("failed to post initial board")?
            .model()
            .await
            .wrap_err("failed to deserialize initial board message")?;

        let _ = self.msg.set(msg.id);

        debug!("Game {} posted as message {}", self.game_id, msg.id);

        self.reactions.post(&ctx, self.channel, msg.id).await;

        let mut interval = self.settings.update_interval;
        let mut stop_rx = self.stop_tx.subscribe();

        loop {
            tokio::select! {
                _ = sleep(interval) => {}
                _ = stop_rx.changed() => break,
            }

            interval += self.settings.update_increment;

            let Some(target) = self.state.lock().relocate(&mut rand::thread_rng()) else {
                break;
            };

            let board = board::render(&self.board_params(target), &mut rand::thread_rng());
            let builder = MessageBuilder::new()
                .embed(board.embed)
                .components(board.components);

            // a failed tick only means a stale board; the next tick catches up
            match (msg.id, self.channel).update(&ctx, &builder) {
                Ok(fut) => {
                    if let Err(err) = fut.await {
                        warn!(?err, "Failed to update board");
                    }
                }
                Err(err) => warn!(?err, "Failed to build board update"),
            }
        }

        Ok(self.winner.get().copied())
    }

    pub async fn handle_click(
        self: Arc<Self>,
        ctx: Arc<Context>,
        component: InteractionComponent,
    ) -> Result<()> {
        // buttons only; anything else is not a click of ours
        if component.data.component_type != ComponentType::Button {
            return Ok(());
        }

        component
            .defer(&ctx)
            .await
            .wrap_err("failed to defer component")?;

        let Some(cell) = matcher::parse_cell_id(&component.data.custom_id) else {
            return Ok(());
        };

        // stale boards of earlier games don't count
        if self.message_id() != Some(component.message.id) {
            return Ok(());
        }

        // resolved before touching the state so that a click without a
        // user can't transition the game
        let user = component.user_id()?;

        let winner = LastWinner {
            user,
            duration: self.elapsed(),
        };

        match self.resolve_click(cell, winner) {
            ClickOutcome::Ignored => {}
            ClickOutcome::Miss => {
                self.announce_click(&ctx, &component);

                self.reactions
                    .post(&ctx, component.channel_id, component.message.id)
                    .await;
            }
            ClickOutcome::Win => {
                self.announce_click(&ctx, &component);

                let _ = self.stop_tx.send(true);

                info!(
                    "Game {} whacked by user {user} on cell {cell}",
                    self.game_id
                );

                let msg = component.message.id;
                let channel = component.channel_id;

                let builder = self.final_board(winner);
                (msg, channel)
                    .update(&ctx, &builder)
                    .wrap_err("failed to build final board")?
                    .await
                    .wrap_err("failed to write final board")?;

                // one redundant edit in case a lagging tick update
                // reaches Discord after the final board
                let game = Arc::clone(&self);
                let ctx = Arc::clone(&ctx);

                tokio::spawn(async move {
                    sleep(FINAL_EDIT_DELAY).await;

                    let builder = game.final_board(winner);

                    let res = match (msg, channel).update(&ctx, &builder) {
                        Ok(fut) => fut.await.map(|_| ()).map_err(Report::new),
                        Err(err) => Err(err),
                    };

                    if let Err(err) = res {
                        warn!("{:?}", err.wrap_err("Failed to re-write final board"));
                    }
                });
            }
        }

        Ok(())
    }

    /// Run the click through the state machine. A winner is recorded
    /// under the same lock as the `won` transition, so whoever observes
    /// the won state also sees the winner.
    fn resolve_click(&self, cell: usize, winner: LastWinner) -> ClickOutcome {
        let mut state = self.state.lock();
        let outcome = state.register_click(cell);

        // the state machine grants the win exactly once
        if outcome == ClickOutcome::Win {
            let _ = self.winner.set(winner);
        }

        outcome
    }

    /// Announce the clicker in a reply to the game message, like the
    /// arcade machine shouting the player's name.
    fn announce_click(&self, ctx: &Arc<Context>, component: &InteractionComponent) {
        let Some(msg) = self.message_id() else {
            return;
        };

        let content = format!("WHACK by {}", component.display_name());
        let channel = self.channel;
        let ctx = Arc::clone(ctx);

        tokio::spawn(async move {
            let res = match (msg, channel).reply(&ctx, &content) {
                Ok(fut) => fut.await.map(|_| ()).map_err(Report::new),
                Err(err) => Err(err),
            };

            if let Err(err) = res {
                warn!("{:?}", err.wrap_err("Failed to announce click"));
            }
        });
    }

    fn final_board(&self, winner: LastWinner) -> MessageBuilder {
        let params = self.board_params(self.state.lock().target());
        let board = board::render_won(&params, winner, &mut rand::thread_rng());

        MessageBuilder::new()
            .embed(board.embed)
            .components(board.components)
    }

    fn board_params(&self, target: usize) -> BoardParams {
        BoardParams {
            total_cells: self.settings.total_cells,
            rows: self.settings.rows,
            target,
            elapsed: self.elapsed(),
            last_winner: self.last_winner,
        }
    }

    fn elapsed(&self) -> Duration {
        self.started.get().map_or(Duration::ZERO, Instant::elapsed)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;

    #[test]
    fn winner_is_readable_once_the_won_state_is_observable() {
        let settings =
            GameSettings::new(20, 4, Duration::from_millis(500), Duration::ZERO).unwrap();
        let game = Game::new(Id::new(1), settings, None);

        let mut rng = StepRng::new(0, 0x1357_9BDF_0246_8ACE);
        let target = game.state.lock().start(&mut rng);

        let winner = LastWinner {
            user: Id::new(1234),
            duration: Duration::from_millis(777),
        };

        assert_eq!(game.resolve_click(target, winner), ClickOutcome::Win);

        // the tick loop breaks as soon as `relocate` reports the game
        // over and reads the winner right after; it must already be set
        assert_eq!(game.state.lock().relocate(&mut rng), None);
        assert_eq!(game.winner.get(), Some(&winner));
    }

    #[test]
    fn settings_accept_the_default_grid() {
        let settings = GameSettings::new(20, 4, Duration::from_millis(500), Duration::ZERO);

        assert!(settings.is_ok());
    }

    #[test]
    fn settings_reject_uneven_grids() {
        let settings = GameSettings::new(48, 5, Duration::from_millis(500), Duration::ZERO);

        assert!(settings.is_err());
    }

    #[test]
    fn settings_reject_grids_too_large_for_discord() {
        // 8 rows of 6
        assert!(GameSettings::new(48, 8, Duration::from_millis(500), Duration::ZERO).is_err());
        // 5 rows of 6
        assert!(GameSettings::new(30, 5, Duration::from_millis(500), Duration::ZERO).is_err());
        // 0 cells
        assert!(GameSettings::new(0, 4, Duration::from_millis(500), Duration::ZERO).is_err());
    }
}
