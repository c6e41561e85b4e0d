use std::sync::Arc;

use twilight_model::channel::Message;

use crate::{
    core::{BotConfig, Context},
    games::whack::{Game, GameSettings},
    util::{datetime::humanize_duration, matcher, MessageExt},
};

pub async fn handle_message(ctx: Arc<Context>, msg: Message) {
    // Ignore bots and webhooks
    if msg.author.bot || msg.webhook_id.is_some() {
        return;
    }

    if !matcher::is_game_trigger(&msg.content) {
        return;
    }

    let Some(last_winner) = ctx.try_begin_game() else {
        let content = "wack *(a game is already in progress)*";

        match msg.reply(&ctx, content) {
            Ok(fut) => {
                if let Err(err) = fut.await {
                    warn!(?err, "Failed to send in-progress notice");
                }
            }
            Err(err) => warn!(?err, "Failed to build in-progress notice"),
        }

        return;
    };

    info!("Starting a new game, triggered by `{}`", msg.author.name);

    let config = BotConfig::get();

    let settings = match GameSettings::new(
        config.total_cells,
        config.rows,
        config.update_interval,
        config.update_increment,
    ) {
        Ok(settings) => settings,
        Err(err) => {
            error!("{:?}", err.wrap_err("Invalid game settings"));
            ctx.finish_game(None);

            return;
        }
    };

    let game = Arc::new(Game::new(config.game_channel, settings, last_winner));
    ctx.set_active_game(Arc::clone(&game));

    let winner = match game.run(Arc::clone(&ctx)).await {
        Ok(winner) => winner,
        Err(err) => {
            error!("{:?}", err.wrap_err("Game ended with an error"));

            None
        }
    };

    if let Some(winner) = winner {
        info!(
            "Game won by user {} in {}",
            winner.user,
            humanize_duration(winner.duration)
        );
    }

    ctx.finish_game(winner);
}
