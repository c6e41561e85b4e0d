use std::sync::Arc;

use twilight_model::application::interaction::{Interaction, InteractionData};

use crate::{
    core::Context,
    util::{ComponentExt, InteractionComponent},
};

pub async fn handle_interaction(ctx: Arc<Context>, interaction: Interaction) {
    let Interaction {
        channel,
        data,
        id,
        kind,
        member,
        message,
        token,
        user,
        ..
    } = interaction;

    let Some(InteractionData::MessageComponent(data)) = data else {
        return;
    };

    let Some(message) = message else {
        return warn!("No message in component interaction");
    };

    let Some(channel_id) = channel.map(|channel| channel.id) else {
        return warn!(?kind, "No channel id for interaction");
    };

    let component = InteractionComponent {
        channel_id,
        data,
        id,
        member,
        message,
        token,
        user,
    };

    let Some(game) = ctx.active_game() else {
        // A button of a finished game; acknowledge it so the client
        // doesn't display an interaction failure.
        if let Err(err) = component.defer(&ctx).await {
            debug!(?err, "Failed to defer stale component");
        }

        return;
    };

    if let Err(err) = game.handle_click(ctx, component).await {
        error!("{:?}", err.wrap_err("Failed to process button click"));
    }
}
