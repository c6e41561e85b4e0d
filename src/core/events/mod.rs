use std::sync::Arc;

use twilight_gateway::{Event, Shard};

use super::Context;

mod interaction;
mod message;

pub async fn event_loop(ctx: Arc<Context>, shard: &mut Shard) {
    loop {
        let event = match shard.next_event().await {
            Ok(event) => event,
            Err(err) if err.is_fatal() => {
                error!(?err, "Fatal gateway error");

                return;
            }
            Err(err) => {
                warn!(?err, "Gateway error");

                continue;
            }
        };

        let ctx = Arc::clone(&ctx);

        tokio::spawn(handle_event(ctx, event));
    }
}

async fn handle_event(ctx: Arc<Context>, event: Event) {
    match event {
        Event::MessageCreate(msg) => message::handle_message(ctx, msg.0).await,
        Event::InteractionCreate(interaction) => {
            interaction::handle_interaction(ctx, interaction.0).await
        }
        Event::Ready(ready) => info!("{} is ready to whack", ready.user.name),
        _ => {}
    }
}
