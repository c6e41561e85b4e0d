use std::{future::IntoFuture, slice};

use eyre::Result;
use twilight_http::response::ResponseFuture;
use twilight_model::{
    channel::{message::AllowedMentions, Message},
    id::{
        marker::{ChannelMarker, MessageMarker},
        Id,
    },
};

use crate::{core::Context, util::MessageBuilder};

pub trait MessageExt {
    /// Reply to the message; mentions in the content stay silent.
    fn reply(&self, ctx: &Context, content: &str) -> Result<ResponseFuture<Message>>;

    /// Edit the message in place.
    fn update(
        &self,
        ctx: &Context,
        builder: &MessageBuilder,
    ) -> Result<ResponseFuture<Message>>;
}

impl MessageExt for (Id<MessageMarker>, Id<ChannelMarker>) {
    fn reply(&self, ctx: &Context, content: &str) -> Result<ResponseFuture<Message>> {
        let (msg, channel) = *self;

        let allowed_mentions = AllowedMentions::default();
        let req = ctx
            .http
            .create_message(channel)
            .reply(msg)
            .allowed_mentions(Some(&allowed_mentions))
            .content(content)?;

        Ok(req.into_future())
    }

    fn update(
        &self,
        ctx: &Context,
        builder: &MessageBuilder,
    ) -> Result<ResponseFuture<Message>> {
        let (msg, channel) = *self;

        let mut req = ctx.http.update_message(channel, msg);

        if let Some(ref embed) = builder.embed {
            req = req.embeds(Some(slice::from_ref(embed)))?;
        }

        if let Some(ref components) = builder.components {
            req = req.components(Some(components))?;
        }

        Ok(req.into_future())
    }
}

impl MessageExt for Message {
    fn reply(&self, ctx: &Context, content: &str) -> Result<ResponseFuture<Message>> {
        (self.id, self.channel_id).reply(ctx, content)
    }

    fn update(
        &self,
        ctx: &Context,
        builder: &MessageBuilder,
    ) -> Result<ResponseFuture<Message>> {
        (self.id, self.channel_id).update(ctx, builder)
    }
}
