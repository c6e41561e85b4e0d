use std::{future::IntoFuture, slice};

use eyre::Result;
use twilight_http::response::ResponseFuture;
use twilight_model::{
    channel::Message,
    id::{marker::ChannelMarker, Id},
};

use crate::{core::Context, util::MessageBuilder};

pub trait ChannelExt {
    /// Create a message in the channel.
    fn create_message(
        &self,
        ctx: &Context,
        builder: &MessageBuilder,
    ) -> Result<ResponseFuture<Message>>;
}

impl ChannelExt for Id<ChannelMarker> {
    fn create_message(
        &self,
        ctx: &Context,
        builder: &MessageBuilder,
    ) -> Result<ResponseFuture<Message>> {
        let mut req = ctx.http.create_message(*self);

        if let Some(ref embed) = builder.embed {
            req = req.embeds(slice::from_ref(embed))?;
        }

        if let Some(ref components) = builder.components {
            req = req.components(components)?;
        }

        Ok(req.into_future())
    }
}
