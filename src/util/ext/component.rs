use std::future::IntoFuture;

use twilight_http::response::{marker::EmptyBody, ResponseFuture};
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};

use crate::{core::Context, util::InteractionComponent};

pub trait ComponentExt {
    /// Acknowledge the component but don't respond yet.
    fn defer(&self, ctx: &Context) -> ResponseFuture<EmptyBody>;
}

impl ComponentExt for InteractionComponent {
    fn defer(&self, ctx: &Context) -> ResponseFuture<EmptyBody> {
        let response = InteractionResponse {
            kind: InteractionResponseType::DeferredUpdateMessage,
            data: None,
        };

        ctx.interaction()
            .create_response(self.id, &self.token, &response)
            .into_future()
    }
}
