use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;
use twilight_http::request::channel::reaction::RequestReactionType;
use twilight_model::id::{
    marker::{ChannelMarker, MessageMarker},
    Id,
};

use crate::core::Context;

/// The first few reactions spell it out, the rest is decoration.
const INITIAL_REACTIONS: &[&str] = &["🇼", "🇦", "🇨", "🇰"];

const RANDOM_REACTIONS: &[&str] = &[
    "🪙", "🍮", "🐮", "👽", "⛳", "🐿️", "🔥", "🐀", "💥", "🏙️", "🍀", "🍒", "🍡", "🍣",
];

/// Best-effort cosmetic reactions on the game message, one per missed
/// click. Duplicates fail on Discord's end; that's fine, this is
/// nonessential functionality anyways.
pub(super) struct ReactionPoster {
    index: AtomicUsize,
}

impl ReactionPoster {
    pub fn new() -> Self {
        Self {
            index: AtomicUsize::new(0),
        }
    }

    pub async fn post(&self, ctx: &Context, channel: Id<ChannelMarker>, msg: Id<MessageMarker>) {
        let emoji = self.next_emoji(&mut rand::thread_rng());
        let reaction = RequestReactionType::Unicode { name: emoji };

        if let Err(err) = ctx.http.create_reaction(channel, msg, &reaction).await {
            debug!(?err, "Failed to add reaction {emoji}");
        }
    }

    fn next_emoji(&self, rng: &mut impl Rng) -> &'static str {
        let index = self.index.fetch_add(1, Ordering::Relaxed);

        match INITIAL_REACTIONS.get(index) {
            Some(emoji) => emoji,
            None => RANDOM_REACTIONS[rng.gen_range(0..RANDOM_REACTIONS.len())],
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;

    #[test]
    fn reactions_spell_wack_then_go_random() {
        let poster = ReactionPoster::new();
        let mut rng = StepRng::new(0, 0x1357_9BDF_0246_8ACE);

        for expected in INITIAL_REACTIONS {
            assert_eq!(poster.next_emoji(&mut rng), *expected);
        }

        for _ in 0..20 {
            let emoji = poster.next_emoji(&mut rng);
            assert!(RANDOM_REACTIONS.contains(&emoji));
        }
    }
}
