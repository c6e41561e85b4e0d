pub use self::{
    builder::{EmbedBuilder, MessageBuilder},
    ext::{ChannelExt, ComponentExt, MessageExt},
    interaction::InteractionComponent,
};

pub mod builder;
pub mod constants;
pub mod datetime;
pub mod matcher;

mod ext;
mod interaction;
